//! # Per-Key Validation Metadata
//!
//! Every distinct LHS key in the tree owns a [`SlotMeta`] record. The slot
//! tracks what the validation layer needs to answer "does the declared
//! dependency still hold?" in constant time:
//!
//! - the set of **distinct RHS values** observed for this LHS (same LHS
//!   with different RHS is a violation for FD and ambiguous ordering for
//!   OD),
//! - the **min/max RHS** for OD boundary checks against the neighbouring
//!   LHS group,
//! - the **contributions** this slot has most recently published into the
//!   index-wide violation counter.
//!
//! ## Contribution Discipline
//!
//! The global counter equals the sum of every slot's
//! `right_neighbor_flag_contribution` and `local_violation_contribution`.
//! Mutating code must read the previously published contribution, compute
//! the new value, and apply the signed difference. Writing the new value
//! before taking the difference desynchronises the counter.

use hashbrown::HashSet;

use crate::types::{ChunkOffset, ScalarValue};

/// Kind of dependency an index validates.
///
/// - `Fd`: functional dependency, same LHS must map to the same RHS
/// - `Od`: order dependency, LHS order must imply RHS order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    Fd,
    Od,
}

/// Signed changes a validation operation applied to the global violation
/// counter, split by origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetadataDeltas {
    /// Change in right-neighbour boundary violations.
    pub flag_delta: i64,
    /// Change in local (same-LHS) violations.
    pub local_violation_delta: i64,
}

impl MetadataDeltas {
    pub fn total(&self) -> i64 {
        self.flag_delta + self.local_violation_delta
    }
}

/// Metadata attached to every distinct key in the tree.
#[derive(Debug, Clone, Default)]
pub struct SlotMeta {
    /// Position of this key's first row in the sorted offset projection.
    pub start_index: ChunkOffset,
    /// Occurrences of this key. Filled by the build; maintained by the
    /// low-level key operations and OD inserts afterwards.
    pub count: ChunkOffset,

    /// Distinct RHS values observed for this LHS.
    pub rhs_values: HashSet<ScalarValue>,

    /// Extrema of `rhs_values`, maintained for OD boundary checks.
    pub min_rhs: Option<ScalarValue>,
    pub max_rhs: Option<ScalarValue>,

    /// 1 if this slot's `max_rhs` exceeds the right neighbour's
    /// `min_rhs` (OD only).
    pub right_neighbor_flag: i64,
    /// What this slot last published into the global counter for its
    /// boundary flag.
    pub right_neighbor_flag_contribution: i64,
    /// What this slot last published into the global counter for its
    /// local violations.
    pub local_violation_contribution: i64,
}

impl SlotMeta {
    /// Slot for a key group produced by the index build.
    pub fn new(start_index: ChunkOffset, count: ChunkOffset) -> Self {
        Self {
            start_index,
            count,
            ..Self::default()
        }
    }

    /// Current local violation count: distinct RHS values minus one.
    ///
    /// The formula is shared by FD and OD; for OD it captures the
    /// ambiguous-ordering case, boundary violations are tracked
    /// separately via the neighbour flag.
    pub fn local_violation_count(&self) -> i64 {
        if self.rhs_values.is_empty() {
            0
        } else {
            self.rhs_values.len() as i64 - 1
        }
    }

    /// Folds an RHS value into the set and the extrema.
    pub fn observe_rhs(&mut self, rhs: &ScalarValue) {
        if self.min_rhs.as_ref().is_none_or(|min| rhs < min) {
            self.min_rhs = Some(rhs.clone());
        }
        if self.max_rhs.as_ref().is_none_or(|max| rhs > max) {
            self.max_rhs = Some(rhs.clone());
        }
        self.rhs_values.insert(rhs.clone());
    }

    /// Recomputes `min_rhs`/`max_rhs` from the remaining set. Both become
    /// unset when the set is empty.
    pub fn refresh_extrema(&mut self) {
        self.min_rhs = self.rhs_values.iter().min().cloned();
        self.max_rhs = self.rhs_values.iter().max().cloned();
    }
}

/// OD boundary check: a slot violates the order dependency against its
/// right neighbour iff its `max_rhs` exceeds the neighbour's `min_rhs`.
pub(crate) fn od_boundary_flag(
    max_rhs: Option<&ScalarValue>,
    right_min_rhs: Option<&ScalarValue>,
) -> i64 {
    match (max_rhs, right_min_rhs) {
        (Some(max), Some(min)) if max > min => 1,
        _ => 0,
    }
}
