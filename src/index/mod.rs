//! # Chunk Index Façade
//!
//! [`BTreeIndex`] ties the tree, the sorted offset projection, and the
//! validation state together into the index a column-store chunk works
//! with. It serves two roles at once:
//!
//! 1. **Sorted access path**: `lower_bound` / `upper_bound` / `iter`
//!    resolve to positions in the offset projection built at construction
//!    time, yielding row offsets in ascending key order.
//! 2. **Dependency oracle**: the validation operations (see
//!    [`validation`](self)) maintain per-key metadata and one global
//!    violation counter, so "does the declared FD/OD still hold?" is a
//!    single integer read: zero means the dependency holds.
//!
//! ## Construction
//!
//! The build sorts row offsets `0..n` lexicographically by their key
//! (nulls last, ties by position), writes the non-null offsets into the
//! flat projection, inserts one slot per distinct key carrying
//! `(start_index, count)`, collects null-keyed rows into a separate list,
//! and links the leaves. The projection is immutable afterwards; dynamic
//! key operations only touch the tree.
//!
//! ## Counter Discipline
//!
//! Every mutation reads a slot's previously published contributions,
//! recomputes them, and applies the signed difference to
//! `global_violation_count`. The counter therefore always equals the sum
//! of all live contributions, which [`BTreeIndex::integrity_check`]
//! verifies along with the structural invariants.

pub mod iter;
mod validation;

pub use iter::OffsetIter;

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::btree::tree::Node;
use crate::btree::{BTree, DependencyType, NodeId, SlotMeta};
use crate::config::MAX_ENTRIES_PER_NODE;
use crate::segment::ColumnSegment;
use crate::types::{compare_keys, key_contains_null, make_key, ChunkOffset, Key, ScalarValue};

/// Kind of chunk index behind the common index surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkIndexType {
    BTree,
}

/// Ordered multi-column chunk index with incremental dependency
/// validation.
pub struct BTreeIndex {
    segments: Vec<Arc<dyn ColumnSegment>>,
    tree: BTree,
    chunk_offsets: Vec<ChunkOffset>,
    null_positions: Vec<ChunkOffset>,
    global_violation_count: i64,
    dependency_type: DependencyType,
}

impl BTreeIndex {
    /// Builds an index over the given segments.
    ///
    /// The segments form the indexed key column-by-column; a row whose
    /// key contains a null in any component is kept out of the tree and
    /// recorded in the null-position list instead.
    pub fn build(segments: Vec<Arc<dyn ColumnSegment>>) -> Result<Self> {
        ensure!(
            !segments.is_empty(),
            "a chunk index requires at least one segment"
        );
        let row_count = segments[0].len();
        ensure!(
            segments.iter().all(|s| s.len() == row_count),
            "indexed segments must cover the same rows"
        );

        let mut keys: Vec<Key> = Vec::with_capacity(row_count);
        let mut has_null = vec![false; row_count];
        for row in 0..row_count {
            let mut key = Key::new();
            for segment in &segments {
                let value = segment.get(row as ChunkOffset);
                if value.is_null() {
                    has_null[row] = true;
                }
                key.push(value);
            }
            keys.push(key);
        }

        let mut offsets: Vec<ChunkOffset> = (0..row_count as ChunkOffset).collect();
        offsets.sort_unstable_by(|&a, &b| {
            let (a, b) = (a as usize, b as usize);
            has_null[a]
                .cmp(&has_null[b])
                .then_with(|| compare_keys(&keys[a], &keys[b]))
                .then_with(|| a.cmp(&b))
        });

        let mut index = Self {
            segments,
            tree: BTree::new(),
            chunk_offsets: Vec::with_capacity(row_count),
            null_positions: Vec::new(),
            global_violation_count: 0,
            dependency_type: DependencyType::Fd,
        };

        // Runs of equal keys become one slot each; the slot remembers
        // where its rows start in the projection and how many there are.
        let mut current: Option<(Key, ChunkOffset, ChunkOffset)> = None;
        for &offset in &offsets {
            let row = offset as usize;
            if has_null[row] {
                index.null_positions.push(offset);
                continue;
            }
            match &mut current {
                Some((key, _, count)) if *key == keys[row] => *count += 1,
                _ => {
                    if let Some((key, start, count)) = current.take() {
                        index.tree.insert(key, SlotMeta::new(start, count));
                    }
                    current = Some((
                        std::mem::take(&mut keys[row]),
                        index.chunk_offsets.len() as ChunkOffset,
                        1,
                    ));
                }
            }
            index.chunk_offsets.push(offset);
        }
        if let Some((key, start, count)) = current {
            index.tree.insert(key, SlotMeta::new(start, count));
        }

        index.tree.link_leaves();
        log::debug!(
            "built index over {} rows: {} distinct keys, {} null rows, {} nodes",
            row_count,
            index.tree.key_count(),
            index.null_positions.len(),
            index.tree.node_count()
        );
        Ok(index)
    }

    pub fn index_type(&self) -> ChunkIndexType {
        ChunkIndexType::BTree
    }

    pub fn indexed_segments(&self) -> &[Arc<dyn ColumnSegment>] {
        &self.segments
    }

    /// The dependency this index is declared to validate.
    pub fn dependency_type(&self) -> DependencyType {
        self.dependency_type
    }

    pub fn set_dependency_type(&mut self, dependency_type: DependencyType) {
        self.dependency_type = dependency_type;
    }

    /// Current total of boundary-flag and local violations. Zero iff the
    /// dependency holds for the visible data.
    pub fn global_violation_count(&self) -> i64 {
        self.global_violation_count
    }

    // ---- scans -----------------------------------------------------------

    /// All non-null row offsets in ascending key order.
    pub fn iter(&self) -> OffsetIter<'_> {
        OffsetIter::new(&self.chunk_offsets)
    }

    /// Row offsets whose key contains a null component.
    pub fn null_iter(&self) -> OffsetIter<'_> {
        OffsetIter::new(&self.null_positions)
    }

    /// Offsets starting at the first key `>= values`.
    pub fn lower_bound(&self, values: &[ScalarValue]) -> OffsetIter<'_> {
        self.bound_iter(self.tree.lower_bound(values))
    }

    /// Offsets starting at the first key strictly `> values`.
    pub fn upper_bound(&self, values: &[ScalarValue]) -> OffsetIter<'_> {
        self.bound_iter(self.tree.upper_bound(values))
    }

    fn bound_iter(&self, loc: Option<(NodeId, usize)>) -> OffsetIter<'_> {
        match loc {
            Some(loc) => {
                let start = self.tree.slot_at(loc).start_index as usize;
                OffsetIter::new(&self.chunk_offsets[start..])
            }
            None => OffsetIter::new(&[]),
        }
    }

    // ---- dynamic keys ----------------------------------------------------

    /// Inserts a key, creating its entry or bumping its count.
    ///
    /// Returns true iff a new entry was created. Null-containing keys are
    /// not indexed and leave the tree untouched.
    pub fn insert_key(&mut self, key: &[ScalarValue]) -> bool {
        if key_contains_null(key) {
            return false;
        }
        if let Some(slot) = self.tree.get_mut(key) {
            slot.count += 1;
            return false;
        }
        self.tree.insert(make_key(key), SlotMeta::new(0, 1));
        self.tree.link_leaves();
        true
    }

    /// Removes one occurrence of a key; the entry disappears when its
    /// count reaches zero. Returns true iff the entry was removed
    /// entirely.
    pub fn remove_key(&mut self, key: &[ScalarValue]) -> bool {
        match self.tree.get_mut(key) {
            None => false,
            Some(slot) if slot.count > 1 => {
                slot.count -= 1;
                false
            }
            Some(slot) => {
                // The entry takes its published contributions with it.
                let retired = slot.right_neighbor_flag_contribution
                    + slot.local_violation_contribution;
                self.global_violation_count -= retired;
                self.tree.remove_entry(key);
                self.tree.link_leaves();
                true
            }
        }
    }

    pub fn contains_key(&self, key: &[ScalarValue]) -> bool {
        self.tree.contains_key(key)
    }

    /// Number of distinct keys currently in the index.
    pub fn key_count(&self) -> usize {
        self.tree.key_count()
    }

    /// Metadata slot for a key, if present.
    pub fn get_value(&self, key: &[ScalarValue]) -> Option<&SlotMeta> {
        self.tree.get(key)
    }

    /// Largest key strictly to the left of `key`'s position: the previous
    /// entry in its leaf, else the last entry of the linked left leaf.
    pub fn get_left_neighbor_max_key(&self, key: &[ScalarValue]) -> Option<Key> {
        let (leaf, pos) = self.tree.find_leaf(key);
        match pos {
            Some(p) if p > 0 => Some(self.tree.leaf_ref(leaf).entries[p - 1].key.clone()),
            _ => {
                let left = self.tree.leaf_ref(leaf).left?;
                self.tree.leaf_ref(left).max_key().cloned()
            }
        }
    }

    // ---- low-level metadata operations -----------------------------------

    /// Overwrites the boundary flag of a key's slot, republishing its
    /// contribution.
    pub fn set_right_neighbor_flag(&mut self, key: &[ScalarValue], flag: i64) {
        if let Some(loc) = self.tree.locate(key) {
            let slot = self.tree.slot_at_mut(loc);
            self.global_violation_count -= slot.right_neighbor_flag_contribution;
            slot.right_neighbor_flag = flag;
            slot.right_neighbor_flag_contribution = flag;
            self.global_violation_count += flag;
        }
    }

    pub fn get_right_neighbor_flag(&self, key: &[ScalarValue]) -> i64 {
        self.tree
            .get(key)
            .map_or(0, |slot| slot.right_neighbor_flag)
    }

    /// Recomputes a slot's local violation contribution from its current
    /// distinct-RHS set and publishes the difference.
    pub fn recompute_local_violation_delta(&mut self, key: &[ScalarValue]) {
        if let Some(loc) = self.tree.locate(key) {
            let slot = self.tree.slot_at_mut(loc);
            let current = slot.local_violation_count();
            self.global_violation_count += current - slot.local_violation_contribution;
            slot.local_violation_contribution = current;
        }
    }

    // ---- memory ----------------------------------------------------------

    /// Predicts the memory cost of an index over `row_count` rows with
    /// `distinct_count` distinct keys of `value_bytes` each. A diagnostic
    /// estimate, not an allocation contract.
    pub fn estimate_memory_consumption(
        row_count: ChunkOffset,
        distinct_count: ChunkOffset,
        value_bytes: u32,
    ) -> usize {
        let entry_size = value_bytes as usize + std::mem::size_of::<SlotMeta>();
        let node_overhead = std::mem::size_of::<Node>();
        let num_nodes = (distinct_count as usize).div_ceil(MAX_ENTRIES_PER_NODE);
        num_nodes * (node_overhead + MAX_ENTRIES_PER_NODE * entry_size)
            + row_count as usize * std::mem::size_of::<ChunkOffset>()
    }

    /// Actual footprint of this index.
    pub fn memory_consumption(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.chunk_offsets.capacity() * std::mem::size_of::<ChunkOffset>()
            + self.null_positions.capacity() * std::mem::size_of::<ChunkOffset>()
            + self.tree.memory_footprint()
    }

    // ---- diagnostics -----------------------------------------------------

    /// Verifies the index invariants: tree structure and leaf chain,
    /// extrema consistency of every slot, and the identity between the
    /// global counter and the published contributions.
    pub fn integrity_check(&self) -> Result<()> {
        self.tree.check_structure()?;

        let mut published = 0i64;
        let mut problems: Vec<String> = Vec::new();
        self.tree.for_each_entry(|key, slot| {
            published +=
                slot.right_neighbor_flag_contribution + slot.local_violation_contribution;

            let set_min = slot.rhs_values.iter().min();
            let set_max = slot.rhs_values.iter().max();
            if slot.min_rhs.is_some() && slot.min_rhs.as_ref() != set_min {
                problems.push(format!("slot {:?}: min_rhs out of sync", key));
            }
            if slot.max_rhs.is_some() && slot.max_rhs.as_ref() != set_max {
                problems.push(format!("slot {:?}: max_rhs out of sync", key));
            }
            if slot.rhs_values.is_empty()
                && (slot.min_rhs.is_some() || slot.max_rhs.is_some())
            {
                problems.push(format!("slot {:?}: extrema without RHS values", key));
            }
            if !(0..=1).contains(&slot.right_neighbor_flag) {
                problems.push(format!("slot {:?}: boundary flag out of range", key));
            }
        });
        ensure!(problems.is_empty(), "{}", problems.join("; "));
        ensure!(
            published == self.global_violation_count,
            "global violation count {} does not match published contributions {}",
            self.global_violation_count,
            published
        );
        Ok(())
    }
}
