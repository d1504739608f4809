//! # Incremental Dependency Validation
//!
//! The three validation operations keep the per-key metadata and the
//! global violation counter in lock-step with a stream of `(LHS, RHS)`
//! changes:
//!
//! - **FD** (`LHS → RHS`): a violation is the same LHS mapping to more
//!   than one distinct RHS. Only the distinct-RHS set matters; boundary
//!   flags stay zero.
//! - **OD** (`LHS ↝ RHS`): the same local check applies (multiple RHS per
//!   LHS is ambiguous ordering), plus a boundary check between adjacent
//!   LHS groups: a slot's `max_rhs` must not exceed its right neighbour's
//!   `min_rhs`.
//!
//! Every operation returns the signed [`MetadataDeltas`] it applied. The
//! deltas follow the publish-delta discipline: the previously published
//! contribution is read first, the new contribution is computed from slot
//! state, and only the difference reaches the counter. An OD mutation
//! additionally refreshes the predecessor's flag, because the mutated
//! slot's `min_rhs` is the value that flag was computed against.
//!
//! A multi-component RHS collapses to its leading scalar, and a null RHS
//! updates nothing. A null-containing LHS names no slot, so the operation
//! is a no-op with zero deltas.

use crate::btree::slot::od_boundary_flag;
use crate::btree::{DependencyType, MetadataDeltas, NodeId, SlotMeta};
use crate::index::BTreeIndex;
use crate::types::{key_contains_null, make_key, ScalarValue};

impl BTreeIndex {
    /// Applies an inserted `(lhs, rhs)` pair to the validation metadata.
    ///
    /// Creates the LHS slot if it does not exist (for OD the slot counts
    /// insertions), folds the RHS into the distinct set and extrema,
    /// recomputes the affected contributions, and publishes the deltas.
    pub fn insert_entry_for_validation(
        &mut self,
        left_key: &[ScalarValue],
        right_key: &[ScalarValue],
        dep_type: DependencyType,
    ) -> MetadataDeltas {
        let mut deltas = MetadataDeltas::default();
        if key_contains_null(left_key) {
            return deltas;
        }

        let loc = match self.tree.locate(left_key) {
            Some(loc) => {
                if dep_type == DependencyType::Od {
                    self.tree.slot_at_mut(loc).count += 1;
                }
                loc
            }
            None => {
                let count = if dep_type == DependencyType::Od { 1 } else { 0 };
                self.tree.insert(make_key(left_key), SlotMeta::new(0, count));
                self.tree.link_leaves();
                match self.tree.locate(left_key) {
                    Some(loc) => loc,
                    None => return deltas,
                }
            }
        };

        let rhs = right_key.first().filter(|v| !v.is_null());

        match dep_type {
            DependencyType::Fd => {
                let slot = self.tree.slot_at_mut(loc);
                let old_local = slot.local_violation_contribution;

                if let Some(rhs) = rhs {
                    slot.rhs_values.insert(rhs.clone());
                }
                let new_local = slot.local_violation_count();
                slot.local_violation_contribution = new_local;
                deltas.local_violation_delta = new_local - old_local;

                // FD violations are same-key only; retire any leftover
                // boundary contribution.
                if slot.right_neighbor_flag_contribution != 0 {
                    deltas.flag_delta -= slot.right_neighbor_flag_contribution;
                    slot.right_neighbor_flag = 0;
                    slot.right_neighbor_flag_contribution = 0;
                }
            }
            DependencyType::Od => {
                {
                    let slot = self.tree.slot_at_mut(loc);
                    let old_local = slot.local_violation_contribution;

                    if let Some(rhs) = rhs {
                        slot.observe_rhs(rhs);
                    }
                    let new_local = slot.local_violation_count();
                    slot.local_violation_contribution = new_local;
                    deltas.local_violation_delta = new_local - old_local;
                }

                // max_rhs may have grown: this slot's own flag.
                deltas.flag_delta += self.refresh_flag_at(loc);
                // min_rhs may have shrunk: the predecessor's flag.
                deltas.flag_delta += self.refresh_predecessor_flag(loc);
            }
        }

        self.global_violation_count += deltas.total();
        deltas
    }

    /// Applies a deleted `(lhs, rhs)` pair to the validation metadata.
    ///
    /// Removes the RHS from the distinct set; when the set runs empty the
    /// slot is removed from the tree entirely and, for OD, the former
    /// predecessor's flag is repaired against its new neighbour. An
    /// absent LHS is a no-op with zero deltas.
    pub fn delete_entry_for_validation(
        &mut self,
        left_key: &[ScalarValue],
        right_key: &[ScalarValue],
        dep_type: DependencyType,
    ) -> MetadataDeltas {
        let mut deltas = MetadataDeltas::default();
        if key_contains_null(left_key) {
            return deltas;
        }
        let loc = match self.tree.locate(left_key) {
            Some(loc) => loc,
            None => return deltas,
        };

        let rhs = right_key.first().filter(|v| !v.is_null());

        let (old_flag, old_local, now_empty) = {
            let slot = self.tree.slot_at_mut(loc);
            if let Some(rhs) = rhs {
                slot.rhs_values.remove(rhs);
            }
            (
                slot.right_neighbor_flag_contribution,
                slot.local_violation_contribution,
                slot.rhs_values.is_empty(),
            )
        };

        if now_empty {
            // The slot disappears; its published contributions go with it.
            deltas.flag_delta -= old_flag;
            deltas.local_violation_delta -= old_local;

            let pred_key = match dep_type {
                DependencyType::Od => self
                    .tree
                    .predecessor(loc.0, loc.1)
                    .map(|pred| self.tree.key_at(pred).clone()),
                DependencyType::Fd => None,
            };

            self.tree.remove_entry(left_key);
            self.tree.link_leaves();

            // The predecessor's right neighbour changed under it.
            if let Some(pred_key) = pred_key {
                if let Some(pred) = self.tree.locate(&pred_key) {
                    deltas.flag_delta += self.refresh_flag_at(pred);
                }
            }
        } else {
            match dep_type {
                DependencyType::Fd => {
                    let slot = self.tree.slot_at_mut(loc);
                    let new_local = slot.local_violation_count();
                    slot.local_violation_contribution = new_local;
                    deltas.local_violation_delta = new_local - old_local;
                }
                DependencyType::Od => {
                    {
                        let slot = self.tree.slot_at_mut(loc);
                        slot.refresh_extrema();
                        let new_local = slot.local_violation_count();
                        slot.local_violation_contribution = new_local;
                        deltas.local_violation_delta = new_local - old_local;
                    }
                    deltas.flag_delta += self.refresh_flag_at(loc);
                    deltas.flag_delta += self.refresh_predecessor_flag(loc);
                }
            }
        }

        self.global_violation_count += deltas.total();
        deltas
    }

    /// Applies an RHS change for an LHS: delete of the old pair followed
    /// by insert of the new one. Returns the summed deltas.
    pub fn update_entry_for_validation(
        &mut self,
        left_key: &[ScalarValue],
        old_right_key: &[ScalarValue],
        new_right_key: &[ScalarValue],
        dep_type: DependencyType,
    ) -> MetadataDeltas {
        let deleted = self.delete_entry_for_validation(left_key, old_right_key, dep_type);
        let inserted = self.insert_entry_for_validation(left_key, new_right_key, dep_type);
        MetadataDeltas {
            flag_delta: deleted.flag_delta + inserted.flag_delta,
            local_violation_delta: deleted.local_violation_delta
                + inserted.local_violation_delta,
        }
    }

    /// Recomputes the boundary flag of the slot at `loc` against its
    /// right neighbour and publishes the new value into the slot.
    /// Returns the signed change, which the caller folds into the
    /// counter.
    fn refresh_flag_at(&mut self, loc: (NodeId, usize)) -> i64 {
        let right_min = self
            .tree
            .successor(loc.0, loc.1)
            .and_then(|succ| self.tree.slot_at(succ).min_rhs.clone());
        let slot = self.tree.slot_at_mut(loc);
        let new_flag = od_boundary_flag(slot.max_rhs.as_ref(), right_min.as_ref());
        let old_flag = slot.right_neighbor_flag_contribution;
        slot.right_neighbor_flag = new_flag;
        slot.right_neighbor_flag_contribution = new_flag;
        new_flag - old_flag
    }

    fn refresh_predecessor_flag(&mut self, loc: (NodeId, usize)) -> i64 {
        match self.tree.predecessor(loc.0, loc.1) {
            Some(pred) => self.refresh_flag_at(pred),
            None => 0,
        }
    }
}
