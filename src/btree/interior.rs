//! # Interior Nodes
//!
//! Interior nodes route descent: they hold separator keys and child ids,
//! never slots. The separator at position `i` is the smallest key in the
//! subtree rooted at child `i + 1`, so a key equal to a separator descends
//! to the right of it. Separators are fences: after an unbalanced
//! deletion a separator may name a key that no longer exists, which is
//! fine as long as it still partitions the child ranges.

use crate::btree::{rebuild_hints, search_keyed, KeyedItem, NodeId};
use crate::config::HINT_COUNT;
use crate::types::{Key, ScalarValue};

/// Separator key with its cached head.
#[derive(Debug)]
pub struct Separator {
    pub key: Key,
    pub head: u32,
}

impl KeyedItem for Separator {
    fn head(&self) -> u32 {
        self.head
    }
    fn key(&self) -> &[ScalarValue] {
        &self.key
    }
}

/// Interior node: separator fences over `separators.len() + 1` children.
#[derive(Debug, Default)]
pub struct InteriorNode {
    pub separators: Vec<Separator>,
    pub children: Vec<NodeId>,
    hints: [u32; HINT_COUNT],
}

impl InteriorNode {
    /// Root replacement node over a single child, ready for a split.
    pub fn above(child: NodeId) -> Self {
        Self {
            children: vec![child],
            ..Self::default()
        }
    }

    /// Index of the child whose range contains `key`.
    pub fn child_index(&self, key: &[ScalarValue], head: u32) -> usize {
        match search_keyed(&self.separators, &self.hints, key, head) {
            // Equal to a separator: the key lives in the right subtree.
            Ok(pos) => pos + 1,
            Err(pos) => pos,
        }
    }

    /// Splices in the separator and right child produced by splitting the
    /// child at `child_idx`.
    pub fn insert_split(&mut self, child_idx: usize, separator: Separator, right: NodeId) {
        self.separators.insert(child_idx, separator);
        self.children.insert(child_idx + 1, right);
        self.rebuild_hints();
    }

    /// Splits off the upper separators and children for node splitting.
    /// Returns the promoted middle separator and the upper halves.
    pub fn split_upper(&mut self, mid: usize) -> (Separator, Vec<Separator>, Vec<NodeId>) {
        let mut upper_separators = self.separators.split_off(mid);
        let promoted = upper_separators.remove(0);
        let upper_children = self.children.split_off(mid + 1);
        self.rebuild_hints();
        (promoted, upper_separators, upper_children)
    }

    pub fn with_upper(separators: Vec<Separator>, children: Vec<NodeId>) -> Self {
        let mut node = Self {
            separators,
            children,
            ..Self::default()
        };
        node.rebuild_hints();
        node
    }

    pub fn is_full(&self, max_entries: usize) -> bool {
        self.separators.len() == max_entries
    }

    pub fn rebuild_hints(&mut self) {
        self.hints = rebuild_hints(&self.separators);
    }
}
