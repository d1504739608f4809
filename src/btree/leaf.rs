//! # Leaf Nodes
//!
//! Leaf nodes hold the actual `(Key, SlotMeta)` entries in sorted order and
//! form a doubly-linked chain in ascending key order. The chain is what the
//! validation layer walks to reach a slot's left and right neighbours when
//! recomputing OD boundary flags.
//!
//! Links are non-owning [`NodeId`] handles. Empty leaves (possible after
//! unbalanced deletion) are taken out of the chain by the relink pass;
//! their own links keep pointing at the nearest chained neighbours so a
//! descent that lands on one can still continue sideways.

use crate::btree::{rebuild_hints, search_keyed, KeyedItem, NodeId, SlotMeta};
use crate::config::HINT_COUNT;
use crate::types::{Key, ScalarValue};

/// One `(Key, SlotMeta)` pair with its cached key head.
#[derive(Debug)]
pub struct Entry {
    pub key: Key,
    pub head: u32,
    pub slot: SlotMeta,
}

impl KeyedItem for Entry {
    fn head(&self) -> u32 {
        self.head
    }
    fn key(&self) -> &[ScalarValue] {
        &self.key
    }
}

/// Leaf node: sorted entries plus chain links and search hints.
#[derive(Debug, Default)]
pub struct LeafNode {
    pub entries: Vec<Entry>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    hints: [u32; HINT_COUNT],
}

impl LeafNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let mut leaf = Self {
            entries,
            ..Self::default()
        };
        leaf.rebuild_hints();
        leaf
    }

    /// Exact-match / insertion-point search, narrowed by hints.
    pub fn search(&self, key: &[ScalarValue], head: u32) -> Result<usize, usize> {
        search_keyed(&self.entries, &self.hints, key, head)
    }

    /// Inserts an entry at its sorted position. An entry with an equal key
    /// is replaced.
    pub fn insert(&mut self, entry: Entry) {
        match self.search(&entry.key, entry.head) {
            Ok(pos) => self.entries[pos] = entry,
            Err(pos) => self.entries.insert(pos, entry),
        }
        self.rebuild_hints();
    }

    /// Removes and returns the entry at `pos`.
    pub fn remove(&mut self, pos: usize) -> Entry {
        let entry = self.entries.remove(pos);
        self.rebuild_hints();
        entry
    }

    /// Splits off the upper entries starting at `at`, for node splitting.
    pub fn split_off(&mut self, at: usize) -> Vec<Entry> {
        let upper = self.entries.split_off(at);
        self.rebuild_hints();
        upper
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn min_key(&self) -> Option<&Key> {
        self.entries.first().map(|e| &e.key)
    }

    pub fn max_key(&self) -> Option<&Key> {
        self.entries.last().map(|e| &e.key)
    }

    pub fn rebuild_hints(&mut self) {
        self.hints = rebuild_hints(&self.entries);
    }
}
