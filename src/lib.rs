//! # Veridex - Validating Chunk Index
//!
//! Veridex is an in-memory, ordered multi-column index for column-store
//! chunks that doubles as an incremental validator for functional
//! dependencies (FD) and order dependencies (OD). A chunk uses it both as
//! a sorted access path (lower/upper bound scans returning row offsets)
//! and as a live oracle that answers in O(1) whether a declared
//! dependency still holds as rows are inserted, updated, or removed.
//!
//! ## Quick Start
//!
//! ```
//! use veridex::{BTreeIndex, DependencyType, ScalarValue, ValueSegment};
//!
//! let mut column = ValueSegment::new();
//! for v in [1i64, 1, 2] {
//!     column.append(v);
//! }
//!
//! let mut index = BTreeIndex::build(vec![column.into_shared()]).unwrap();
//!
//! // Same LHS, same RHS: the functional dependency holds.
//! index.insert_entry_for_validation(
//!     &[ScalarValue::Int(1)],
//!     &[ScalarValue::Int(10)],
//!     DependencyType::Fd,
//! );
//! index.insert_entry_for_validation(
//!     &[ScalarValue::Int(1)],
//!     &[ScalarValue::Int(10)],
//!     DependencyType::Fd,
//! );
//! assert_eq!(index.global_violation_count(), 0);
//!
//! // A second distinct RHS for the same LHS breaks it.
//! index.insert_entry_for_validation(
//!     &[ScalarValue::Int(1)],
//!     &[ScalarValue::Int(11)],
//!     DependencyType::Fd,
//! );
//! assert_eq!(index.global_violation_count(), 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           BTreeIndex (façade)                │
//! │  scans │ dynamic keys │ validation │ counter │
//! ├──────────────────────────────────────────────┤
//! │           B+tree (arena of nodes)            │
//! │  interior: separator fences + child ids      │
//! │  leaves: (Key, SlotMeta) entries, chained    │
//! ├──────────────────────────────────────────────┤
//! │  sorted offset projection │ null positions   │
//! ├──────────────────────────────────────────────┤
//! │     ColumnSegment accessors (read-only)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every distinct key owns a metadata slot holding its distinct-RHS set,
//! optional RHS extrema, and the contributions it has published into the
//! index-wide violation counter. Mutations follow a publish-delta
//! discipline, so the counter always equals the sum of the live
//! contributions and a zero counter means the dependency holds.
//!
//! ## Concurrency Model
//!
//! The index is single-writer by construction: mutation takes `&mut self`
//! and runs to completion without suspension points. Concurrent readers
//! are safe whenever no writer runs; the type provides no internal
//! synchronisation.
//!
//! ## Module Overview
//!
//! - [`types`]: scalar values, keys, key heads
//! - [`segment`]: read-only column accessors
//! - [`btree`]: the linked-leaf tree and per-key metadata slots
//! - [`index`]: the façade with scans, validation, and diagnostics
//! - [`config`]: centralized tuning constants

pub mod btree;
pub mod config;
pub mod index;
pub mod segment;
pub mod types;

pub use btree::{DependencyType, MetadataDeltas, SlotMeta};
pub use index::{BTreeIndex, ChunkIndexType, OffsetIter};
pub use segment::{ColumnSegment, ValueSegment};
pub use types::{ChunkOffset, Key, ScalarValue};
