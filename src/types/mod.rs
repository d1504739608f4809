//! # Typed Scalar Values and Keys
//!
//! This module provides the owned scalar representation indexed by the tree
//! and the multi-column key built from it.
//!
//! - [`ScalarValue`]: tagged union of the supported column types, with a
//!   total order and hashing consistent with it
//! - [`Key`]: an inline small-vector of scalars compared lexicographically
//! - [`ChunkOffset`]: a row position within the indexed chunk

mod value;

pub use value::{compare_keys, key_contains_null, key_head, make_key, ScalarValue};

use smallvec::SmallVec;

/// Row position within a chunk.
pub type ChunkOffset = u32;

/// Multi-column key. Most indexes cover one or two columns, so the
/// components are stored inline.
pub type Key = SmallVec<[ScalarValue; 2]>;
