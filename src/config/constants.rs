//! # Veridex Configuration Constants
//!
//! Centralized constants for the B-tree core. Constants that depend on each
//! other are co-located so a change to one is checked against the others.
//!
//! ## Dependency Graph
//!
//! ```text
//! MIN_DEGREE (3)
//!       │
//!       ├─> MAX_ENTRIES_PER_NODE (derived: 2t - 1)
//!       │     A node splits when an insertion would push it past this.
//!       │
//!       ├─> MAX_CHILDREN_PER_NODE (derived: 2t)
//!       │     An interior node always has one more child than separators.
//!       │
//!       └─> SPLIT_MIDPOINT (derived: t - 1)
//!             Index of the entry that seeds the parent separator on split.
//!
//! HINT_COUNT (2)
//!       │
//!       └─> HINT_MIN_ENTRIES (derived: HINT_COUNT + 2)
//!             Below this many entries the hint array cannot narrow the
//!             binary-search range and search skips it entirely.
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by the compile-time assertions at the bottom of this file:
//!
//! 1. `MAX_ENTRIES_PER_NODE == 2 * MIN_DEGREE - 1`
//! 2. `MAX_CHILDREN_PER_NODE == MAX_ENTRIES_PER_NODE + 1`
//! 3. `HINT_MIN_ENTRIES <= MAX_ENTRIES_PER_NODE` (hints can actually engage)

/// Minimum degree `t` of the B-tree.
///
/// Every node holds at most `2t - 1` entries and an interior node at most
/// `2t` children. The tree is used as a metadata map, so the usual lower
/// bound of `t - 1` entries is not maintained under deletion.
pub const MIN_DEGREE: usize = 3;

/// Maximum number of entries (or separators) a node may hold: `2t - 1`.
pub const MAX_ENTRIES_PER_NODE: usize = 2 * MIN_DEGREE - 1;

/// Maximum number of children an interior node may hold: `2t`.
pub const MAX_CHILDREN_PER_NODE: usize = 2 * MIN_DEGREE;

/// Index of the entry whose key seeds the parent separator during a split.
pub const SPLIT_MIDPOINT: usize = MIN_DEGREE - 1;

/// Number of sampled key heads kept per node for search narrowing.
pub const HINT_COUNT: usize = 2;

/// Minimum entry count before hint narrowing engages.
pub const HINT_MIN_ENTRIES: usize = HINT_COUNT + 2;

const _: () = assert!(MAX_ENTRIES_PER_NODE == 2 * MIN_DEGREE - 1);
const _: () = assert!(MAX_CHILDREN_PER_NODE == MAX_ENTRIES_PER_NODE + 1);
const _: () = assert!(HINT_MIN_ENTRIES <= MAX_ENTRIES_PER_NODE);
