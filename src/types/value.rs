//! # Scalar Value Representation
//!
//! Values indexed by the tree are owned scalars stored inline in an enum.
//! The design mirrors the column types the index is built over:
//!
//! - **Null**: SQL NULL, represents absence of value
//! - **Int**: 64-bit signed integer
//! - **Float**: 64-bit floating point
//! - **Text**: owned UTF-8 string
//! - **Blob**: owned binary data
//!
//! ## Comparison Semantics
//!
//! Unlike query-time SQL comparison, index ordering must be total: every
//! pair of scalars has a defined order so keys can be sorted, searched, and
//! deduplicated. The order is variant rank first (Int < Float < Text <
//! Blob < Null), then the value itself. Floats use IEEE-754 `total_cmp`, so
//! NaN and signed zeros are ordered deterministically.
//!
//! A column holds one declared type, so the cross-variant branch of the
//! comparison is never taken for well-formed input; keeping columns
//! homogeneous is the caller's responsibility.
//!
//! `Eq` and `Hash` agree with the order: floats hash and compare by their
//! raw bits, matching `total_cmp` equality. This lets scalars live in hash
//! sets (the distinct-RHS set) without a wrapper type.
//!
//! ## Key Heads
//!
//! Every scalar can produce a 32-bit **head**, a fingerprint of its leading
//! bytes folded with its variant rank. Heads preserve equality (equal
//! scalars always share a head) and are constructed monotonically, so the
//! in-node search can order-compare heads and only fall back to a full key
//! comparison on a head tie. A key's head is the head of its first
//! component; the remaining components only participate in full
//! comparisons.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::Key;

/// Owned scalar value for index keys and RHS tracking.
#[derive(Debug, Clone)]
pub enum ScalarValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ScalarValue {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Rank used to order values of different variants.
    fn type_rank(&self) -> u32 {
        match self {
            ScalarValue::Int(_) => 0,
            ScalarValue::Float(_) => 1,
            ScalarValue::Text(_) => 2,
            ScalarValue::Blob(_) => 3,
            ScalarValue::Null => 4,
        }
    }

    /// 32-bit fingerprint of this scalar's leading bytes.
    ///
    /// Equal scalars share a head, and for scalars of the same variant the
    /// head is monotone in the value, so `head(a) < head(b)` implies
    /// `a < b`. A head tie decides nothing; callers must fall back to a
    /// full comparison.
    pub fn head(&self) -> u32 {
        let body = match self {
            ScalarValue::Null => 0,
            ScalarValue::Int(i) => (((*i as u64) ^ (1 << 63)) >> 32) as u32,
            ScalarValue::Float(f) => {
                // Map the IEEE-754 bits to an order-preserving unsigned
                // integer (same transform total_cmp is defined by), then
                // keep the top 32 bits.
                let bits = f.to_bits();
                let ordered = if bits >> 63 == 1 { !bits } else { bits | (1 << 63) };
                (ordered >> 32) as u32
            }
            ScalarValue::Text(s) => prefix_head(s.as_bytes()),
            ScalarValue::Blob(b) => prefix_head(b),
        };
        // Variant rank in the top bits keeps heads order-consistent even
        // across variants.
        (self.type_rank() << 29) | (body >> 3)
    }
}

/// First four bytes as a big-endian u32, zero-padded.
fn prefix_head(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    let n = bytes.len().min(4);
    buf[..n].copy_from_slice(&bytes[..n]);
    u32::from_be_bytes(buf)
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => a.cmp(b),
            (ScalarValue::Float(a), ScalarValue::Float(b)) => a.total_cmp(b),
            (ScalarValue::Text(a), ScalarValue::Text(b)) => a.cmp(b),
            (ScalarValue::Blob(a), ScalarValue::Blob(b)) => a.cmp(b),
            (ScalarValue::Null, ScalarValue::Null) => Ordering::Equal,
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_rank().hash(state);
        match self {
            ScalarValue::Null => {}
            ScalarValue::Int(i) => i.hash(state),
            ScalarValue::Float(f) => f.to_bits().hash(state),
            ScalarValue::Text(s) => s.hash(state),
            ScalarValue::Blob(b) => b.hash(state),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Text(s) => write!(f, "'{}'", s),
            ScalarValue::Blob(b) => write!(f, "<blob:{} bytes>", b.len()),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(v as i64)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(v: Vec<u8>) -> Self {
        ScalarValue::Blob(v)
    }
}

/// Head of a multi-column key: the head of its first component.
///
/// The empty key has head 0.
pub fn key_head(key: &[ScalarValue]) -> u32 {
    key.first().map_or(0, ScalarValue::head)
}

/// Returns true if any component of the key is NULL.
///
/// Null-containing keys are never stored in the tree.
pub fn key_contains_null(key: &[ScalarValue]) -> bool {
    key.iter().any(ScalarValue::is_null)
}

/// Lexicographic key comparison.
pub fn compare_keys(a: &[ScalarValue], b: &[ScalarValue]) -> Ordering {
    a.cmp(b)
}

/// Builds an owned key from a slice of scalars.
pub fn make_key(components: &[ScalarValue]) -> Key {
    components.iter().cloned().collect()
}
