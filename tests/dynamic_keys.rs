//! # Dynamic Key Maintenance Tests
//!
//! Tests for the low-level key operations that keep the index usable for
//! online validation after construction: counted inserts and removals,
//! membership, key counting, and neighbour queries.

use veridex::{BTreeIndex, ScalarValue, ValueSegment};

fn int_index(values: &[i64]) -> BTreeIndex {
    let segment = ValueSegment::from_values(values.iter().copied());
    BTreeIndex::build(vec![segment.into_shared()]).unwrap()
}

fn key(v: i64) -> Vec<ScalarValue> {
    vec![ScalarValue::Int(v)]
}

#[test]
fn insert_key_creates_then_increments() {
    let mut index = int_index(&[5]);

    assert!(index.insert_key(&key(10)));
    assert!(index.contains_key(&key(10)));
    assert_eq!(index.get_value(&key(10)).unwrap().count, 1);

    assert!(!index.insert_key(&key(10)));
    assert_eq!(index.get_value(&key(10)).unwrap().count, 2);
    assert_eq!(index.key_count(), 2);
}

#[test]
fn remove_key_decrements_then_removes() {
    let mut index = int_index(&[5]);
    index.insert_key(&key(10));
    index.insert_key(&key(10));

    assert!(!index.remove_key(&key(10)));
    assert_eq!(index.get_value(&key(10)).unwrap().count, 1);

    assert!(index.remove_key(&key(10)));
    assert!(!index.contains_key(&key(10)));
    assert_eq!(index.key_count(), 1);
}

#[test]
fn remove_key_on_absent_key_reports_not_removed() {
    let mut index = int_index(&[5]);
    assert!(!index.remove_key(&key(10)));
    assert_eq!(index.key_count(), 1);
}

#[test]
fn null_keys_are_not_indexed() {
    let mut index = int_index(&[5]);
    assert!(!index.insert_key(&[ScalarValue::Int(1), ScalarValue::Null]));
    assert_eq!(index.key_count(), 1);
}

#[test]
fn build_counts_duplicate_rows() {
    let mut values = Vec::new();
    for _ in 0..10 {
        values.extend_from_slice(&[1, 2, 3]);
    }
    let index = int_index(&values);

    assert_eq!(index.key_count(), 3);
    for v in 1..=3 {
        assert_eq!(index.get_value(&key(v)).unwrap().count, 10);
    }
}

#[test]
fn many_dynamic_inserts_survive_splits() {
    let mut index = int_index(&[0]);
    for v in 1..=100 {
        assert!(index.insert_key(&key(v)));
    }

    assert_eq!(index.key_count(), 101);
    for v in 0..=100 {
        assert!(index.contains_key(&key(v)), "key {} missing", v);
    }
    assert!(!index.contains_key(&key(101)));
    assert!(!index.contains_key(&key(-1)));
    index.integrity_check().unwrap();
}

#[test]
fn interleaved_inserts_and_removals() {
    let mut index = int_index(&[50]);
    for v in 0..40 {
        index.insert_key(&key(v));
    }
    for v in (0..40).step_by(2) {
        assert!(index.remove_key(&key(v)));
    }

    assert_eq!(index.key_count(), 21);
    for v in (1..40).step_by(2) {
        assert!(index.contains_key(&key(v)));
    }
    for v in (0..40).step_by(2) {
        assert!(!index.contains_key(&key(v)));
    }
    index.integrity_check().unwrap();
}

#[test]
fn unsorted_dynamic_inserts_stay_searchable() {
    let mut index = int_index(&[100]);
    for v in [50, 150, 25, 75, 125, 175] {
        index.insert_key(&key(v));
    }

    for v in [25, 50, 75, 100, 125, 150, 175] {
        assert!(index.contains_key(&key(v)));
    }
    assert_eq!(index.key_count(), 7);
}

#[test]
fn left_neighbor_max_key_walks_the_chain() {
    let index = int_index(&(1..=10).collect::<Vec<_>>());

    // Leftmost key has no left neighbour.
    assert!(index.get_left_neighbor_max_key(&key(1)).is_none());

    // Every other key's left neighbour is its predecessor, whether it
    // sits in the same leaf or the one to the left.
    for v in 2..=10 {
        let neighbor = index.get_left_neighbor_max_key(&key(v)).unwrap();
        assert_eq!(neighbor[0], ScalarValue::Int(v - 1), "for key {}", v);
    }

    // For an absent key the leaf's left neighbour still answers.
    assert!(index.get_left_neighbor_max_key(&key(0)).is_none());
    let neighbor = index.get_left_neighbor_max_key(&key(99)).unwrap();
    assert!(matches!(neighbor[0], ScalarValue::Int(_)));
}

#[test]
fn get_value_reflects_build_groups() {
    let index = int_index(&[4, 2, 5, 2, 1]);

    let slot = index.get_value(&key(2)).unwrap();
    assert_eq!(slot.start_index, 1);
    assert_eq!(slot.count, 2);

    let slot = index.get_value(&key(5)).unwrap();
    assert_eq!(slot.start_index, 4);
    assert_eq!(slot.count, 1);

    assert!(index.get_value(&key(3)).is_none());
}
