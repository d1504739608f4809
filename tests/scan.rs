//! # Scan Surface Tests
//!
//! Tests for index construction and the sorted access path: offset
//! iteration, bound queries, null handling, and memory reporting.

use veridex::{BTreeIndex, ChunkIndexType, ScalarValue, ValueSegment};

fn int_index(values: &[i64]) -> BTreeIndex {
    let segment = ValueSegment::from_values(values.iter().copied());
    BTreeIndex::build(vec![segment.into_shared()]).unwrap()
}

fn key(values: &[i64]) -> Vec<ScalarValue> {
    values.iter().map(|&v| ScalarValue::Int(v)).collect()
}

#[test]
fn offsets_come_back_in_key_order() {
    // Sorted by value: 1@4, 2@1, 2@3, 4@0, 5@2.
    let index = int_index(&[4, 2, 5, 2, 1]);
    assert_eq!(index.iter().collect::<Vec<_>>(), vec![4, 1, 3, 0, 2]);
}

#[test]
fn lower_bound_starts_at_first_match() {
    let index = int_index(&[4, 2, 5, 2, 1]);

    let mut it = index.lower_bound(&key(&[2]));
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next(), Some(3));
    assert_eq!(it.next(), Some(0));

    let mut it = index.upper_bound(&key(&[2]));
    assert_eq!(it.next(), Some(0));
}

#[test]
fn bounds_between_and_beyond_keys() {
    let index = int_index(&[10, 20, 30]);

    // 15 falls between 10 and 20.
    assert_eq!(index.lower_bound(&key(&[15])).next(), Some(1));
    assert_eq!(index.upper_bound(&key(&[10])).next(), Some(1));

    // Nothing is >= 99.
    assert_eq!(index.lower_bound(&key(&[99])).next(), None);
    assert_eq!(index.upper_bound(&key(&[30])).next(), None);

    // Everything is >= 0.
    assert_eq!(index.lower_bound(&key(&[0])).len(), 3);
}

#[test]
fn ties_break_by_row_position() {
    let index = int_index(&[7, 7, 7, 7]);
    assert_eq!(index.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn null_rows_are_kept_out_of_the_projection() {
    let mut segment = ValueSegment::new();
    segment.append(3);
    segment.append(ScalarValue::Null);
    segment.append(1);
    segment.append(ScalarValue::Null);
    let index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();

    assert_eq!(index.iter().collect::<Vec<_>>(), vec![2, 0]);
    assert_eq!(index.null_iter().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(index.key_count(), 2);
    assert!(!index.contains_key(&[ScalarValue::Null]));
}

#[test]
fn all_null_segment_yields_empty_scans() {
    let mut segment = ValueSegment::new();
    segment.append(ScalarValue::Null);
    segment.append(ScalarValue::Null);
    let index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();

    assert_eq!(index.iter().next(), None);
    assert_eq!(index.null_iter().len(), 2);
    assert_eq!(index.global_violation_count(), 0);
    assert_eq!(index.key_count(), 0);
}

#[test]
fn zero_row_segment_builds_an_empty_index() {
    let index = int_index(&[]);
    assert_eq!(index.iter().next(), None);
    assert_eq!(index.null_iter().next(), None);
    assert_eq!(index.key_count(), 0);
    index.integrity_check().unwrap();
}

#[test]
fn build_requires_at_least_one_segment() {
    assert!(BTreeIndex::build(vec![]).is_err());
}

#[test]
fn build_rejects_mismatched_segment_lengths() {
    let a = ValueSegment::from_values([1, 2, 3]);
    let b = ValueSegment::from_values([1, 2]);
    assert!(BTreeIndex::build(vec![a.into_shared(), b.into_shared()]).is_err());
}

#[test]
fn multi_column_keys_compare_by_both_components() {
    let a = ValueSegment::from_values([1, 1, 2, 2]);
    let b = ValueSegment::from_values([9, 3, 8, 1]);
    let index = BTreeIndex::build(vec![a.into_shared(), b.into_shared()]).unwrap();

    // Sorted keys: (1,3)@1, (1,9)@0, (2,1)@3, (2,8)@2.
    assert_eq!(index.iter().collect::<Vec<_>>(), vec![1, 0, 3, 2]);
    assert!(index.contains_key(&key(&[1, 9])));
    assert!(!index.contains_key(&key(&[1])));

    let mut it = index.lower_bound(&key(&[1, 9]));
    assert_eq!(it.next(), Some(0));

    // A null in either column keeps the row out of the tree.
    let mut c = ValueSegment::new();
    c.append(1);
    c.append(2);
    let mut d = ValueSegment::new();
    d.append(ScalarValue::Null);
    d.append(5);
    let index = BTreeIndex::build(vec![c.into_shared(), d.into_shared()]).unwrap();
    assert_eq!(index.null_iter().collect::<Vec<_>>(), vec![0]);
    assert_eq!(index.iter().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn text_keys_scan_in_lexicographic_order() {
    let segment = ValueSegment::from_values(["pear", "apple", "plum", "banana"]);
    let index = BTreeIndex::build(vec![segment.into_shared()]).unwrap();

    assert_eq!(index.iter().collect::<Vec<_>>(), vec![1, 3, 0, 2]);
    let mut it = index.lower_bound(&[ScalarValue::Text("pe".into())]);
    assert_eq!(it.next(), Some(0));
}

#[test]
fn large_build_spans_many_nodes() {
    let values: Vec<i64> = (0..500).map(|i| (i * 17) % 251).collect();
    let index = int_index(&values);

    let offsets: Vec<_> = index.iter().collect();
    assert_eq!(offsets.len(), 500);
    let mut sorted: Vec<(i64, u32)> = values
        .iter()
        .enumerate()
        .map(|(pos, &v)| (v, pos as u32))
        .collect();
    sorted.sort();
    let expected: Vec<u32> = sorted.iter().map(|&(_, pos)| pos).collect();
    assert_eq!(offsets, expected);

    index.integrity_check().unwrap();
}

#[test]
fn surface_accessors() {
    let index = int_index(&[1, 2, 3]);
    assert_eq!(index.index_type(), ChunkIndexType::BTree);
    assert_eq!(index.indexed_segments().len(), 1);
}

#[test]
fn memory_reporting_is_positive_and_scales() {
    let small = BTreeIndex::estimate_memory_consumption(10, 5, 4);
    let large = BTreeIndex::estimate_memory_consumption(10_000, 5_000, 4);
    assert!(small > 0);
    assert!(large > small);

    let index = int_index(&[5, 3, 8, 1]);
    assert!(index.memory_consumption() > 0);
}
