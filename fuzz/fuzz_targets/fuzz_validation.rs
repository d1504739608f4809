//! Fuzz testing for the validation surface.
//!
//! Drives arbitrary sequences of validation and key operations through
//! the index and asserts that the structural invariants and the counter
//! identity survive every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use veridex::{BTreeIndex, DependencyType, ScalarValue, ValueSegment};

#[derive(Debug, Arbitrary)]
struct ValidationInput {
    seed: Vec<i8>,
    od: bool,
    operations: Vec<Operation>,
}

#[derive(Debug, Arbitrary)]
enum Operation {
    InsertEntry { lhs: i8, rhs: i8 },
    DeleteEntry { lhs: i8, rhs: i8 },
    UpdateEntry { lhs: i8, old: i8, new: i8 },
    InsertKey { key: i8 },
    RemoveKey { key: i8 },
}

fn key(v: i8) -> Vec<ScalarValue> {
    vec![ScalarValue::Int(v as i64)]
}

fuzz_target!(|input: ValidationInput| {
    if input.seed.len() > 256 || input.operations.len() > 256 {
        return;
    }

    let dep = if input.od {
        DependencyType::Od
    } else {
        DependencyType::Fd
    };

    let segment = ValueSegment::from_values(input.seed.iter().map(|&v| v as i64));
    let mut index = match BTreeIndex::build(vec![segment.into_shared()]) {
        Ok(index) => index,
        Err(_) => return,
    };

    for op in &input.operations {
        match *op {
            Operation::InsertEntry { lhs, rhs } => {
                index.insert_entry_for_validation(&key(lhs), &key(rhs), dep);
            }
            Operation::DeleteEntry { lhs, rhs } => {
                index.delete_entry_for_validation(&key(lhs), &key(rhs), dep);
            }
            Operation::UpdateEntry { lhs, old, new } => {
                index.update_entry_for_validation(&key(lhs), &key(old), &key(new), dep);
            }
            Operation::InsertKey { key: k } => {
                index.insert_key(&key(k));
            }
            Operation::RemoveKey { key: k } => {
                index.remove_key(&key(k));
            }
        }
        index.integrity_check().unwrap();
    }
});
