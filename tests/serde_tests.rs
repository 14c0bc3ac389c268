#![cfg(feature = "serde")]

//! Serde integration tests for TreeVector.
//!
//! The vector serializes as a plain sequence, so any format that handles
//! `Vec<T>` handles `TreeVector<T>` the same way.

use rstest::rstest;
use treevec::TreeVector;

#[rstest]
fn test_json_round_trip() {
    let vector: TreeVector<i32> = (1..=100).collect();
    let json = serde_json::to_string(&vector).unwrap();
    let restored: TreeVector<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(vector, restored);
    assert_eq!(restored.height(), vector.height());
}

#[rstest]
fn test_serializes_as_plain_sequence() {
    let vector: TreeVector<i32> = (1..=4).collect();
    assert_eq!(serde_json::to_string(&vector).unwrap(), "[1,2,3,4]");

    let empty: TreeVector<i32> = TreeVector::new();
    assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");
}

#[rstest]
fn test_deserializes_from_plain_sequence() {
    let vector: TreeVector<i32> = serde_json::from_str("[5,6,7]").unwrap();
    assert_eq!(vector.len(), 3);
    assert_eq!(vector[0], 5);
    assert_eq!(vector[2], 7);
}

#[rstest]
fn test_round_trip_across_height_boundary() {
    let vector: TreeVector<i32> = (0..1025).collect();
    let json = serde_json::to_string(&vector).unwrap();
    let restored: TreeVector<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 1025);
    assert_eq!(restored.height(), 3);
    assert_eq!(vector, restored);
}

#[rstest]
fn test_nested_structures() {
    let inner_first: TreeVector<i32> = (1..=3).collect();
    let inner_second: TreeVector<i32> = (4..=6).collect();
    let outer: TreeVector<TreeVector<i32>> =
        vec![inner_first, inner_second].into_iter().collect();

    let json = serde_json::to_string(&outer).unwrap();
    let restored: TreeVector<TreeVector<i32>> = serde_json::from_str(&json).unwrap();

    assert_eq!(outer.len(), restored.len());
    for (original, recovered) in outer.iter().zip(restored.iter()) {
        assert_eq!(original, recovered);
    }
}

#[rstest]
fn test_string_elements() {
    let vector: TreeVector<String> = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(String::from)
        .collect();
    let json = serde_json::to_string(&vector).unwrap();
    let restored: TreeVector<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(vector, restored);
}
