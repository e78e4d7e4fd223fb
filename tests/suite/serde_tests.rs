//! Serialized forms of index strings, shapes and extents.

use cubek_ttl::shape::{DYNAMIC, Extents, Shape};
use cubek_ttl::{IndexString, Tensor};
use pretty_assertions::assert_eq;

#[test]
fn test_index_string_as_text() {
    let s = IndexString::new("ij*j");
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, "\"ij*j\"");
    assert_eq!(serde_json::from_str::<IndexString>(&json).unwrap(), s);
}

#[test]
fn test_index_string_rejects_invalid_text() {
    assert!(serde_json::from_str::<IndexString>("\"iii\"").is_err());
    assert!(serde_json::from_str::<IndexString>("\"i,j\"").is_err());
    let long = format!("\"{}\"", "ab".repeat(20));
    assert!(serde_json::from_str::<IndexString>(&long).is_err());
}

#[test]
fn test_index_string_rejects_raw_layout() {
    let raw = r#"{"symbols":[105,105,105,0,0,0,0,0,0,0,0,0,0,0,0,0],"len":40}"#;
    assert!(serde_json::from_str::<IndexString>(raw).is_err());
}

#[test]
fn test_shape_marks_dynamic_axes_null() {
    let shape = Shape::new(&[2, DYNAMIC, 4]);
    let json = serde_json::to_string(&shape).unwrap();
    assert_eq!(json, "[2,null,4]");
    assert_eq!(serde_json::from_str::<Shape>(&json).unwrap(), shape);
}

#[test]
fn test_shape_rejects_excess_rank() {
    let json = serde_json::to_string(&vec![1usize; 17]).unwrap();
    let err = serde_json::from_str::<Shape>(&json).unwrap_err();
    assert!(err.to_string().contains("shape has 17 axes, maximum is 16"));
}

#[test]
fn test_extents_round_trip() {
    let a = [[0u8; 3]; 2];
    let extents = a.extents().concat(&Extents::dynamic(&[5]));
    let json = serde_json::to_string(&extents).unwrap();
    assert_eq!(json, r#"{"shape":[2,3,null],"values":[2,3,5]}"#);
    assert_eq!(serde_json::from_str::<Extents>(&json).unwrap(), extents);
}

#[test]
fn test_extents_reject_static_disagreement() {
    let err =
        serde_json::from_str::<Extents>(r#"{"shape":[2,3],"values":[2,5]}"#).unwrap_err();
    assert!(
        err.to_string()
            .contains("extent mismatch on axis 1: expected 3, got 5")
    );
}

#[test]
fn test_extents_reject_rank_disagreement() {
    let err = serde_json::from_str::<Extents>(r#"{"shape":[null],"values":[1,2]}"#).unwrap_err();
    assert!(
        err.to_string()
            .contains("rank mismatch: expected 1 axes, got 2")
    );
}
