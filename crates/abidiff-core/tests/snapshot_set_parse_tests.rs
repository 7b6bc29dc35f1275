//! Snapshot-set document parsing.

use abidiff_core::errors::{AbiDiffError, ExError, ExErrorKind};
use abidiff_core::snapshot::{parse_snapshot_set_bytes, SnapshotSet, SNAPSHOT_SCHEMA_VERSION};
use abidiff_core::{AbiHash, ClassId, ClassSnapshot};
use serde_json::json;

fn to_bytes(v: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(v).unwrap()
}

#[test]
fn test_parse_valid_set() {
    let doc = json!({
        "snapshot_schema_version": 1,
        "classes": [
            {"class_id": "com/example/A", "shape_hash": 17,
             "fields": [{"name": "x", "abi_hash": 1}],
             "methods": [{"name": "run", "abi_hash": 42}, {"name": "run", "abi_hash": 43}]},
            {"class_id": "com/example/B", "shape_hash": 18}
        ]
    });

    let set = parse_snapshot_set_bytes(&to_bytes(&doc)).unwrap();
    assert_eq!(set.snapshot_schema_version, SNAPSHOT_SCHEMA_VERSION);
    assert_eq!(set.classes.len(), 2);
    assert_eq!(set.classes[0].class_id, ClassId::new("com/example/A"));
    assert_eq!(set.classes[0].methods[1].abi_hash, AbiHash::new(43));
    assert!(set.classes[1].methods.is_empty());
}

#[test]
fn test_parse_accepts_full_u64_hashes() {
    let doc = json!({
        "snapshot_schema_version": 1,
        "classes": [{"class_id": "p/A", "shape_hash": u64::MAX}]
    });
    let set = parse_snapshot_set_bytes(&to_bytes(&doc)).unwrap();
    assert_eq!(set.classes[0].shape_hash.get(), u64::MAX);
}

#[test]
fn test_parse_rejects_non_utf8() {
    let err = parse_snapshot_set_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidSnapshotSet);
    assert!(ex_err.message().contains("UTF-8"));
}

#[test]
fn test_parse_rejects_invalid_json() {
    let err = parse_snapshot_set_bytes(b"{not json").unwrap_err();
    assert!(matches!(err, AbiDiffError::InvalidSnapshotSet { ref reason } if reason.contains("JSON")));
}

#[test]
fn test_parse_rejects_non_object_root() {
    let err = parse_snapshot_set_bytes(b"[]").unwrap_err();
    assert!(matches!(err, AbiDiffError::InvalidSnapshotSet { ref reason } if reason.contains("object")));
}

#[test]
fn test_parse_requires_schema_version() {
    let err = parse_snapshot_set_bytes(&to_bytes(&json!({"classes": []}))).unwrap_err();
    assert_eq!(
        err,
        AbiDiffError::MissingField {
            field: "snapshot_schema_version".to_string()
        }
    );
}

#[test]
fn test_parse_rejects_string_schema_version() {
    let doc = json!({"snapshot_schema_version": "1", "classes": []});
    let err = parse_snapshot_set_bytes(&to_bytes(&doc)).unwrap_err();
    assert!(matches!(err, AbiDiffError::InvalidSnapshotSet { ref reason } if reason.contains("unsigned integer")));
}

#[test]
fn test_parse_requires_classes() {
    let doc = json!({"snapshot_schema_version": 1});
    let err = parse_snapshot_set_bytes(&to_bytes(&doc)).unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.code(), "ERR_MISSING_FIELD");
}

#[test]
fn test_parse_rejects_bad_member_shape() {
    let doc = json!({
        "snapshot_schema_version": 1,
        "classes": [{"class_id": "p/A", "shape_hash": 1, "methods": [{"name": "m"}]}]
    });
    let err = parse_snapshot_set_bytes(&to_bytes(&doc)).unwrap_err();
    assert!(matches!(err, AbiDiffError::InvalidSnapshotSet { ref reason } if reason.contains("abi_hash")));
}

#[test]
fn test_parse_keeps_duplicates_for_compute_to_reject() {
    let set = SnapshotSet::new(vec![ClassSnapshot::new("p/A", 1), ClassSnapshot::new("p/A", 2)]);
    let parsed = parse_snapshot_set_bytes(&set.to_json_bytes().unwrap()).unwrap();
    assert_eq!(parsed.classes.len(), 2);
    assert!(abidiff_core::compute(&parsed.classes, &[]).is_err());
}
