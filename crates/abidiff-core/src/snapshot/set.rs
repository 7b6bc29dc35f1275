//! Snapshot-set documents.
//!
//! A snapshot set is the JSON form of one build's class snapshot
//! collection:
//!
//! ```json
//! {
//!   "snapshot_schema_version": 1,
//!   "classes": [
//!     { "class_id": "com/example/A", "shape_hash": 17,
//!       "fields": [], "methods": [{ "name": "run", "abi_hash": 42 }] }
//!   ]
//! }
//! ```
//!
//! Parsing does not check for duplicate classes; that is the change
//! computation's precondition and is reported there with the offending id.

use crate::errors::{AbiDiffError, Result};
use crate::snapshot::model::ClassSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only snapshot-set schema version this build reads and writes.
pub const SNAPSHOT_SCHEMA_VERSION: u64 = 1;

/// One build's collection of class snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSet {
    pub snapshot_schema_version: u64,
    pub classes: Vec<ClassSnapshot>,
}

impl SnapshotSet {
    pub fn new(classes: Vec<ClassSnapshot>) -> Self {
        Self {
            snapshot_schema_version: SNAPSHOT_SCHEMA_VERSION,
            classes,
        }
    }

    /// Serialize to pretty-printed JSON bytes.
    ///
    /// # Errors
    ///
    /// - `Serialization`: serde_json failed to encode the set
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// Parse raw snapshot-set bytes.
///
/// Validation is staged so the error names the first thing that is wrong
/// rather than a generic serde message.
///
/// # Errors
///
/// - `InvalidSnapshotSet`: bytes are not valid UTF-8 or JSON, the root is
///   not an object, or `snapshot_schema_version` is not a supported
///   unsigned integer
/// - `MissingField`: `snapshot_schema_version` or `classes` is absent
pub fn parse_snapshot_set_bytes(bytes: &[u8]) -> Result<SnapshotSet> {
    // 1. UTF-8 decode
    let text = std::str::from_utf8(bytes).map_err(|e| AbiDiffError::InvalidSnapshotSet {
        reason: format!("snapshot set is not valid UTF-8: {}", e),
    })?;

    // 2. JSON parse to generic Value
    let raw: Value = serde_json::from_str(text).map_err(|e| AbiDiffError::InvalidSnapshotSet {
        reason: format!("snapshot set is not valid JSON: {}", e),
    })?;

    let obj = raw
        .as_object()
        .ok_or_else(|| AbiDiffError::InvalidSnapshotSet {
            reason: "snapshot set JSON root must be an object".to_string(),
        })?;

    // 3. schema version must be present, unsigned and supported
    let version_key = "snapshot_schema_version";
    let version = obj.get(version_key).ok_or_else(|| AbiDiffError::MissingField {
        field: version_key.to_string(),
    })?;
    match version.as_u64() {
        Some(SNAPSHOT_SCHEMA_VERSION) => {}
        Some(other) => {
            return Err(AbiDiffError::InvalidSnapshotSet {
                reason: format!(
                    "unsupported `{}` {} (expected {})",
                    version_key, other, SNAPSHOT_SCHEMA_VERSION
                ),
            })
        }
        None => {
            return Err(AbiDiffError::InvalidSnapshotSet {
                reason: format!("`{}` must be an unsigned integer, got: {}", version_key, version),
            })
        }
    }

    // 4. classes must be present
    if !obj.contains_key("classes") {
        return Err(AbiDiffError::MissingField {
            field: "classes".to_string(),
        });
    }

    // 5. Full typed deserialisation
    serde_json::from_value(raw).map_err(|e| AbiDiffError::InvalidSnapshotSet {
        reason: format!("failed to deserialize snapshot set: {}", e),
    })
}
