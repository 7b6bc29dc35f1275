//! Class snapshot data model.
//!
//! A snapshot is the binary interface of one compiled class as seen by a
//! single build: a hash of the class's own shape plus one hash per field and
//! per method. Snapshots are produced upstream; this module only defines the
//! comparison surface and the JSON document that carries a collection of
//! them.

pub mod model;
pub mod set;

pub use model::{AbiHash, ClassId, ClassSnapshot, MemberSnapshot};
pub use set::{parse_snapshot_set_bytes, SnapshotSet, SNAPSHOT_SCHEMA_VERSION};
