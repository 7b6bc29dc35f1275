//! abidiff core - binary-interface change computation for incremental builds
//!
//! Given the class snapshots of a previous and a current build, this crate
//! computes the set of binary-interface changes that must trigger
//! recompilation of dependent sources:
//! - Class snapshot data model and snapshot-set JSON documents
//! - Single-use change collector with whole-class subsumption
//! - Sequential and rayon-sharded change computation
//! - Structured error and logging facilities
//! - Markdown summaries for build logs

pub mod changes;
pub mod errors;
pub mod logging_facility;
pub mod snapshot;

// Re-export commonly used types
pub use changes::{compute, compute_parallel, compute_with_options, ChangeSet, ComputeOptions};
pub use errors::{AbiDiffError, ExError, ExErrorKind, Result};
pub use snapshot::{AbiHash, ClassId, ClassSnapshot, MemberSnapshot, SnapshotSet};
