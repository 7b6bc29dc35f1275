//! Binary-interface change computation.
//!
//! Compares the class snapshots of two builds and reports which classes,
//! or which members of which classes, changed in a way that can affect
//! dependent source files.
//!
//! ## Entry point
//!
//! ```
//! use abidiff_core::changes::compute;
//! use abidiff_core::snapshot::ClassSnapshot;
//!
//! let previous = vec![ClassSnapshot::new("com/example/C", 0).with_method("foo", 0xAA)];
//! let current = vec![ClassSnapshot::new("com/example/C", 0)
//!     .with_method("foo", 0xAA)
//!     .with_method("foo", 0xBB)];
//!
//! let changes = compute(&current, &previous).unwrap();
//! assert!(changes.changed_classes().is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O, no state between calls.
//! - **Determinism**: the [`ChangeSet`] is ordered, so equal inputs produce
//!   byte-identical JSON.
//! - **All or nothing**: malformed input fails the whole call.

pub mod change_set;
pub mod computer;
pub mod human_summary;
mod parallel;

pub use change_set::{
    is_resolution_surface_marker, ChangeSet, ChangesCollector, RESOLUTION_SURFACE_MARKER,
};
pub use computer::{
    collect_class_changes, collect_member_changes, compute, compute_parallel,
    compute_with_options, ComputeOptions, Side,
};
pub use human_summary::render_human_summary;
