//! Change computation between two class snapshot collections.
//!
//! The entry points are [`compute`], [`compute_parallel`] and
//! [`compute_with_options`]. All three return the same [`ChangeSet`] for the
//! same input; they differ only in how the common classes are walked.
//!
//! Reporting is deliberately over-approximate:
//!
//! - An added or removed class is a whole-class change. A new class can
//!   change what an ambiguous (wildcard-imported) name resolves to, even
//!   though nothing about the class "changed".
//! - A class whose own shape changed is a whole-class change; its members are
//!   not diffed.
//! - Members are matched by ABI hash, not by name. A modified member shows up
//!   once as added and once as removed; a renamed member reports both names.
//! - Any added or removed member also reports
//!   [`RESOLUTION_SURFACE_MARKER`] for the class, since a new overload can
//!   change which member a call site resolves to.
//!
//! Members are keyed by hash alone. Two distinct members sharing a hash are
//! indistinguishable here; upstream hashing is trusted not to collide.

use crate::changes::change_set::{ChangeSet, ChangesCollector, RESOLUTION_SURFACE_MARKER};
use crate::changes::parallel::collect_common_parallel;
use crate::errors::{AbiDiffError, Result};
use crate::snapshot::{AbiHash, ClassId, ClassSnapshot, MemberSnapshot};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::HashMap;

/// Default common-class count from which parallel sharding pays off.
pub const DEFAULT_PARALLEL_MIN_CLASSES: usize = 256;

/// Which input collection a class came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Current,
    Previous,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Current => "current",
            Side::Previous => "previous",
        }
    }
}

/// Tuning for [`compute_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeOptions {
    /// Shard common-class comparison across the rayon pool.
    pub parallel: bool,
    /// Below this many common classes the sequential path is used even when
    /// `parallel` is set.
    pub parallel_min_classes: usize,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_min_classes: DEFAULT_PARALLEL_MIN_CLASSES,
        }
    }
}

impl ComputeOptions {
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Always shard, regardless of input size.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            parallel_min_classes: 0,
        }
    }
}

/// Classes of both builds split into added, removed and common.
pub(crate) struct ClassPartition<'a> {
    pub added: Vec<&'a ClassId>,
    pub removed: Vec<&'a ClassId>,
    /// `(current, previous)` snapshot pairs of classes present in both builds
    pub common: Vec<(&'a ClassSnapshot, &'a ClassSnapshot)>,
}

/// Compute the [`ChangeSet`] between two builds on the calling thread.
///
/// # Errors
///
/// - `DuplicateClass`: either collection contains a class more than once
pub fn compute(current: &[ClassSnapshot], previous: &[ClassSnapshot]) -> Result<ChangeSet> {
    compute_with_options(current, previous, &ComputeOptions::sequential())
}

/// Compute the [`ChangeSet`] between two builds, comparing common classes on
/// the rayon pool with one collector per shard.
///
/// # Errors
///
/// - `DuplicateClass`: either collection contains a class more than once
pub fn compute_parallel(
    current: &[ClassSnapshot],
    previous: &[ClassSnapshot],
) -> Result<ChangeSet> {
    compute_with_options(current, previous, &ComputeOptions::parallel())
}

/// Compute the [`ChangeSet`] between two builds.
///
/// Either the whole change set is returned or an error; there is no partial
/// result.
///
/// # Errors
///
/// - `DuplicateClass`: either collection contains a class more than once
pub fn compute_with_options(
    current: &[ClassSnapshot],
    previous: &[ClassSnapshot],
    options: &ComputeOptions,
) -> Result<ChangeSet> {
    log_op_start!(
        "compute_changes",
        current_len = current.len(),
        previous_len = previous.len(),
        parallel = options.parallel
    );
    let start = std::time::Instant::now();

    let changes = compute_impl(current, previous, options).map_err(|e| {
        log_op_error!(
            "compute_changes",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "compute_changes",
        duration_ms = start.elapsed().as_millis() as u64,
        changed_classes = changes.changed_classes().len(),
        changed_member_classes = changes.changed_class_members().len()
    );

    Ok(changes)
}

fn compute_impl(
    current: &[ClassSnapshot],
    previous: &[ClassSnapshot],
    options: &ComputeOptions,
) -> Result<ChangeSet> {
    let partition = partition_classes(current, previous)?;

    let mut changes = ChangesCollector::new();
    changes.add_changed_classes(partition.added.iter().copied());
    changes.add_changed_classes(partition.removed.iter().copied());

    let shard_common =
        options.parallel && partition.common.len() >= options.parallel_min_classes;
    tracing::debug!(
        added = partition.added.len(),
        removed = partition.removed.len(),
        common = partition.common.len(),
        sharded = shard_common,
        "partitioned classes"
    );

    if shard_common {
        changes = changes.merge(collect_common_parallel(&partition.common)?);
    } else {
        for (current_class, previous_class) in &partition.common {
            collect_class_changes(current_class, previous_class, &mut changes)?;
        }
    }

    Ok(changes.finish())
}

/// Index both collections and split their classes into added, removed and
/// common.
pub(crate) fn partition_classes<'a>(
    current: &'a [ClassSnapshot],
    previous: &'a [ClassSnapshot],
) -> Result<ClassPartition<'a>> {
    let current_classes = index_by_class_id(current, Side::Current)?;
    let previous_classes = index_by_class_id(previous, Side::Previous)?;

    let mut added = Vec::new();
    let mut common = Vec::new();
    for (class_id, current_class) in &current_classes {
        match previous_classes.get(class_id) {
            Some(previous_class) => common.push((*current_class, *previous_class)),
            None => added.push(*class_id),
        }
    }
    let removed = previous_classes
        .keys()
        .filter(|class_id| !current_classes.contains_key(*class_id))
        .copied()
        .collect();

    Ok(ClassPartition {
        added,
        removed,
        common,
    })
}

fn index_by_class_id(
    snapshots: &[ClassSnapshot],
    side: Side,
) -> Result<HashMap<&ClassId, &ClassSnapshot>> {
    let mut index = HashMap::with_capacity(snapshots.len());
    for snapshot in snapshots {
        if index.insert(&snapshot.class_id, snapshot).is_some() {
            return Err(AbiDiffError::DuplicateClass {
                class_id: snapshot.class_id.to_string(),
                side: side.as_str().to_string(),
            });
        }
    }
    Ok(index)
}

/// Collect changes between two snapshots of the same class.
///
/// # Errors
///
/// - `ClassIdMismatch`: the snapshots belong to different classes
pub fn collect_class_changes(
    current: &ClassSnapshot,
    previous: &ClassSnapshot,
    changes: &mut ChangesCollector,
) -> Result<()> {
    if current.class_id != previous.class_id {
        return Err(AbiDiffError::ClassIdMismatch {
            current: current.class_id.to_string(),
            previous: previous.class_id.to_string(),
        });
    }
    let class_id = &current.class_id;

    if current.shape_hash != previous.shape_hash {
        tracing::debug!(class_id = %class_id, "class shape changed");
        changes.add_changed_class(class_id);
    } else {
        collect_member_changes(class_id, &current.fields, &previous.fields, changes);
        collect_member_changes(class_id, &current.methods, &previous.methods, changes);
    }
    Ok(())
}

/// Collect changes between two member lists (fields or methods) of one class.
///
/// The same name may be reported more than once (overloads, or a modified
/// member appearing as both added and removed); the collector deduplicates.
pub fn collect_member_changes(
    class_id: &ClassId,
    current_members: &[MemberSnapshot],
    previous_members: &[MemberSnapshot],
    changes: &mut ChangesCollector,
) {
    let current_by_hash = index_by_abi_hash(current_members);
    let previous_by_hash = index_by_abi_hash(previous_members);

    let added: Vec<&str> = current_by_hash
        .iter()
        .filter(|(hash, _)| !previous_by_hash.contains_key(*hash))
        .map(|(_, member)| member.name.as_str())
        .collect();
    let removed: Vec<&str> = previous_by_hash
        .iter()
        .filter(|(hash, _)| !current_by_hash.contains_key(*hash))
        .map(|(_, member)| member.name.as_str())
        .collect();

    if added.is_empty() && removed.is_empty() {
        return;
    }

    tracing::trace!(
        class_id = %class_id,
        added = added.len(),
        removed = removed.len(),
        "member set changed"
    );
    changes.add_changed_class_members(class_id, added);
    changes.add_changed_class_members(class_id, removed);

    // TODO: narrow this to member sets that can actually affect conversion
    // lookup once the downstream tracker can tell those apart.
    changes.add_changed_class_member(class_id, RESOLUTION_SURFACE_MARKER);
}

/// Later members win on a repeated hash.
fn index_by_abi_hash(members: &[MemberSnapshot]) -> HashMap<AbiHash, &MemberSnapshot> {
    members
        .iter()
        .map(|member| (member.abi_hash, member))
        .collect()
}
