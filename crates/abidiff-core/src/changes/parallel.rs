//! Sharded comparison of common classes on the rayon pool.
//!
//! Each shard owns its collector; shards only ever write entries for their
//! own classes, and [`ChangesCollector::merge`] is a plain union, so the
//! merged result equals the sequential one.

use crate::changes::change_set::ChangesCollector;
use crate::changes::computer::collect_class_changes;
use crate::errors::{AbiDiffError, Result};
use crate::snapshot::ClassSnapshot;
use rayon::prelude::*;

/// Compare every `(current, previous)` pair in parallel and merge the shard
/// collectors.
///
/// # Errors
///
/// - `ClassIdMismatch`: a pair holds snapshots of different classes
pub(crate) fn collect_common_parallel(
    common: &[(&ClassSnapshot, &ClassSnapshot)],
) -> Result<ChangesCollector> {
    common
        .par_iter()
        .try_fold(ChangesCollector::new, |mut shard, (current, previous)| {
            collect_class_changes(current, previous, &mut shard)?;
            Ok::<_, AbiDiffError>(shard)
        })
        .try_reduce(ChangesCollector::new, |left, right| Ok(left.merge(right)))
}
