//! Change-set output type and its single-use collector.
//!
//! Collections use `BTreeSet`/`BTreeMap` for deterministic serialization.

use crate::snapshot::ClassId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Reserved member name reported whenever a class's member set gains or
/// loses a member.
///
/// It stands for the class's overload/conversion resolution surface: call
/// sites that resolve a function-value conversion by looking members up by
/// name must be invalidated even when the converted member itself is
/// untouched. Angle brackets cannot occur in a JVM member identifier, so the
/// token never collides with a real member name. Downstream consumers may
/// match on it.
pub const RESOLUTION_SURFACE_MARKER: &str = "<SAM-CONSTRUCTOR>";

/// True if `member_name` is [`RESOLUTION_SURFACE_MARKER`].
pub fn is_resolution_surface_marker(member_name: &str) -> bool {
    member_name == RESOLUTION_SURFACE_MARKER
}

/// Binary-interface changes between two builds.
///
/// A class appears either in `changed_classes` (its whole interface changed)
/// or as a key of `changed_class_members` (only the listed members changed),
/// never both. A class that appears nowhere is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChangeSetRepr")]
pub struct ChangeSet {
    changed_classes: BTreeSet<ClassId>,
    changed_class_members: BTreeMap<ClassId, BTreeSet<String>>,
}

/// Wire form accepted on deserialize; normalized through [`ChangeSet::new`].
#[derive(Deserialize)]
struct ChangeSetRepr {
    #[serde(default)]
    changed_classes: BTreeSet<ClassId>,
    #[serde(default)]
    changed_class_members: BTreeMap<ClassId, BTreeSet<String>>,
}

impl From<ChangeSetRepr> for ChangeSet {
    fn from(repr: ChangeSetRepr) -> Self {
        ChangeSet::new(repr.changed_classes, repr.changed_class_members)
    }
}

impl ChangeSet {
    /// Build a change set, dropping member entries for wholly changed
    /// classes and empty member sets.
    pub fn new(
        changed_classes: BTreeSet<ClassId>,
        mut changed_class_members: BTreeMap<ClassId, BTreeSet<String>>,
    ) -> Self {
        changed_class_members
            .retain(|class_id, members| !members.is_empty() && !changed_classes.contains(class_id));
        Self {
            changed_classes,
            changed_class_members,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Classes whose binary interface changed as a whole.
    pub fn changed_classes(&self) -> &BTreeSet<ClassId> {
        &self.changed_classes
    }

    /// Partially changed classes and their changed member names.
    pub fn changed_class_members(&self) -> &BTreeMap<ClassId, BTreeSet<String>> {
        &self.changed_class_members
    }

    pub fn is_class_changed(&self, class_id: &ClassId) -> bool {
        self.changed_classes.contains(class_id)
    }

    /// Changed member names of a partially changed class.
    ///
    /// `None` for wholly changed and for unchanged classes.
    pub fn changed_members_of(&self, class_id: &ClassId) -> Option<&BTreeSet<String>> {
        self.changed_class_members.get(class_id)
    }

    /// No entry anywhere: dependents of this class need not be recompiled.
    pub fn is_unchanged(&self, class_id: &ClassId) -> bool {
        !self.changed_classes.contains(class_id)
            && !self.changed_class_members.contains_key(class_id)
    }

    pub fn is_empty(&self) -> bool {
        self.changed_classes.is_empty() && self.changed_class_members.is_empty()
    }

    /// Total member names across all partially changed classes, markers included.
    pub fn changed_member_count(&self) -> usize {
        self.changed_class_members.values().map(BTreeSet::len).sum()
    }
}

/// Accumulates changes during one computation, then yields a [`ChangeSet`].
///
/// Insertion never checks the whole-class/member invariant; [`finish`]
/// applies it once. `finish` consumes the collector, so it cannot be
/// finalized twice or mutated afterwards.
///
/// [`finish`]: ChangesCollector::finish
#[derive(Debug, Default)]
pub struct ChangesCollector {
    changed_classes: HashSet<ClassId>,
    changed_class_members: HashMap<ClassId, HashSet<String>>,
}

impl ChangesCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `class_id` as wholly changed. Idempotent.
    pub fn add_changed_class(&mut self, class_id: &ClassId) {
        if !self.changed_classes.contains(class_id) {
            self.changed_classes.insert(class_id.clone());
        }
    }

    pub fn add_changed_classes<'a, I>(&mut self, class_ids: I)
    where
        I: IntoIterator<Item = &'a ClassId>,
    {
        for class_id in class_ids {
            self.add_changed_class(class_id);
        }
    }

    /// Record one changed member of `class_id`.
    pub fn add_changed_class_member(&mut self, class_id: &ClassId, member_name: impl Into<String>) {
        self.member_entry(class_id).insert(member_name.into());
    }

    /// Record a batch of changed members. An empty batch records nothing.
    pub fn add_changed_class_members<I, S>(&mut self, class_id: &ClassId, member_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut member_names = member_names.into_iter().peekable();
        if member_names.peek().is_none() {
            return;
        }
        self.member_entry(class_id).extend(member_names.map(Into::into));
    }

    /// Union another collector into this one.
    ///
    /// Subsumption is applied at [`finish`](Self::finish), so the result does
    /// not depend on merge order.
    pub fn merge(mut self, other: ChangesCollector) -> Self {
        self.changed_classes.extend(other.changed_classes);
        for (class_id, members) in other.changed_class_members {
            self.changed_class_members
                .entry(class_id)
                .or_default()
                .extend(members);
        }
        self
    }

    /// Finalize into an immutable [`ChangeSet`].
    pub fn finish(self) -> ChangeSet {
        let changed_classes: BTreeSet<ClassId> = self.changed_classes.into_iter().collect();
        let changed_class_members: BTreeMap<ClassId, BTreeSet<String>> = self
            .changed_class_members
            .into_iter()
            .map(|(class_id, members)| (class_id, members.into_iter().collect()))
            .collect();
        ChangeSet::new(changed_classes, changed_class_members)
    }

    fn member_entry(&mut self, class_id: &ClassId) -> &mut HashSet<String> {
        self.changed_class_members
            .entry(class_id.clone())
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ClassId {
        ClassId::new(s)
    }

    #[test]
    fn test_whole_class_change_subsumes_members() {
        let mut collector = ChangesCollector::new();
        collector.add_changed_class_member(&id("p/A"), "foo");
        collector.add_changed_class(&id("p/A"));
        collector.add_changed_class_member(&id("p/A"), "bar");

        let changes = collector.finish();
        assert!(changes.is_class_changed(&id("p/A")));
        assert!(changes.changed_members_of(&id("p/A")).is_none());
        assert!(changes.changed_class_members().is_empty());
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut collector = ChangesCollector::new();
        collector.add_changed_class_members(&id("p/A"), Vec::<String>::new());
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_deserialize_normalizes_overlap() {
        let changes: ChangeSet = serde_json::from_value(serde_json::json!({
            "changed_classes": ["p/A"],
            "changed_class_members": {"p/A": ["foo"], "p/B": [], "p/C": ["bar"]}
        }))
        .unwrap();
        assert!(changes.changed_members_of(&id("p/A")).is_none());
        assert!(changes.is_unchanged(&id("p/B")));
        assert_eq!(changes.changed_member_count(), 1);
    }

    #[test]
    fn test_marker_is_not_a_jvm_identifier() {
        assert!(is_resolution_surface_marker("<SAM-CONSTRUCTOR>"));
        assert!(!is_resolution_surface_marker("SAM"));
        assert!(RESOLUTION_SURFACE_MARKER.starts_with('<'));
    }
}
