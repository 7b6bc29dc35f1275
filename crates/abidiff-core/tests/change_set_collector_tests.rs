//! Collector accumulation and finalization.

mod common;

use abidiff_core::changes::{ChangeSet, ChangesCollector, RESOLUTION_SURFACE_MARKER};
use common::id;
use std::collections::{BTreeMap, BTreeSet};

#[test]
fn test_add_changed_class_is_idempotent() {
    let mut collector = ChangesCollector::new();
    collector.add_changed_class(&id("p/A"));
    collector.add_changed_class(&id("p/A"));

    let changes = collector.finish();
    assert_eq!(changes.changed_classes().len(), 1);
}

#[test]
fn test_member_names_deduplicated() {
    let mut collector = ChangesCollector::new();
    collector.add_changed_class_member(&id("p/A"), "foo");
    collector.add_changed_class_members(&id("p/A"), ["foo", "bar"]);
    collector.add_changed_class_members(&id("p/A"), vec!["foo".to_string()]);

    let changes = collector.finish();
    let expected: BTreeSet<String> = ["bar", "foo"].iter().map(|s| s.to_string()).collect();
    assert_eq!(changes.changed_members_of(&id("p/A")), Some(&expected));
    assert_eq!(changes.changed_member_count(), 2);
}

#[test]
fn test_batch_equals_repeated_single_calls() {
    let mut batched = ChangesCollector::new();
    batched.add_changed_class_members(&id("p/A"), ["x", "y", RESOLUTION_SURFACE_MARKER]);

    let mut single = ChangesCollector::new();
    single.add_changed_class_member(&id("p/A"), "x");
    single.add_changed_class_member(&id("p/A"), "y");
    single.add_changed_class_member(&id("p/A"), RESOLUTION_SURFACE_MARKER);

    assert_eq!(batched.finish(), single.finish());
}

#[test]
fn test_empty_batch_creates_no_entry() {
    let mut collector = ChangesCollector::new();
    collector.add_changed_class_members(&id("p/A"), std::iter::empty::<&str>());

    let changes = collector.finish();
    assert!(changes.is_unchanged(&id("p/A")));
    assert!(changes.is_empty());
}

#[test]
fn test_subsumption_independent_of_insertion_order() {
    let mut members_first = ChangesCollector::new();
    members_first.add_changed_class_member(&id("p/A"), "foo");
    members_first.add_changed_class(&id("p/A"));

    let mut class_first = ChangesCollector::new();
    class_first.add_changed_class(&id("p/A"));
    class_first.add_changed_class_member(&id("p/A"), "foo");

    let a = members_first.finish();
    let b = class_first.finish();
    assert_eq!(a, b);
    assert!(a.is_class_changed(&id("p/A")));
    assert!(a.changed_members_of(&id("p/A")).is_none());
}

#[test]
fn test_merge_applies_subsumption_across_shards() {
    let mut left = ChangesCollector::new();
    left.add_changed_class_member(&id("p/A"), "foo");
    left.add_changed_class_member(&id("p/B"), "bar");

    let mut right = ChangesCollector::new();
    right.add_changed_class(&id("p/A"));
    right.add_changed_class_member(&id("p/B"), "baz");

    let changes = left.merge(right).finish();
    assert!(changes.is_class_changed(&id("p/A")));
    assert!(changes.changed_members_of(&id("p/A")).is_none());
    let expected: BTreeSet<String> = ["bar", "baz"].iter().map(|s| s.to_string()).collect();
    assert_eq!(changes.changed_members_of(&id("p/B")), Some(&expected));
}

#[test]
fn test_merge_is_commutative() {
    let build = |class: &str, member: &str| {
        let mut c = ChangesCollector::new();
        c.add_changed_class_member(&id(class), member);
        c
    };
    let mut whole = ChangesCollector::new();
    whole.add_changed_class(&id("p/B"));

    let ab = build("p/A", "x").merge(build("p/B", "y")).merge(whole);
    let mut whole = ChangesCollector::new();
    whole.add_changed_class(&id("p/B"));
    let ba = whole.merge(build("p/B", "y")).merge(build("p/A", "x"));

    assert_eq!(ab.finish(), ba.finish());
}

#[test]
fn test_change_set_new_enforces_invariant() {
    let classes: BTreeSet<_> = [id("p/A")].into_iter().collect();
    let mut members = BTreeMap::new();
    members.insert(id("p/A"), ["foo".to_string()].into_iter().collect());
    members.insert(id("p/B"), BTreeSet::new());

    let changes = ChangeSet::new(classes, members);
    assert!(changes.changed_class_members().is_empty());
    assert!(changes.is_unchanged(&id("p/B")));
}

#[test]
fn test_change_set_json_shape() {
    let mut collector = ChangesCollector::new();
    collector.add_changed_class(&id("p/Whole"));
    collector.add_changed_class_members(&id("p/Part"), ["foo", RESOLUTION_SURFACE_MARKER]);

    let json = serde_json::to_value(collector.finish()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "changed_classes": ["p/Whole"],
            "changed_class_members": {"p/Part": ["<SAM-CONSTRUCTOR>", "foo"]}
        })
    );

    let back: ChangeSet = serde_json::from_value(json).unwrap();
    assert!(back.is_class_changed(&id("p/Whole")));
}
