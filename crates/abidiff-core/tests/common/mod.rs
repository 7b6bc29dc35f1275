use abidiff_core::changes::RESOLUTION_SURFACE_MARKER;
use abidiff_core::{ClassId, ClassSnapshot};
use std::collections::BTreeSet;

/// Shorthand for a class id
#[allow(dead_code)]
pub fn id(name: &str) -> ClassId {
    ClassId::new(name)
}

/// Class with the given shape hash and methods `(name, hash)`
#[allow(dead_code)]
pub fn class_with_methods(name: &str, shape_hash: u64, methods: &[(&str, u64)]) -> ClassSnapshot {
    methods
        .iter()
        .fold(ClassSnapshot::new(name, shape_hash), |class, (m, h)| {
            class.with_method(*m, *h)
        })
}

/// Class with the given shape hash and fields `(name, hash)`
#[allow(dead_code)]
pub fn class_with_fields(name: &str, shape_hash: u64, fields: &[(&str, u64)]) -> ClassSnapshot {
    fields
        .iter()
        .fold(ClassSnapshot::new(name, shape_hash), |class, (f, h)| {
            class.with_field(*f, *h)
        })
}

/// Expected member-name set, with the resolution marker appended
#[allow(dead_code)]
pub fn members_with_marker(names: &[&str]) -> BTreeSet<String> {
    names
        .iter()
        .copied()
        .chain(std::iter::once(RESOLUTION_SURFACE_MARKER))
        .map(String::from)
        .collect()
}

/// A small but varied build: a few classes with fields and overloads
#[allow(dead_code)]
pub fn sample_build() -> Vec<ClassSnapshot> {
    vec![
        class_with_methods("com/example/A", 0x10, &[("run", 0x1), ("run", 0x2), ("stop", 0x3)])
            .with_field("count", 0x4),
        class_with_methods("com/example/B", 0x20, &[("apply", 0x5)]),
        class_with_fields("com/example/C", 0x30, &[("x", 0x6), ("y", 0x7)]),
        ClassSnapshot::new("com/example/Empty", 0x40),
    ]
}
