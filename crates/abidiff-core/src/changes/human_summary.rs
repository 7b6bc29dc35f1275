//! Human-readable summary renderer for change sets.

use crate::changes::change_set::{is_resolution_surface_marker, ChangeSet};
use std::collections::BTreeMap;

/// Render a Markdown summary of a [`ChangeSet`].
///
/// Intended for build logs and review. Wholly changed classes are listed
/// per package. The reserved resolution marker is shown as a note on the
/// class rather than as a member.
pub fn render_human_summary(changes: &ChangeSet) -> String {
    let mut out = String::new();

    out.push_str("## ABI Changes\n\n");
    out.push_str(&format!(
        "**Changed classes**: {}  \n**Classes with changed members**: {}  \n**Changed members**: {}\n\n",
        changes.changed_classes().len(),
        changes.changed_class_members().len(),
        real_member_count(changes),
    ));

    if changes.is_empty() {
        out.push_str("_No ABI changes detected._\n");
        return out;
    }

    if !changes.changed_classes().is_empty() {
        out.push_str("### Changed Classes\n\n");
        let mut by_package: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for class_id in changes.changed_classes() {
            by_package
                .entry(class_id.package())
                .or_default()
                .push(class_id.simple_name());
        }
        for (package, names) in by_package {
            let rendered: Vec<String> = names.iter().map(|n| format!("`{}`", n)).collect();
            if package.is_empty() {
                out.push_str(&format!("- (default package): {}\n", rendered.join(", ")));
            } else {
                out.push_str(&format!("- `{}`: {}\n", package, rendered.join(", ")));
            }
        }
        out.push('\n');
    }

    if !changes.changed_class_members().is_empty() {
        out.push_str("### Changed Members\n\n");
        for (class_id, members) in changes.changed_class_members() {
            let names: Vec<&str> = members
                .iter()
                .map(String::as_str)
                .filter(|name| !is_resolution_surface_marker(name))
                .collect();
            let resolution_changed = members.len() != names.len();

            if names.is_empty() {
                out.push_str(&format!("- `{}`", class_id));
            } else {
                let rendered: Vec<String> = names.iter().map(|n| format!("`{}`", n)).collect();
                out.push_str(&format!("- `{}`: {}", class_id, rendered.join(", ")));
            }
            if resolution_changed {
                out.push_str(" _(member set changed; overload resolution affected)_");
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn real_member_count(changes: &ChangeSet) -> usize {
    changes
        .changed_class_members()
        .values()
        .flat_map(|members| members.iter())
        .filter(|name| !is_resolution_surface_marker(name))
        .count()
}
