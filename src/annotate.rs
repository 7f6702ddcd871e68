//! Version aggregation
//!
//! The caller-facing layer: drives the walkers and reduces visited
//! annotations either to a single floor version (the maximum over everything
//! touched) or to an ordered annotation list.
//!
//! Two failure policies live side by side on purpose. The per-value entry
//! point treats a traversal error as an invariant violation and panics: a
//! well-formed, already-validated schema should never produce a malformed
//! tag at instance-query time. The per-file and per-registry entry points
//! return the error as an ordinary value next to whatever annotations were
//! collected before it occurred.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::descriptor::FileDescriptor;
use crate::error::VersionError;
use crate::registry::DescriptorRegistry;
use crate::value::MessageValue;
use crate::walk::{walk_enum_type, walk_message_type, walk_value};

/// One visited schema element: its fully-qualified name and the version tag
/// parsed from its options, if it declared one. An absent version is not an
/// error, it simply contributes nothing to the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionAnnotation {
    pub full_name: String,
    pub version: Option<Version>,
}

/// The reduction step: fold one more annotation's version into the running
/// maximum. Absent versions leave the accumulator untouched; ties keep
/// either value. Folding can only raise or preserve the maximum.
pub fn fold_max(acc: Option<Version>, version: Option<Version>) -> Option<Version> {
    match (acc, version) {
        (Some(a), Some(b)) => Some(if b < a { a } else { b }),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Compute the floor version for a populated value: the maximum version
/// among every element the instance walk touches, or `None` when no touched
/// element declares a tag.
///
/// # Panics
///
/// Panics if the traversal fails (malformed tag on a reachable element, or
/// an enum number with no declared value at that position). These indicate
/// a schema invariant violation and halt the calling context rather than
/// degrade into a partial answer.
pub fn minimal_version(value: &MessageValue) -> Option<Version> {
    let mut floor: Option<Version> = None;
    let walked = walk_value(value, &mut |_, version| {
        floor = fold_max(floor.take(), version);
        Ok(())
    });
    if let Err(err) = walked {
        panic!("invariant violation while computing minimal version: {err}");
    }
    floor
}

/// Collect every annotation declared by one schema file, in traversal order:
/// each top-level message (with its fields, nested enums and nested
/// messages), then each top-level enum. Untagged elements are collected too,
/// with an absent version.
///
/// On error, returns the annotations gathered before the failure alongside
/// the error.
pub fn file_annotations(file: &FileDescriptor) -> (Vec<VersionAnnotation>, Option<VersionError>) {
    let mut annotations = Vec::new();
    for message in &file.messages {
        // Scoped so the collector's borrow ends before the early return.
        let walked = {
            let mut visit = collect_into(&mut annotations);
            walk_message_type(message, &mut visit)
        };
        if let Err(err) = walked {
            return (annotations, Some(err));
        }
    }
    for enum_type in &file.enums {
        let walked = {
            let mut visit = collect_into(&mut annotations);
            walk_enum_type(enum_type, &mut visit)
        };
        if let Err(err) = walked {
            return (annotations, Some(err));
        }
    }
    (annotations, None)
}

/// Collect annotations across every file in a registry, in registry order.
///
/// Files whose package name exactly matches an entry in `excluded_packages`
/// are skipped entirely. The scan is fail-fast across files: once one file's
/// walk fails, no further file is read, and the partial list gathered so far
/// (including the failing file's own partial annotations) is returned with
/// the error.
pub fn registry_annotations(
    registry: &DescriptorRegistry,
    excluded_packages: &[String],
) -> (Vec<VersionAnnotation>, Option<VersionError>) {
    let mut annotations = Vec::new();
    for file in registry.files() {
        if excluded_packages.iter().any(|p| p == &file.package) {
            continue;
        }
        let (mut collected, err) = file_annotations(file);
        annotations.append(&mut collected);
        if let Some(err) = err {
            return (annotations, Some(err));
        }
    }
    (annotations, None)
}

fn collect_into(
    annotations: &mut Vec<VersionAnnotation>,
) -> impl FnMut(&str, Option<Version>) -> crate::error::Result<()> + '_ {
    |full_name, version| {
        annotations.push(VersionAnnotation {
            full_name: full_name.to_string(),
            version,
        });
        Ok(())
    }
}
