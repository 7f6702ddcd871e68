//! Version tag extraction
//!
//! Schema elements carry their options as an opaque string-rendered blob.
//! A version tag, if present, appears as `[<marker>]: "<version>"` somewhere
//! inside that blob. This module scans the blob for the known markers, pulls
//! out the quoted version string and parses it as a semantic version.

use std::sync::OnceLock;

use regex::Regex;
use semver::Version;
use thiserror::Error;

/// Recognized tag markers, one per element kind, in priority order.
///
/// The scan stops at the first marker found anywhere in the blob, so if a
/// blob somehow contains several distinct markers, the first one in this
/// list wins regardless of which element kind the blob belongs to. That is
/// a quirk of the historical blob format and is preserved verbatim for
/// compatibility.
const MARKERS: [&str; 4] = [
    "[version_msg]:",
    "[version_field]:",
    "[version_enum]:",
    "[version_enum_value]:",
];

/// Tag extraction errors
///
/// These do not name the element the blob belongs to; the walker attaches
/// the fully-qualified element name when it wraps them.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("expected quoted version string after {marker:?}")]
    MalformedQuote { marker: &'static str },

    #[error("invalid version string {input:?}: {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },
}

/// A double-quoted string, allowing backslash escapes and leading whitespace.
fn quoted_re() -> &'static Regex {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    QUOTED.get_or_init(|| Regex::new(r#"^\s*"((?:[^"\\]|\\.)*)""#).unwrap())
}

/// Extract the version tag from an options blob, if it carries one.
///
/// Returns `Ok(None)` when no marker is present, since an untagged element
/// is not an error. A marker that is not followed by a parseable quoted semantic
/// version is an error.
pub fn extract_version(options: &str) -> Result<Option<Version>, TagError> {
    let found = MARKERS
        .iter()
        .find_map(|marker| options.find(marker).map(|at| (*marker, at + marker.len())));
    let Some((marker, rest_at)) = found else {
        return Ok(None);
    };

    let rest = &options[rest_at..];
    let caps = quoted_re()
        .captures(rest)
        .ok_or(TagError::MalformedQuote { marker })?;

    parse_version(&unescape(&caps[1])).map(Some)
}

/// Parse `MAJOR.MINOR[.PATCH]` into a semantic version.
///
/// A two-component string is silently extended with a zero patch component
/// before parsing, so `"1.2"` and `"1.2.0"` are the same version.
pub fn parse_version(input: &str) -> Result<Version, TagError> {
    let normalized = if input.matches('.').count() == 1 {
        format!("{input}.0")
    } else {
        input.to_string()
    };
    Version::parse(&normalized).map_err(|source| TagError::InvalidVersion {
        input: input.to_string(),
        source,
    })
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_is_absent() {
        assert!(extract_version("").unwrap().is_none());
        assert!(extract_version("deprecated:true").unwrap().is_none());
    }

    #[test]
    fn test_extracts_tagged_version() {
        let ver = extract_version(r#"[version_msg]: "3.5.1""#).unwrap().unwrap();
        assert_eq!(ver, Version::new(3, 5, 1));
    }

    #[test]
    fn test_marker_embedded_in_larger_blob() {
        let blob = r#"deprecated:false [version_field]: "2.1" json_name:"x""#;
        let ver = extract_version(blob).unwrap().unwrap();
        assert_eq!(ver, Version::new(2, 1, 0));
    }

    #[test]
    fn test_first_marker_in_priority_order_wins() {
        // version_msg outranks version_field even when it appears later
        // in the blob.
        let blob = r#"[version_field]: "2.0" [version_msg]: "1.0""#;
        let ver = extract_version(blob).unwrap().unwrap();
        assert_eq!(ver, Version::new(1, 0, 0));
    }

    #[test]
    fn test_two_components_normalize_to_three() {
        assert_eq!(parse_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_rejects_wrong_component_counts() {
        assert!(parse_version("1").is_err());
        assert!(parse_version("1.2.3.4").is_err());
    }

    #[test]
    fn test_missing_quote_is_an_error() {
        assert!(extract_version("[version_enum]: 1.2").is_err());
        assert!(extract_version(r#"[version_enum]: "1.2"#).is_err());
    }

    #[test]
    fn test_garbage_version_is_an_error() {
        assert!(extract_version(r#"[version_enum_value]: "not-a-version""#).is_err());
    }
}
