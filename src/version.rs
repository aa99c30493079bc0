//! Version validation and normalization.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `MAJOR.MINOR.PATCH` with an optional trailing suffix
/// (`1.2.3`, `1.2.3rc1`, `1.2.3-beta.1`, `1.2.3.post1`).
static VERSION_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+[0-9A-Za-z.+-]*$").unwrap());

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Check that a token has the `MAJOR.MINOR.PATCH` shape.
///
/// A suffix after the third component is allowed; partial versions
/// like `1.2` are not.
pub fn is_valid_shape(version: &str) -> bool {
    VERSION_SHAPE.is_match(version)
}

/// A resolved version with its normalized fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// The version string as extracted (or the fallback).
    pub version: String,
    /// The release tag, `v` + version.
    pub tag: String,
    /// First numeric component.
    pub major: u64,
    /// Second numeric component.
    pub minor: u64,
    /// Third numeric component.
    pub patch: u64,
}

impl VersionInfo {
    /// Normalize a version string into its output fields.
    ///
    /// The tag prefixes the version with `v` verbatim. The numeric
    /// components are the first three runs of ASCII digits after any
    /// leading `v` characters are trimmed; missing runs default to 0,
    /// so loose inputs like `2.1` still normalize.
    pub fn new(version: &str) -> VersionInfo {
        let tag = format!("v{}", version);

        let trimmed = version.trim_start_matches('v');
        let mut parts = DIGIT_RUN
            .find_iter(trimmed)
            .filter_map(|run| run.as_str().parse::<u64>().ok());

        VersionInfo {
            version: version.to_string(),
            tag,
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }
}
