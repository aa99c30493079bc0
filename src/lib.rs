//! pkgver - package version extraction for CI release automation.
//!
//! This library provides the core functionality for locating a Python
//! project's packaging metadata, extracting a version string from it,
//! and rendering the normalized fields as `key=value` output lines.

pub mod extract;
pub mod output;
pub mod source;
pub mod version;

pub use extract::{resolve, try_extract, ExtractError, FileSpec};
pub use output::{append_outputs, render_json, render_outputs};
pub use source::{candidate_files, SourceKind};
pub use version::{is_valid_shape, VersionInfo};
