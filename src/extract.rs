//! Version token extraction from packaging metadata files.

use crate::source::{self, SourceKind};
use crate::version::{self, VersionInfo};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// `version = "…"` assignment, single or double quoted.
static VERSION_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s*=\s*['"]([^'"]+)['"]"#).unwrap());

/// `__version__ = "…"` assignment, single or double quoted.
static DUNDER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"__version__\s*=\s*['"]([^'"]+)['"]"#).unwrap());

/// Errors that can occur while extracting a version.
///
/// None of these escape [`resolve`]; they are reported through the
/// fallback warning and carried by [`try_extract`] for callers that
/// want the reason.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no version file found under {}", .0.display())]
    NoCandidates(PathBuf),

    #[error("no candidate file under {} contains a version", .0.display())]
    Exhausted(PathBuf),

    #[error("version file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no version assignment found in {}", .0.display())]
    NoMatch(PathBuf),

    #[error("version '{token}' in {} is not MAJOR.MINOR.PATCH", path.display())]
    BadShape { path: PathBuf, token: String },
}

/// Which file to extract from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    /// Search the candidate files in preference order.
    Auto,
    /// A specific metadata file, absolute or relative to the root.
    Path(PathBuf),
}

impl FileSpec {
    /// Interpret a CLI argument: the literal `auto` enables the
    /// candidate search, anything else names a file.
    pub fn from_arg(raw: &str) -> FileSpec {
        if raw == "auto" {
            FileSpec::Auto
        } else {
            FileSpec::Path(PathBuf::from(raw))
        }
    }
}

/// Minimal pyproject.toml document model; only the version locations
/// are typed, everything else is ignored.
#[derive(Debug, Deserialize)]
struct PyprojectDoc {
    project: Option<ProjectTable>,
    tool: Option<ToolTable>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolTable {
    poetry: Option<PoetryTable>,
}

#[derive(Debug, Deserialize)]
struct PoetryTable {
    version: Option<String>,
}

/// Extract a raw version token from file content of a given kind.
pub fn extract_from_content(kind: SourceKind, content: &str) -> Option<String> {
    match kind {
        SourceKind::SetupPy => extract_setup_py(content),
        SourceKind::PyprojectToml => extract_pyproject(content),
        SourceKind::InitPy => extract_init_py(content),
    }
}

/// `setup.py`: a `version = "…"` assignment (typically the `setup()`
/// keyword), then a module-level `__version__`.
fn extract_setup_py(content: &str) -> Option<String> {
    if let Some(captures) = VERSION_ASSIGN.captures(content) {
        return Some(captures[1].to_string());
    }
    DUNDER_VERSION
        .captures(content)
        .map(|captures| captures[1].to_string())
}

/// `pyproject.toml`: structural parse checking `project.version`,
/// `tool.poetry.version`, then a top-level `version` key. Documents
/// that fail to parse as TOML degrade to the generic assignment regex.
fn extract_pyproject(content: &str) -> Option<String> {
    match toml::from_str::<PyprojectDoc>(content) {
        Ok(doc) => doc
            .project
            .and_then(|project| project.version)
            .or_else(|| doc.tool.and_then(|tool| tool.poetry).and_then(|poetry| poetry.version))
            .or(doc.version),
        Err(_) => VERSION_ASSIGN
            .captures(content)
            .map(|captures| captures[1].to_string()),
    }
}

/// `__init__.py`: a `__version__ = "…"` assignment.
fn extract_init_py(content: &str) -> Option<String> {
    DUNDER_VERSION
        .captures(content)
        .map(|captures| captures[1].to_string())
}

/// Extract and shape-check a version according to the file spec.
///
/// In `Auto` mode, candidates that yield no token are skipped and the
/// next one is tried; the first extracted token wins. The winning
/// token (from either mode) must have the `MAJOR.MINOR.PATCH` shape.
pub fn try_extract(root: &Path, spec: &FileSpec) -> Result<String, ExtractError> {
    let (path, token) = match spec {
        FileSpec::Auto => extract_auto(root)?,
        FileSpec::Path(path) => extract_explicit(root, path)?,
    };

    if !version::is_valid_shape(&token) {
        return Err(ExtractError::BadShape { path, token });
    }
    Ok(token)
}

fn extract_auto(root: &Path) -> Result<(PathBuf, String), ExtractError> {
    let candidates = source::candidate_files(root);
    if candidates.is_empty() {
        return Err(ExtractError::NoCandidates(root.to_path_buf()));
    }

    for candidate in candidates {
        // Unreadable candidates count as "no version here".
        let Ok(content) = fs::read_to_string(&candidate) else {
            continue;
        };
        let kind = SourceKind::from_path(&candidate).unwrap_or_else(|| SourceKind::sniff(&content));
        if let Some(token) = extract_from_content(kind, &content) {
            return Ok((candidate, token));
        }
    }

    Err(ExtractError::Exhausted(root.to_path_buf()))
}

fn extract_explicit(root: &Path, path: &Path) -> Result<(PathBuf, String), ExtractError> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    if !path.is_file() {
        return Err(ExtractError::MissingFile(path));
    }

    let content = fs::read_to_string(&path).map_err(|source| ExtractError::Unreadable {
        path: path.clone(),
        source,
    })?;

    let kind = SourceKind::from_path(&path).unwrap_or_else(|| SourceKind::sniff(&content));
    let token =
        extract_from_content(kind, &content).ok_or_else(|| ExtractError::NoMatch(path.clone()))?;
    Ok((path, token))
}

/// Resolve a version, degrading to the fallback on any failure.
///
/// This is the total entry point: missing files, unreadable content,
/// and malformed tokens all produce the fallback version, with the
/// reason logged as a warning.
pub fn resolve(root: &Path, spec: &FileSpec, fallback: &str) -> VersionInfo {
    match try_extract(root, spec) {
        Ok(token) => {
            tracing::debug!("extracted version {} from {:?}", token, spec);
            VersionInfo::new(&token)
        }
        Err(err) => {
            tracing::warn!("no version found ({}), using fallback: {}", err, fallback);
            VersionInfo::new(fallback)
        }
    }
}
