//! Locating version metadata files in a project tree.

use std::fs;
use std::path::{Path, PathBuf};

/// The kind of packaging metadata file a version is extracted from.
///
/// Each kind has its own extraction rules (see the `extract` module).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A `setup.py` build script.
    SetupPy,
    /// A `pyproject.toml` project configuration.
    PyprojectToml,
    /// A package `__init__.py` carrying a `__version__` assignment.
    InitPy,
}

impl SourceKind {
    /// Classify a file by its file name.
    ///
    /// Returns `None` for file names that are not one of the three
    /// recognized metadata files; callers fall back to [`SourceKind::sniff`].
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        match path.file_name().and_then(|n| n.to_str()) {
            Some("setup.py") => Some(SourceKind::SetupPy),
            Some("pyproject.toml") => Some(SourceKind::PyprojectToml),
            Some("__init__.py") => Some(SourceKind::InitPy),
            _ => None,
        }
    }

    /// Classify file content when the file name is not recognized.
    ///
    /// A `setup(` call marks a build script, a `[project]` or
    /// `[tool.poetry]` table marks a project config, and anything else
    /// is treated as a module initializer.
    pub fn sniff(content: &str) -> SourceKind {
        if content.contains("setup(") {
            SourceKind::SetupPy
        } else if content.contains("[project]") || content.contains("[tool.poetry]") {
            SourceKind::PyprojectToml
        } else {
            SourceKind::InitPy
        }
    }
}

/// Collect the auto-search candidates under `root`, in preference order.
///
/// The fixed candidates come first: `setup.py`, `pyproject.toml`,
/// `__init__.py`, `src/__init__.py`. After those, every non-hidden
/// top-level directory is checked for an `__init__.py`, in lexicographic
/// order so the search is deterministic. Only files that exist are
/// returned.
pub fn candidate_files(root: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![
        root.join("setup.py"),
        root.join("pyproject.toml"),
        root.join("__init__.py"),
        root.join("src").join("__init__.py"),
    ];

    // Package directories: any top-level dir with an __init__.py inside.
    let mut package_dirs: Vec<PathBuf> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| entry.path())
            .collect(),
        Err(_) => Vec::new(),
    };
    package_dirs.sort();

    for dir in package_dirs {
        let init = dir.join("__init__.py");
        if !candidates.contains(&init) {
            candidates.push(init);
        }
    }

    candidates.retain(|path| path.is_file());
    candidates
}
