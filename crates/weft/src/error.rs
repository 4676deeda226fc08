//! Error types for weft analysis runs.
//!
//! Problems are split into two levels:
//!
//! - **`Error`**: fatal configuration problems that abort the run
//!   (missing project root, missing entry file)
//! - **`Diagnostic`**: per-file or per-include problems that are collected
//!   and returned with the analysis, never aborting it
//!
//! ## Error Philosophy
//!
//! Weft follows a "best effort" approach: one unreadable header or one
//! unresolvable include must not stop the rest of the analysis. Diagnostics
//! are recovered locally and surfaced on the final [`crate::Analysis`];
//! only project-level configuration problems terminate early. Callers see
//! a clear distinction between "the graph was built, with N warnings" and
//! "the graph could not be built."

use std::path::PathBuf;
use thiserror::Error;

/// Result type for weft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that prevent an analysis run from producing a graph.
///
/// Nothing partial is returned when one of these occurs.
#[derive(Debug, Error)]
pub enum Error {
    /// The project root directory does not exist or cannot be resolved.
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The designated entry translation unit does not exist.
    #[error("entry file not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// File system operation failed while establishing the snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A recoverable problem discovered during analysis.
///
/// Diagnostics are collected during the run and returned on the
/// [`crate::Analysis`]; the caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File the diagnostic is about.
    pub path: PathBuf,
    /// Category of the problem.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.display(),
            self.message,
            self.kind
        )
    }
}

/// Categorization of analysis diagnostics.
///
/// Two broad families:
/// - per-file noise: one file or one include directive had a problem
/// - configuration smells: the project layout itself looks wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    // === Per-file problems ===
    /// A file or directory could not be read (I/O or encoding failure).
    UnreadableFile,

    /// A quoted include did not resolve in any search directory or next to
    /// the including file. Expected for system headers; no edge is created.
    UnresolvedInclude,

    // === Configuration smells ===
    /// The same include string names distinct files in more than one
    /// search directory. First-match precedence applied, but the layout
    /// may be wrong.
    AmbiguousInclude,

    /// A header's project-relative path falls under more than one logical
    /// group. Informational only; never alters resolution.
    MultipleGroups,

    /// The dependency graph contains a cycle through the listed files.
    CyclicDependency,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadableFile => write!(f, "unreadable file"),
            Self::UnresolvedInclude => write!(f, "unresolved include"),
            Self::AmbiguousInclude => write!(f, "ambiguous include"),
            Self::MultipleGroups => write!(f, "multiple groups"),
            Self::CyclicDependency => write!(f, "cyclic dependency"),
        }
    }
}

impl DiagnosticKind {
    /// Returns `true` if this diagnostic points at the project layout or
    /// search-path configuration rather than a single file's content.
    #[must_use]
    pub fn is_config_smell(&self) -> bool {
        matches!(self, Self::AmbiguousInclude | Self::MultipleGroups)
    }
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(path: PathBuf, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// A file that could not be read or decoded.
    #[must_use]
    pub fn unreadable_file(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::new(path, DiagnosticKind::UnreadableFile, reason)
    }

    /// An include string that resolved nowhere.
    #[must_use]
    pub fn unresolved_include(including: PathBuf, raw: &str) -> Self {
        Self::new(
            including,
            DiagnosticKind::UnresolvedInclude,
            format!("include \"{raw}\" not found in any search directory"),
        )
    }

    /// An include string claimed by more than one search directory.
    #[must_use]
    pub fn ambiguous_include(including: PathBuf, raw: &str, shadowed: &[PathBuf]) -> Self {
        let others = shadowed
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            including,
            DiagnosticKind::AmbiguousInclude,
            format!("include \"{raw}\" also matches: {others}"),
        )
    }

    /// A header that belongs to more than one logical group.
    #[must_use]
    pub fn multiple_groups(path: PathBuf, groups: &[String]) -> Self {
        let list = groups.join(", ");
        Self::new(
            path,
            DiagnosticKind::MultipleGroups,
            format!("file belongs to multiple groups: {list}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_kind_categorization() {
        assert!(DiagnosticKind::AmbiguousInclude.is_config_smell());
        assert!(DiagnosticKind::MultipleGroups.is_config_smell());
        assert!(!DiagnosticKind::UnreadableFile.is_config_smell());
        assert!(!DiagnosticKind::UnresolvedInclude.is_config_smell());
        assert!(!DiagnosticKind::CyclicDependency.is_config_smell());
    }

    #[test]
    fn diagnostic_display_includes_path_and_kind() {
        let diag = Diagnostic::unresolved_include(PathBuf::from("src/A.h"), "missing.h");

        let display = diag.to_string();
        assert!(display.contains("src/A.h"));
        assert!(display.contains("missing.h"));
        assert!(display.contains("unresolved include"));
    }

    #[test]
    fn ambiguous_include_lists_shadowed_candidates() {
        let diag = Diagnostic::ambiguous_include(
            PathBuf::from("src/A.h"),
            "util.h",
            &[PathBuf::from("/proj/vendor/util.h")],
        );

        assert!(diag.message.contains("util.h"));
        assert!(diag.message.contains("vendor"));
    }

    #[test]
    fn error_display_names_the_missing_root() {
        let err = Error::RootNotFound(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));
    }
}
