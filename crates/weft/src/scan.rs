//! Filesystem traversal collaborator.
//!
//! Walks the project root once, capturing an immutable snapshot of every
//! header-like file as a [`SourceFile`]. The graph core never touches the
//! file system again beyond the resolver's existence checks. Unreadable
//! directories and files are skipped with a diagnostic; only a missing
//! project root is fatal.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Diagnostic, Error, Result};
use crate::types::{FileIdentity, SourceFile};

/// File extensions treated as headers.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx"];

/// File names recognized as the program entry translation unit when the
/// caller does not designate one, in preference order.
pub const ENTRY_CANDIDATES: &[&str] = &["main.cpp", "main.cc", "main.cxx", "main.c"];

/// One immutable snapshot of the project's header files.
#[derive(Debug)]
pub struct Snapshot {
    /// All header files found, sorted by canonical identity.
    pub sources: Vec<SourceFile>,
    /// Unreadable files/directories encountered during the walk.
    pub diagnostics: Vec<Diagnostic>,
}

/// Capture a snapshot of all header files under `root`.
///
/// `root` must already be canonical (see [`crate::Weft::new`]). The walk
/// skips hidden directories and common build output directories. A file
/// that cannot be read or is not valid UTF-8 still appears in the
/// snapshot, with empty text and an [`Diagnostic::unreadable_file`]
/// record, so one bad file never hides the rest of the project.
///
/// # Errors
///
/// Fails only if `root` is not a readable directory.
pub fn snapshot_headers(root: &Path) -> Result<Snapshot> {
    if !root.is_dir() {
        return Err(Error::RootNotFound(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    let mut diagnostics = Vec::new();
    walk_dir(root, &mut paths, &mut diagnostics);

    // Canonical path order makes the snapshot independent of readdir order.
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let Ok(identity) = FileIdentity::canonicalize(&path) else {
            diagnostics.push(Diagnostic::unreadable_file(
                path,
                "file disappeared during the scan",
            ));
            continue;
        };
        let text = match std::fs::read(&path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    diagnostics.push(Diagnostic::unreadable_file(
                        path.clone(),
                        "file is not valid UTF-8",
                    ));
                    String::new()
                }
            },
            Err(e) => {
                diagnostics.push(Diagnostic::unreadable_file(path.clone(), e.to_string()));
                String::new()
            }
        };
        sources.push(SourceFile::new(identity, text));
    }
    sources.sort_by(|a, b| a.identity.cmp(&b.identity));

    Ok(Snapshot {
        sources,
        diagnostics,
    })
}

/// Locate the entry translation unit under `root` when none is configured.
///
/// Returns the lexicographically first path whose file name matches one of
/// [`ENTRY_CANDIDATES`], preferring earlier candidate names.
#[must_use]
pub fn find_entry(root: &Path) -> Option<PathBuf> {
    let mut paths = Vec::new();
    let mut diagnostics = Vec::new();
    walk_any(root, &mut paths, &mut diagnostics);
    paths.sort();

    for candidate in ENTRY_CANDIDATES {
        if let Some(found) = paths.iter().find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n == *candidate)
        }) {
            return Some(found.clone());
        }
    }
    None
}

/// Recursively collect header files under `dir`.
///
/// Unreadable directories are recorded and skipped, never fatal.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, diagnostics: &mut Vec<Diagnostic>) {
    walk_filtered(dir, files, diagnostics, &|path| {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let lower = ext.to_lowercase();
                HEADER_EXTENSIONS.contains(&lower.as_str())
            })
    });
}

/// Recursively collect every regular file under `dir`.
fn walk_any(dir: &Path, files: &mut Vec<PathBuf>, diagnostics: &mut Vec<Diagnostic>) {
    walk_filtered(dir, files, diagnostics, &|_| true);
}

fn walk_filtered(
    dir: &Path,
    files: &mut Vec<PathBuf>,
    diagnostics: &mut Vec<Diagnostic>,
    keep: &dyn Fn(&Path) -> bool,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(directory = %dir.display(), error = %e, "cannot read directory, skipping");
            diagnostics.push(Diagnostic::unreadable_file(dir.to_path_buf(), e.to_string()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(directory = %dir.display(), error = %e, "failed to read directory entry");
                diagnostics.push(Diagnostic::unreadable_file(dir.to_path_buf(), e.to_string()));
                continue;
            }
        };

        let path = entry.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') || (is_excluded_dir(name) && path.is_dir()) {
                continue;
            }
        }

        if path.is_dir() {
            walk_filtered(&path, files, diagnostics, keep);
        } else if path.is_file() && keep(&path) {
            files.push(path);
        }
    }
}

/// Directories never worth scanning: build output and vendored code.
fn is_excluded_dir(name: &str) -> bool {
    matches!(
        name,
        "build" | "out" | "cmake-build-debug" | "cmake-build-release" | "third_party" | "vendor"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use std::fs;

    #[test]
    fn collects_headers_recursively_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Physics/Units")).unwrap();
        fs::write(dir.path().join("Camera.h"), "").unwrap();
        fs::write(dir.path().join("Physics/Physics.hpp"), "").unwrap();
        fs::write(dir.path().join("Physics/Units/Mass.h"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("main.cpp"), "").unwrap();

        let root = dir.path().canonicalize().unwrap();
        let snapshot = snapshot_headers(&root).unwrap();

        let labels: Vec<String> = snapshot
            .sources
            .iter()
            .map(|s| s.identity.label())
            .collect();
        assert_eq!(labels, vec!["Camera.h", "Physics.hpp", "Mass.h"]);
        assert!(snapshot.diagnostics.is_empty());
    }

    #[test]
    fn skips_hidden_and_build_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("build")).unwrap();
        fs::write(dir.path().join(".git/junk.h"), "").unwrap();
        fs::write(dir.path().join("build/generated.h"), "").unwrap();
        fs::write(dir.path().join("real.h"), "").unwrap();

        let root = dir.path().canonicalize().unwrap();
        let snapshot = snapshot_headers(&root).unwrap();
        assert_eq!(snapshot.sources.len(), 1);
        assert_eq!(snapshot.sources[0].identity.label(), "real.h");
    }

    #[test]
    fn non_utf8_file_contributes_empty_text_and_a_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.h"), [0xff, 0xfe, 0x00, 0x81]).unwrap();
        fs::write(dir.path().join("good.h"), "#include \"bad.h\"\n").unwrap();

        let root = dir.path().canonicalize().unwrap();
        let snapshot = snapshot_headers(&root).unwrap();

        assert_eq!(snapshot.sources.len(), 2, "bad file still in snapshot");
        let bad = snapshot
            .sources
            .iter()
            .find(|s| s.identity.label() == "bad.h")
            .unwrap();
        assert!(bad.text.is_empty());
        assert_eq!(snapshot.diagnostics.len(), 1);
        assert_eq!(snapshot.diagnostics[0].kind, DiagnosticKind::UnreadableFile);
    }

    #[test]
    fn missing_root_is_fatal() {
        let result = snapshot_headers(Path::new("/no/such/project/root"));
        assert!(matches!(result, Err(Error::RootNotFound(_))));
    }

    #[test]
    fn find_entry_prefers_earlier_candidate_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.cc"), "").unwrap();
        fs::write(dir.path().join("src/main.cpp"), "").unwrap();

        let entry = find_entry(dir.path()).unwrap();
        assert!(entry.ends_with("src/main.cpp"));
    }

    #[test]
    fn find_entry_returns_none_without_a_main() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.cpp"), "").unwrap();
        assert!(find_entry(dir.path()).is_none());
    }

    #[test]
    fn header_extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Loud.H"), "").unwrap();

        let root = dir.path().canonicalize().unwrap();
        let snapshot = snapshot_headers(&root).unwrap();
        assert_eq!(snapshot.sources.len(), 1);
    }
}
