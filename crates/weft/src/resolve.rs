//! Include-path resolution against an ordered search path.
//!
//! Mirrors a compiler's quoted-include search order: each raw include
//! string is tried against the configured search directories in list
//! order, first existing match wins, with a final fallback relative to
//! the including file's own directory. Unresolved includes are a normal
//! outcome (system headers live outside the project), never an error.
//!
//! Every successful resolution passes through `std::fs::canonicalize`,
//! on both the search-directory path and the includer-relative fallback
//! path, so differently spelled references to one physical file always
//! collapse to a single [`FileIdentity`].

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::FileIdentity;

/// Outcome of resolving one raw include string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The include names an existing file.
    Resolved {
        /// Canonical identity of the winning match.
        target: FileIdentity,
        /// Distinct files in lower-precedence search directories that also
        /// answer to the same include string. Non-empty means the project
        /// layout is ambiguous and worth a diagnostic.
        shadowed: Vec<PathBuf>,
    },
    /// No search directory and no includer-relative path has the file.
    Unresolved,
}

/// Resolves raw include strings using a fixed, ordered search path.
///
/// Resolution is a pure function of the raw string, the including file's
/// location, the search-directory list and the file system state; the
/// resolver holds no cache and no mutable state.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    search_dirs: Vec<PathBuf>,
}

impl IncludeResolver {
    /// Create a resolver over the given search directories.
    ///
    /// Directory order is precedence order; it is never reordered.
    #[must_use]
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// The configured search path, in precedence order.
    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolve `raw` as included from `including`.
    ///
    /// Search directories are probed in list order and the first existing
    /// candidate wins; remaining directories are still probed so that
    /// shadowed duplicates can be reported. If no search directory has the
    /// file, the directory containing `including` is tried as a fallback.
    #[must_use]
    pub fn resolve(&self, raw: &str, including: &FileIdentity) -> Resolution {
        let mut winner: Option<FileIdentity> = None;
        let mut shadowed = Vec::new();

        for dir in &self.search_dirs {
            let Some(found) = canonical_if_file(&dir.join(raw)) else {
                continue;
            };
            match &winner {
                None => winner = Some(found),
                Some(first) if found.as_path() != first.as_path() => {
                    shadowed.push(found.as_path().to_path_buf());
                }
                // Same physical file reachable through two directories
                // (overlapping search path); not ambiguous.
                Some(_) => {}
            }
        }

        if let Some(target) = winner {
            return Resolution::Resolved { target, shadowed };
        }

        // Fallback: relative to the including file's own directory.
        if let Some(parent) = including.as_path().parent() {
            if let Some(target) = canonical_if_file(&parent.join(raw)) {
                return Resolution::Resolved {
                    target,
                    shadowed: Vec::new(),
                };
            }
        }

        debug!(raw, including = %including, "include did not resolve");
        Resolution::Unresolved
    }
}

/// Canonicalize `candidate` if it exists and is a regular file.
fn canonical_if_file(candidate: &Path) -> Option<FileIdentity> {
    if !candidate.is_file() {
        return None;
    }
    match FileIdentity::canonicalize(candidate) {
        Ok(identity) => Some(identity),
        Err(e) => {
            // Existed a moment ago; treat a canonicalization failure the
            // same as absence rather than aborting the run.
            debug!(candidate = %candidate.display(), error = %e, "canonicalize failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Two search directories plus a file next to the includer:
    ///
    /// ```text
    /// root/
    ///   first/util.h
    ///   second/util.h      (shadowed duplicate)
    ///   second/only.h
    ///   src/main_like.h    (the includer)
    ///   src/sibling.h      (fallback target)
    /// ```
    fn layout() -> (TempDir, IncludeResolver, FileIdentity) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path();

        for sub in ["first", "second", "src"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("first/util.h"), "").unwrap();
        fs::write(root.join("second/util.h"), "").unwrap();
        fs::write(root.join("second/only.h"), "").unwrap();
        fs::write(root.join("src/main_like.h"), "").unwrap();
        fs::write(root.join("src/sibling.h"), "").unwrap();

        let resolver = IncludeResolver::new(vec![root.join("first"), root.join("second")]);
        let including = FileIdentity::canonicalize(root.join("src/main_like.h")).unwrap();
        (dir, resolver, including)
    }

    #[test]
    fn first_matching_directory_wins() {
        let (dir, resolver, including) = layout();

        let Resolution::Resolved { target, shadowed } = resolver.resolve("util.h", &including)
        else {
            panic!("expected resolution");
        };

        let expected = FileIdentity::canonicalize(dir.path().join("first/util.h")).unwrap();
        assert_eq!(target, expected);
        assert_eq!(shadowed.len(), 1, "second/util.h should be reported as shadowed");
    }

    #[test]
    fn lower_precedence_directory_used_when_higher_misses() {
        let (dir, resolver, including) = layout();

        let Resolution::Resolved { target, shadowed } = resolver.resolve("only.h", &including)
        else {
            panic!("expected resolution");
        };

        let expected = FileIdentity::canonicalize(dir.path().join("second/only.h")).unwrap();
        assert_eq!(target, expected);
        assert!(shadowed.is_empty());
    }

    #[test]
    fn falls_back_to_including_files_directory() {
        let (dir, resolver, including) = layout();

        let Resolution::Resolved { target, .. } = resolver.resolve("sibling.h", &including)
        else {
            panic!("expected fallback resolution");
        };

        let expected = FileIdentity::canonicalize(dir.path().join("src/sibling.h")).unwrap();
        assert_eq!(target, expected);
    }

    #[test]
    fn missing_file_is_unresolved_not_an_error() {
        let (_dir, resolver, including) = layout();
        assert_eq!(resolver.resolve("no_such.h", &including), Resolution::Unresolved);
    }

    #[test]
    fn different_spellings_collapse_to_one_identity() {
        let (_dir, resolver, including) = layout();

        let a = resolver.resolve("only.h", &including);
        let b = resolver.resolve("./only.h", &including);

        let (Resolution::Resolved { target: ta, .. }, Resolution::Resolved { target: tb, .. }) =
            (a, b)
        else {
            panic!("both spellings should resolve");
        };
        assert_eq!(ta, tb);
    }

    #[test]
    fn overlapping_search_dirs_are_not_ambiguous() {
        let (dir, _, including) = layout();
        // The same directory listed twice yields the same physical file.
        let resolver =
            IncludeResolver::new(vec![dir.path().join("first"), dir.path().join("first")]);

        let Resolution::Resolved { shadowed, .. } = resolver.resolve("util.h", &including) else {
            panic!("expected resolution");
        };
        assert!(shadowed.is_empty());
    }

    #[test]
    fn empty_include_string_is_unresolved() {
        let (_dir, resolver, including) = layout();
        // dir.join("") names the directory itself, which is not a file.
        assert_eq!(resolver.resolve("", &including), Resolution::Unresolved);
    }
}
