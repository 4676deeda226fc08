//! # Weft: quoted-include dependency graph analyzer
//!
//! Weft scans a C/C++ project tree for quoted `#include "..."` directives,
//! resolves each one the way a compiler's quoted-include search does
//! (ordered search directories, then the including file's own directory),
//! and assembles a directed file-to-file dependency graph. From the graph
//! it derives per-node fan-in/fan-out, the set of files pulled in directly
//! by the entry translation unit, and a cycle-tolerant topological
//! ordering, then emits an attributed node/edge model for an external
//! renderer.
//!
//! ## Design Philosophy
//!
//! - **Text scan, not a parse** - no macro expansion, no conditional
//!   compilation, no system includes; only literal quoted directives
//! - **Best effort** - one unreadable header or unresolvable include is a
//!   diagnostic, never a failed run; only broken configuration is fatal
//! - **Deterministic** - identical snapshots produce identical graphs,
//!   metrics and orderings, regardless of enumeration order
//! - **Model, not pictures** - the output carries labels and flags; a
//!   renderer chooses colors, shapes and layout
//! - **Embeddable** - library first, CLI second
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use weft::Weft;
//!
//! let weft = Weft::new(
//!     Path::new("/path/to/project"),
//!     vec![PathBuf::from("src"), PathBuf::from("src/Physics")],
//!     None, // find main.cpp automatically
//! )?;
//!
//! let analysis = weft.analyze()?;
//! println!(
//!     "{} files, {} edges, {} warnings",
//!     analysis.graph.node_count(),
//!     analysis.graph.edge_count(),
//!     analysis.diagnostics.len(),
//! );
//!
//! let model = analysis.to_model();
//! let json = serde_json::to_string_pretty(&model).unwrap();
//! # Ok::<(), weft::Error>(())
//! ```

mod builder;
mod error;
mod extract;
mod model;
mod order;
mod resolve;
mod scan;
mod types;

pub use builder::{build_graph, check_group_membership, BuildOutput, LogicalGroup};
pub use error::{Diagnostic, DiagnosticKind, Error, Result};
pub use extract::quoted_includes;
pub use model::{GraphEdge, GraphModel, GraphNode, FAN_THRESHOLD};
pub use order::{analyze_topology, find_cycles, TopoAnalysis};
pub use resolve::{IncludeResolver, Resolution};
pub use scan::{find_entry, snapshot_headers, Snapshot, ENTRY_CANDIDATES, HEADER_EXTENSIONS};
pub use types::{
    Analysis, Cycle, DependencyGraph, FileIdentity, NodeMetrics, SourceFile, TopoOrder,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, warn};

/// Configured analyzer for one project.
///
/// `Weft` validates the fatal configuration up front (project root and
/// entry file must exist); everything after that is the best-effort
/// pipeline of [`Weft::analyze`].
pub struct Weft {
    project_root: PathBuf,
    search_dirs: Vec<PathBuf>,
    entry: PathBuf,
    groups: Vec<LogicalGroup>,
}

impl Weft {
    /// Create an analyzer for `project_root`.
    ///
    /// `search_dirs` is the ordered quoted-include search path; relative
    /// entries are taken relative to the project root, and their order is
    /// resolution precedence. A search directory that does not exist is
    /// tolerated with a warning, like a compiler's `-I` flag. `entry`
    /// designates the entry translation unit; when `None`, the first
    /// `main.cpp`/`main.cc`/`main.cxx`/`main.c` under the root is used.
    ///
    /// # Errors
    ///
    /// Fails if the project root or the entry file does not exist.
    pub fn new(
        project_root: &Path,
        search_dirs: Vec<PathBuf>,
        entry: Option<PathBuf>,
    ) -> Result<Self> {
        let project_root = std::fs::canonicalize(project_root)
            .map_err(|_| Error::RootNotFound(project_root.to_path_buf()))?;

        let search_dirs: Vec<PathBuf> = search_dirs
            .into_iter()
            .map(|dir| {
                let absolute = if dir.is_absolute() {
                    dir
                } else {
                    project_root.join(dir)
                };
                if !absolute.is_dir() {
                    warn!(directory = %absolute.display(), "search directory does not exist");
                }
                absolute
            })
            .collect();

        let entry = match entry {
            Some(path) => {
                let absolute = if path.is_absolute() {
                    path
                } else {
                    project_root.join(path)
                };
                std::fs::canonicalize(&absolute).map_err(|_| Error::EntryNotFound(absolute))?
            }
            None => {
                let found = scan::find_entry(&project_root)
                    .ok_or_else(|| Error::EntryNotFound(project_root.join("main.cpp")))?;
                std::fs::canonicalize(&found).map_err(|_| Error::EntryNotFound(found))?
            }
        };

        Ok(Self {
            project_root,
            search_dirs,
            entry,
            groups: Vec::new(),
        })
    }

    /// Attach logical groups for layout-smell reporting.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<LogicalGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// The canonical project root.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The canonical entry translation unit.
    #[must_use]
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    /// Run the full pipeline over one immutable snapshot of the project.
    ///
    /// Scan → extract/resolve (parallel) → graph assembly → metrics and
    /// cycle-tolerant ordering → cycle enumeration. Per-file problems
    /// surface as diagnostics on the returned [`Analysis`].
    ///
    /// # Errors
    ///
    /// Fails only on project-level problems: the root vanished since
    /// construction, or the entry file cannot be read.
    pub fn analyze(&self) -> Result<Analysis> {
        let start = Instant::now();

        let snapshot = scan::snapshot_headers(&self.project_root)?;
        debug!(
            files = snapshot.sources.len(),
            "captured project snapshot"
        );

        // The entry TU is configuration; failing to read it is fatal.
        let entry_text = std::fs::read_to_string(&self.entry)?;
        let entry_file = SourceFile::new(
            FileIdentity::from_canonical(self.entry.clone()),
            entry_text,
        );

        let resolver = IncludeResolver::new(self.search_dirs.clone());
        let built = builder::build_graph(&snapshot.sources, Some(&entry_file), &resolver);

        let mut diagnostics = snapshot.diagnostics;
        diagnostics.extend(built.diagnostics);
        diagnostics.extend(builder::check_group_membership(
            &snapshot.sources,
            &self.project_root,
            &self.groups,
        ));

        let topo = order::analyze_topology(&built.graph);
        let cycles = order::find_cycles(&built.graph);
        for cycle in &cycles {
            let loop_display = cycle
                .members
                .iter()
                .map(FileIdentity::label)
                .collect::<Vec<_>>()
                .join(" -> ");
            diagnostics.push(Diagnostic::new(
                cycle.members[0].as_path().to_path_buf(),
                DiagnosticKind::CyclicDependency,
                format!("files include each other: {loop_display}"),
            ));
        }

        Ok(Analysis {
            graph: built.graph,
            entry_set: built.entry_set,
            metrics: topo.metrics,
            order: topo.order,
            cycles,
            diagnostics,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_main() -> TempDir {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("A.h"), "#include \"B.h\"\n").unwrap();
        fs::write(src.join("B.h"), "").unwrap();
        fs::write(src.join("main.cpp"), "#include \"A.h\"\n").unwrap();
        dir
    }

    #[test]
    fn new_finds_the_entry_automatically() {
        let dir = project_with_main();
        let weft = Weft::new(dir.path(), vec![PathBuf::from("src")], None).unwrap();
        assert!(weft.entry().ends_with("main.cpp"));
    }

    #[test]
    fn new_fails_for_missing_root() {
        let result = Weft::new(Path::new("/nonexistent/project"), vec![], None);
        assert!(matches!(result, Err(Error::RootNotFound(_))));
    }

    #[test]
    fn new_fails_for_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.h"), "").unwrap();

        let result = Weft::new(dir.path(), vec![], Some(PathBuf::from("missing_main.cpp")));
        assert!(matches!(result, Err(Error::EntryNotFound(_))));

        let result = Weft::new(dir.path(), vec![], None);
        assert!(matches!(result, Err(Error::EntryNotFound(_))));
    }

    #[test]
    fn missing_search_directory_is_tolerated() {
        let dir = project_with_main();
        let weft = Weft::new(
            dir.path(),
            vec![PathBuf::from("no_such_dir"), PathBuf::from("src")],
            None,
        )
        .unwrap();

        let analysis = weft.analyze().unwrap();
        assert_eq!(analysis.graph.edge_count(), 1);
    }
}
