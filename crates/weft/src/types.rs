//! Domain types for include-graph analysis.
//!
//! These types represent the core domain model:
//! - **Identity**: `FileIdentity` (canonical path, one value per physical file)
//! - **Snapshot**: `SourceFile` (identity + raw text, owned for one run)
//! - **Derived**: `DependencyGraph`, `NodeMetrics`, `TopoOrder`, `Cycle`
//! - **Result**: `Analysis` (everything one run produced, immutable)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Identity | Canonical `PathBuf` newtype | Two spellings of one file must be one node |
//! | Adjacency | `BTreeMap<_, BTreeSet<_>>` | Deterministic iteration, deduplicated edges |
//! | Ordering | `Vec` + `cyclic` flag | Cycles are tolerated, never an error |

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Diagnostic;

/// Canonical, deduplicated identity of a file.
///
/// Two include directives that resolve to the same physical file map to the
/// same `FileIdentity`: construction via [`FileIdentity::canonicalize`]
/// normalizes case, separators, symlinks and relative segments through
/// `std::fs::canonicalize`. Equality and ordering are over the canonical
/// path, so every deterministic ordering in the crate is path order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileIdentity(PathBuf);

impl FileIdentity {
    /// Resolve a path on disk to its canonical identity.
    ///
    /// # Errors
    ///
    /// Fails if the path does not exist or cannot be canonicalized.
    pub fn canonicalize(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self(std::fs::canonicalize(path)?))
    }

    /// Wrap an already-canonical path without touching the file system.
    ///
    /// No normalization is performed; equality is textual. Intended for
    /// consumers that round-trip identities produced by this crate (and for
    /// building graphs in tests).
    #[must_use]
    pub fn from_canonical(path: PathBuf) -> Self {
        Self(path)
    }

    /// The canonical path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Display label: the file name component of the canonical path.
    #[must_use]
    pub fn label(&self) -> String {
        self.0
            .file_name()
            .map_or_else(|| self.0.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

impl std::fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A file captured for one analysis run: identity plus raw text.
///
/// Owned by the graph builder for the duration of a single run; the text is
/// never re-read once captured.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Canonical identity of the file.
    pub identity: FileIdentity,
    /// Raw text content. Empty when the file was unreadable (a diagnostic
    /// records why).
    pub text: String,
}

impl SourceFile {
    /// Create a source file snapshot.
    #[must_use]
    pub fn new(identity: FileIdentity, text: String) -> Self {
        Self { identity, text }
    }
}

/// Directed file-to-file dependency relation.
///
/// Maps each file to the set of files it depends on (outgoing edges).
/// Every discovered file appears as a key, including files with no
/// dependencies; files that are only ever include targets appear as keys
/// with empty sets. Edges are deduplicated by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<FileIdentity, BTreeSet<FileIdentity>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `node` is present, with no outgoing edges if new.
    pub fn insert_node(&mut self, node: FileIdentity) {
        self.adjacency.entry(node).or_default();
    }

    /// Insert the edge `dependent -> dependency`, creating both nodes.
    ///
    /// Repeated insertion of the same edge is a no-op.
    pub fn insert_edge(&mut self, dependent: FileIdentity, dependency: FileIdentity) {
        self.adjacency
            .entry(dependent)
            .or_default()
            .insert(dependency.clone());
        self.adjacency.entry(dependency).or_default();
    }

    /// Whether `node` is a member of the graph.
    #[must_use]
    pub fn contains(&self, node: &FileIdentity) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Outgoing edges of `node`, if it is a member.
    #[must_use]
    pub fn dependencies_of(&self, node: &FileIdentity) -> Option<&BTreeSet<FileIdentity>> {
        self.adjacency.get(node)
    }

    /// All nodes, in canonical path order.
    pub fn nodes(&self) -> impl Iterator<Item = &FileIdentity> {
        self.adjacency.keys()
    }

    /// All `(node, dependencies)` entries, in canonical path order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileIdentity, &BTreeSet<FileIdentity>)> {
        self.adjacency.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of (deduplicated) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }
}

/// Per-node degree counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeMetrics {
    /// How many distinct files depend on this one.
    pub indegree: usize,
    /// How many distinct files this one depends on.
    pub outdegree: usize,
}

/// A linear ordering of all graph nodes, consistent with the dependency
/// relation where possible.
///
/// On acyclic input this is a topological order: a dependent always
/// precedes its dependencies. When cycles exist, the non-linearizable nodes are
/// appended after all linearizable ones, in canonical path order, and
/// `cyclic` is set. Cycles are routine in header graphs and never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoOrder {
    /// One entry per graph node; dependents before dependencies within the
    /// acyclic prefix.
    pub sequence: Vec<FileIdentity>,
    /// Position where the cyclic fallback segment starts (equals
    /// `sequence.len()` when the graph is acyclic).
    pub acyclic_len: usize,
}

impl TopoOrder {
    /// Whether the graph contained at least one cycle.
    #[must_use]
    pub fn cyclic(&self) -> bool {
        self.acyclic_len < self.sequence.len()
    }

    /// Nodes that could not be linearized, in canonical path order.
    #[must_use]
    pub fn cyclic_fallback(&self) -> &[FileIdentity] {
        &self.sequence[self.acyclic_len..]
    }
}

/// A strongly connected component with more than one member (or a
/// self-loop): files that mutually include each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Members of the cycle, in canonical path order.
    pub members: Vec<FileIdentity>,
}

/// Immutable result of one analysis run over a fixed snapshot.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The file-to-file dependency relation.
    pub graph: DependencyGraph,
    /// Files directly included by the entry translation unit.
    pub entry_set: BTreeSet<FileIdentity>,
    /// Degree counts per graph node.
    pub metrics: BTreeMap<FileIdentity, NodeMetrics>,
    /// Cycle-tolerant topological ordering over all nodes.
    pub order: TopoOrder,
    /// Strongly connected components with more than one member.
    pub cycles: Vec<Cycle>,
    /// Recoverable problems encountered during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Wall-clock time the run took.
    pub duration: Duration,
}
