//! Module dependency graph construction and transforms.

mod build;
mod reverse;

pub use build::build_graph;
pub use reverse::reverse;

use std::collections::{BTreeMap, BTreeSet};

/// Directed dependency graph keyed by normalized module path.
///
/// Ordered maps keep iteration (and therefore traversal tie-breaking and
/// report output) deterministic across runs on identical bundle text.
pub type DependencyGraph = BTreeMap<String, BTreeSet<String>>;

/// Counts distinct directed edges.
pub fn edge_count(graph: &DependencyGraph) -> usize {
    graph.values().map(BTreeSet::len).sum()
}
