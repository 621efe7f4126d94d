//! Bounded cycle enumeration over the async-restricted subgraph.
//!
//! Only the feedback-arc-set track computes cycles of its own; the chain
//! track consumes the authoritative membership table instead. The subgraph
//! keeps every async module with its outgoing edges plus one hop of
//! importer context, which is enough to close any cycle an async module
//! participates in without paying for whole-graph enumeration.

use crate::graph::DependencyGraph;
use std::collections::BTreeSet;

/// Default cap on collected cycles; pathological graphs can hold
/// exponentially many.
pub const DEFAULT_MAX_CYCLES: usize = 1000;

/// Result of a bounded cycle search.
#[derive(Debug)]
pub struct CycleSearch {
    /// Each cycle as a node sequence with the closing node repeated last,
    /// so consecutive pairs cover every cycle edge.
    pub cycles: Vec<Vec<String>>,
    /// True when the cap stopped the search early; downstream results are
    /// then possibly suboptimal.
    pub truncated: bool,
}

/// Builds the async-restricted subgraph: async nodes with their outgoing
/// edges (clipped to nodes the full graph knows), plus every node with a
/// direct edge into an async node.
pub fn async_subgraph(graph: &DependencyGraph, async_paths: &BTreeSet<String>) -> DependencyGraph {
    let mut subgraph = DependencyGraph::new();

    for path in async_paths {
        if let Some(deps) = graph.get(path) {
            let clipped: BTreeSet<String> = deps
                .iter()
                .filter(|dep| graph.contains_key(dep.as_str()))
                .cloned()
                .collect();
            subgraph.insert(path.clone(), clipped);
        }
    }

    for (from, deps) in graph {
        for to in deps {
            if async_paths.contains(to) {
                subgraph.entry(from.clone()).or_default().insert(to.clone());
            }
        }
    }

    subgraph
}

/// Enumerates simple cycles by DFS with an explicit recursion-stack
/// membership test, stopping at `max_cycles`.
pub fn enumerate_cycles(graph: &DependencyGraph, max_cycles: usize) -> CycleSearch {
    let mut search = Search {
        graph,
        max_cycles,
        cycles: Vec::new(),
        visited: BTreeSet::new(),
        on_stack: BTreeSet::new(),
        stack: Vec::new(),
    };

    for node in graph.keys() {
        if search.cycles.len() >= max_cycles {
            break;
        }
        if !search.visited.contains(node) {
            search.dfs(node);
        }
    }

    let truncated = search.cycles.len() >= max_cycles;
    if truncated {
        tracing::warn!(max_cycles, "cycle cap reached, result is non-exhaustive");
    }

    CycleSearch {
        cycles: search.cycles,
        truncated,
    }
}

/// Drops cycles containing no async module. The one-hop importer context
/// can close purely synchronous loops; those are artifacts of subgraph
/// construction, not async-caused cycles.
pub fn retain_async_cycles(
    cycles: Vec<Vec<String>>,
    async_paths: &BTreeSet<String>,
) -> Vec<Vec<String>> {
    cycles
        .into_iter()
        .filter(|cycle| cycle.iter().any(|node| async_paths.contains(node)))
        .collect()
}

struct Search<'g> {
    graph: &'g DependencyGraph,
    max_cycles: usize,
    cycles: Vec<Vec<String>>,
    visited: BTreeSet<String>,
    on_stack: BTreeSet<String>,
    stack: Vec<String>,
}

impl<'g> Search<'g> {
    fn dfs(&mut self, node: &'g str) {
        if self.cycles.len() >= self.max_cycles {
            return;
        }

        self.visited.insert(node.to_string());
        self.on_stack.insert(node.to_string());
        self.stack.push(node.to_string());

        if let Some(neighbors) = self.graph.get(node) {
            for neighbor in neighbors {
                if self.cycles.len() >= self.max_cycles {
                    break;
                }
                if !self.visited.contains(neighbor) {
                    self.dfs(neighbor);
                } else if self.on_stack.contains(neighbor) {
                    // Revisited a node on the current stack: the slice
                    // from that node to the top plus the closing edge is
                    // a cycle.
                    if let Some(start) = self.stack.iter().position(|n| n == neighbor) {
                        let mut cycle = self.stack[start..].to_vec();
                        cycle.push(neighbor.clone());
                        self.cycles.push(cycle);
                    }
                }
            }
        }

        self.stack.pop();
        self.on_stack.remove(node);
    }
}
