//! Minimum feedback arc set over the async-restricted subgraph.
//!
//! Where the chain cut stops async-ness from reaching cycles, this track
//! breaks the cycles themselves: the smallest edge set whose removal
//! leaves the async-restricted subgraph acyclic.

use crate::cycles::{async_subgraph, enumerate_cycles, retain_async_cycles};
use crate::graph::DependencyGraph;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::solve::{minimum_hitting_set, Recommendation, RecommendationStrategy};
use std::collections::BTreeSet;

/// Feedback-arc-set strategy.
#[derive(Debug)]
pub struct FeedbackArcSet {
    subgraph: DependencyGraph,
    async_paths: BTreeSet<String>,
    max_cycles: usize,
}

impl FeedbackArcSet {
    /// Restricts `graph` to async modules plus one-hop importer context.
    pub fn new(graph: &DependencyGraph, async_paths: BTreeSet<String>, max_cycles: usize) -> Self {
        let subgraph = async_subgraph(graph, &async_paths);
        Self {
            subgraph,
            async_paths,
            max_cycles,
        }
    }

    /// The restricted subgraph this strategy models.
    pub fn subgraph(&self) -> &DependencyGraph {
        &self.subgraph
    }
}

impl RecommendationStrategy for FeedbackArcSet {
    fn name(&self) -> &'static str {
        "feedback arc set"
    }

    fn recommend(&self, sink: &dyn ProgressSink) -> Recommendation {
        // No async modules means nothing to model; skip the search
        // entirely.
        if self.async_paths.is_empty() {
            return Recommendation {
                edges: Some(Vec::new()),
                exhaustive: true,
            };
        }

        sink.event(ProgressEvent::SubgraphBuilt {
            async_modules: self.async_paths.len(),
            neighbors: self.subgraph.len().saturating_sub(self.async_paths.len()),
        });

        let search = enumerate_cycles(&self.subgraph, self.max_cycles);
        let truncated = search.truncated;
        let total = search.cycles.len();
        let cycles = retain_async_cycles(search.cycles, &self.async_paths);
        sink.event(ProgressEvent::CyclesEnumerated {
            kept: cycles.len(),
            total,
            truncated,
        });

        if cycles.is_empty() {
            return Recommendation {
                edges: Some(Vec::new()),
                exhaustive: !truncated,
            };
        }

        let edges = minimum_hitting_set(&cycles);
        sink.event(ProgressEvent::FeedbackSolved {
            edges: edges.as_ref().map(Vec::len),
        });

        Recommendation {
            edges,
            exhaustive: !truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        edges
            .iter()
            .map(|(from, tos)| {
                (
                    from.to_string(),
                    tos.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    fn async_of(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_two_cycle_with_one_async_node_needs_one_edge() {
        // b enters the subgraph as one-hop importer context of a.
        let graph = graph_of(&[("a", &["b"]), ("b", &["a"])]);
        let strategy = FeedbackArcSet::new(&graph, async_of(&["a"]), 100);
        let rec = strategy.recommend(&NullProgress);

        let edges = rec.edges.unwrap();
        assert_eq!(edges.len(), 1);
        assert!(rec.exhaustive);
    }

    #[test]
    fn test_longer_cycle_among_async_modules_needs_one_edge() {
        // Async-ness propagates to every importer, so in practice every
        // member of a cycle containing an async module is itself async.
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["c"]),
            ("c", &["d"]),
            ("d", &["a"]),
        ]);
        let strategy = FeedbackArcSet::new(&graph, async_of(&["a", "b", "c", "d"]), 100);
        let rec = strategy.recommend(&NullProgress);

        let edges = rec.edges.unwrap();
        assert_eq!(edges.len(), 1);
        assert!(rec.exhaustive);
    }

    #[test]
    fn test_no_async_modules_short_circuits() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["a"])]);
        let strategy = FeedbackArcSet::new(&graph, BTreeSet::new(), 100);
        let rec = strategy.recommend(&NullProgress);
        assert_eq!(rec.edges, Some(Vec::new()));
    }

    #[test]
    fn test_cycle_without_async_member_is_ignored() {
        // a↔b form a cycle, but only the acyclic node z is async.
        let graph = graph_of(&[("a", &["b", "z"]), ("b", &["a"]), ("z", &[])]);
        let strategy = FeedbackArcSet::new(&graph, async_of(&["z"]), 100);
        let rec = strategy.recommend(&NullProgress);
        assert_eq!(rec.edges, Some(Vec::new()));
    }

    #[test]
    fn test_two_independent_cycles_need_two_edges() {
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["a"]),
            ("c", &["d"]),
            ("d", &["c"]),
        ]);
        let strategy = FeedbackArcSet::new(&graph, async_of(&["a", "c"]), 100);
        let rec = strategy.recommend(&NullProgress);
        assert_eq!(rec.edges.unwrap().len(), 2);
    }
}
