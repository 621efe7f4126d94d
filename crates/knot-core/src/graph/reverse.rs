//! Edge-direction inversion.

use crate::graph::DependencyGraph;

/// Reverses every edge: "A imports B" becomes "B is imported by A".
///
/// Every node appearing as either endpoint of the input is present as a
/// key of the output (with an empty neighbor set if nothing reverses into
/// it), so traversal never dead-ends on a missing entry.
pub fn reverse(graph: &DependencyGraph) -> DependencyGraph {
    let mut reversed = DependencyGraph::new();

    for node in graph.keys() {
        reversed.entry(node.clone()).or_default();
    }

    for (from, deps) in graph {
        for to in deps {
            reversed.entry(to.clone()).or_default().insert(from.clone());
        }
    }

    reversed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge_count;

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

    #[test]
    fn test_reverse_flips_edges() {
        let graph = graph_of(&[("a", &["b", "c"]), ("b", &["c"])]);
        let reversed = reverse(&graph);

        assert!(reversed["b"].contains("a"));
        assert!(reversed["c"].contains("a"));
        assert!(reversed["c"].contains("b"));
        assert!(reversed["a"].is_empty());
    }

    #[test]
    fn test_every_endpoint_becomes_a_key() {
        // "c" only ever appears as a target.
        let graph = graph_of(&[("a", &["c"])]);
        let reversed = reverse(&graph);
        assert!(reversed.contains_key("a"));
        assert!(reversed.contains_key("c"));
    }

    #[test]
    fn test_reversal_is_an_involution() {
        let graph = graph_of(&[("a", &["b", "c"]), ("b", &["c"]), ("d", &[])]);
        let twice = reverse(&reverse(&graph));

        assert_eq!(edge_count(&twice), edge_count(&graph));
        for (from, deps) in &graph {
            for to in deps {
                assert!(twice[from].contains(to));
            }
        }
    }
}
