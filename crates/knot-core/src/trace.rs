//! Async-propagation tracing.
//!
//! BFS from each root over the *reversed* graph answers "which files
//! transitively import this root and are therefore forced async". A branch
//! stops the moment it lands on a file the membership table places inside
//! a cycle: cycles are targets, not territory to traverse.

use crate::graph::DependencyGraph;
use crate::membership::CycleMembership;
use crate::paths::membership_key;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Witness chains keyed by cyclic file, root-first.
pub type WitnessChains = BTreeMap<String, Vec<String>>;

/// Traces propagation chains from one root.
///
/// Paths are explored in breadth order, so the first arrival at a cyclic
/// file is a shortest witness; later equal-length arrivals are discarded.
pub fn trace_from_root(
    reversed: &DependencyGraph,
    root: &str,
    membership: &CycleMembership,
) -> WitnessChains {
    let mut chains = WitnessChains::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<Vec<String>> = VecDeque::new();
    queue.push_back(vec![root.to_string()]);

    while let Some(path) = queue.pop_front() {
        let Some(current) = path.last().cloned() else {
            continue;
        };
        if !visited.insert(current.clone()) {
            continue;
        }

        let key = membership_key(&current, membership);
        if membership.contains(&key) {
            keep_shorter(&mut chains, key, path);
            continue;
        }

        if let Some(importers) = reversed.get(&current) {
            for importer in importers {
                if !visited.contains(importer) {
                    let mut next = path.clone();
                    next.push(importer.clone());
                    queue.push_back(next);
                }
            }
        }
    }

    chains
}

/// Merges chains from every root, keeping the globally shortest witness
/// per cyclic file.
pub fn trace_all(
    reversed: &DependencyGraph,
    roots: &[String],
    membership: &CycleMembership,
) -> WitnessChains {
    let mut all = WitnessChains::new();
    for root in roots {
        for (cyclic_file, chain) in trace_from_root(reversed, root, membership) {
            keep_shorter(&mut all, cyclic_file, chain);
        }
    }
    all
}

fn keep_shorter(chains: &mut WitnessChains, key: String, chain: Vec<String>) {
    match chains.get(&key) {
        Some(existing) if existing.len() <= chain.len() => {}
        _ => {
            chains.insert(key, chain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reversed_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
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

    fn membership_of(files: &[&str]) -> CycleMembership {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_shortest_witness_wins() {
        // Two equal-length routes from r to b; either is acceptable, but
        // the witness must have exactly two edges.
        let reversed = reversed_of(&[("r", &["a", "c"]), ("a", &["b"]), ("c", &["b"]), ("b", &[])]);
        let membership = membership_of(&["b"]);

        let chains = trace_from_root(&reversed, "r", &membership);
        let chain = &chains["b"];
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.first().map(String::as_str), Some("r"));
        assert_eq!(chain.last().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_branch_stops_at_cyclic_file() {
        // b is cyclic and imports d; d must never be reached through b.
        let reversed = reversed_of(&[("r", &["b"]), ("b", &["d"]), ("d", &[])]);
        let membership = membership_of(&["b", "d"]);

        let chains = trace_from_root(&reversed, "r", &membership);
        assert!(chains.contains_key("b"));
        assert!(!chains.contains_key("d"));
    }

    #[test]
    fn test_root_inside_cycle_yields_single_node_chain() {
        let reversed = reversed_of(&[("r", &["a"]), ("a", &[])]);
        let membership = membership_of(&["r"]);

        let chains = trace_from_root(&reversed, "r", &membership);
        assert_eq!(chains["r"], vec!["r".to_string()]);
    }

    #[test]
    fn test_trace_all_keeps_global_shortest() {
        // r1 reaches b in three nodes, r2 in two.
        let reversed = reversed_of(&[
            ("r1", &["a"]),
            ("a", &["b"]),
            ("r2", &["b"]),
            ("b", &[]),
        ]);
        let membership = membership_of(&["b"]);

        let chains = trace_all(
            &reversed,
            &["r1".to_string(), "r2".to_string()],
            &membership,
        );
        assert_eq!(chains["b"].len(), 2);
    }

    #[test]
    fn test_membership_normalization_applies() {
        // Graph keys carry the src/ prefix, membership rows do not.
        let reversed = reversed_of(&[("src/r.ts", &["src/b.ts"]), ("src/b.ts", &[])]);
        let membership = membership_of(&["b.ts"]);

        let chains = trace_from_root(&reversed, "src/r.ts", &membership);
        assert_eq!(
            chains["b.ts"],
            vec!["src/r.ts".to_string(), "src/b.ts".to_string()]
        );
    }
}
