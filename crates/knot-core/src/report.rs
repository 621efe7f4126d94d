//! Report model: two independent remediation views plus run context.
//!
//! Every pipeline stage forwards either a populated result or an explicit
//! skip marker; the report is where those markers land, so formatters can
//! always say *why* a view is empty instead of printing an empty list.

use crate::trace::WitnessChains;
use crate::types::{BreakPoint, Edge, ModuleRef};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Why a track produced no recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The bundle contains no async wrappers at all.
    NoAsyncModules,
    /// No async module sits inside a known cycle.
    NoAsyncInCycles,
    /// Async modules exist but none could be classified as a root (they
    /// may all await each other inside a cycle).
    NoRootsIdentified,
}

/// Chain-based remediation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainReport {
    /// Track skipped before modeling.
    Skipped { reason: SkipReason },
    /// Chains existed but the solver found no solution.
    NoSolution,
    /// No actionable break points; the chains are already broken.
    Clean,
    /// Optimal break points.
    BreakPoints {
        chains: usize,
        break_points: Vec<BreakPoint>,
    },
}

/// Feedback-arc-set remediation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedbackReport {
    /// Track skipped before modeling.
    Skipped { reason: SkipReason },
    /// Cycles existed but the solver found no solution.
    NoSolution,
    /// No cycle among async modules; the restricted subgraph is acyclic.
    Acyclic,
    /// Minimum feedback arc set.
    Edges { edges: Vec<Edge>, exhaustive: bool },
}

/// Run-level context counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub bundle_bytes: usize,
    pub module_count: usize,
    pub async_module_count: usize,
    pub edge_count: usize,
    /// Files the external detector places inside cycles.
    pub files_in_cycles: usize,
    /// Modules carrying the genuine top-level suspend point.
    pub root_modules: Vec<ModuleRef>,
    /// Async modules that sit inside a known cycle.
    pub async_in_cycles: Vec<ModuleRef>,
}

/// Complete analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub chains: ChainReport,
    pub feedback: FeedbackReport,
}

impl Report {
    /// True when the bundle has no async wrappers at all.
    pub fn is_clean(&self) -> bool {
        self.summary.async_module_count == 0
    }
}

/// Maps solved edges back to break points.
///
/// For each edge, collects every witness chain (hence cyclic file) whose
/// importer-order form contains it. Break points are sorted by descending
/// affected-file count; equal-impact entries order lexicographically by
/// `(file, imports)` so reports are deterministic.
pub fn aggregate_break_points(edges: &[Edge], witness: &WitnessChains) -> Vec<BreakPoint> {
    let mut affected: BTreeMap<&Edge, BTreeSet<&str>> = BTreeMap::new();

    for edge in edges {
        let entry = affected.entry(edge).or_default();
        for (cyclic_file, chain) in witness {
            let importer_order: Vec<&str> = chain.iter().rev().map(String::as_str).collect();
            let contains = importer_order
                .windows(2)
                .any(|pair| pair[0] == edge.from && pair[1] == edge.to);
            if contains {
                entry.insert(cyclic_file.as_str());
            }
        }
    }

    let mut break_points: Vec<BreakPoint> = affected
        .into_iter()
        .map(|(edge, files)| BreakPoint {
            file: edge.from.clone(),
            imports: edge.to.clone(),
            affected_files: files.into_iter().map(str::to_string).collect(),
        })
        .collect();

    break_points.sort_by(|a, b| {
        b.affected_files
            .len()
            .cmp(&a.affected_files.len())
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.imports.cmp(&b.imports))
    });

    break_points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(entries: &[(&str, &[&str])]) -> WitnessChains {
        entries
            .iter()
            .map(|(file, chain)| {
                (
                    file.to_string(),
                    chain.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_break_point_collects_affected_files() {
        // Both chains share the mid→root edge in importer order.
        let witness = witness(&[
            ("cyc1", &["root", "mid", "cyc1"]),
            ("cyc2", &["root", "mid", "cyc2"]),
        ]);
        let edges = vec![Edge::new("mid", "root")];

        let break_points = aggregate_break_points(&edges, &witness);
        assert_eq!(break_points.len(), 1);
        assert_eq!(break_points[0].file, "mid");
        assert_eq!(break_points[0].imports, "root");
        assert_eq!(break_points[0].affected_files.len(), 2);
    }

    #[test]
    fn test_break_points_sorted_by_impact() {
        let witness = witness(&[
            ("cyc1", &["root", "a", "cyc1"]),
            ("cyc2", &["root", "a", "cyc2"]),
            ("cyc3", &["other", "b", "cyc3"]),
        ]);
        let edges = vec![Edge::new("b", "other"), Edge::new("a", "root")];

        let break_points = aggregate_break_points(&edges, &witness);
        assert_eq!(break_points[0].file, "a");
        assert_eq!(break_points[0].affected_files.len(), 2);
        assert_eq!(break_points[1].file, "b");
        assert_eq!(break_points[1].affected_files.len(), 1);
    }

    #[test]
    fn test_no_edges_no_break_points() {
        let witness = witness(&[("cyc", &["root", "cyc"])]);
        assert!(aggregate_break_points(&[], &witness).is_empty());
    }

    #[test]
    fn test_clean_report_flag() {
        let report = Report {
            summary: Summary::default(),
            chains: ChainReport::Skipped {
                reason: SkipReason::NoAsyncModules,
            },
            feedback: FeedbackReport::Skipped {
                reason: SkipReason::NoAsyncModules,
            },
        };
        assert!(report.is_clean());
    }
}
