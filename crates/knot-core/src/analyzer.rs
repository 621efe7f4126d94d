//! The analysis pipeline.
//!
//! A run is a straight line: catalog → roots → graph → reverse → trace →
//! chain cut, with the feedback-arc-set track alongside. Every stage
//! forwards either a populated result or an explicit skip marker; nothing
//! retries or loops. A failure inside one optimization track degrades only
//! that track.

use crate::bundle::{classify_roots, ModuleCatalog};
use crate::cycles::DEFAULT_MAX_CYCLES;
use crate::graph;
use crate::membership::CycleMembership;
use crate::paths::{display_path, membership_key};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::report::{self, ChainReport, FeedbackReport, Report, SkipReason, Summary};
use crate::solve::{ChainCut, FeedbackArcSet, RecommendationStrategy};
use crate::trace;
use std::collections::BTreeSet;

/// Tunables for one run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Cap on cycles collected by the feedback-arc-set track.
    pub max_cycles: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

/// Bundle analyzer.
pub struct Analyzer<'a> {
    options: AnalyzeOptions,
    progress: &'a dyn ProgressSink,
}

impl<'a> Analyzer<'a> {
    pub fn new(options: AnalyzeOptions, progress: &'a dyn ProgressSink) -> Self {
        Self { options, progress }
    }

    /// Analyzes bundle text against the authoritative membership table.
    ///
    /// Never fails: a bundle with zero modules produces a clean report,
    /// and each remediation track degrades independently.
    pub fn analyze(&self, bundle: &str, membership: &CycleMembership) -> Report {
        let catalog = ModuleCatalog::scan(bundle);
        let module_count = catalog.module_count();
        let async_count = catalog.async_count();
        self.progress.event(ProgressEvent::ModulesScanned {
            modules: module_count,
            async_modules: async_count,
        });

        let mut summary = Summary {
            bundle_bytes: bundle.len(),
            module_count,
            async_module_count: async_count,
            files_in_cycles: membership.len(),
            ..Summary::default()
        };

        // No async wrappers anywhere: the bundle is clean, skip every
        // downstream stage.
        if async_count == 0 {
            return Report {
                summary,
                chains: ChainReport::Skipped {
                    reason: SkipReason::NoAsyncModules,
                },
                feedback: FeedbackReport::Skipped {
                    reason: SkipReason::NoAsyncModules,
                },
            };
        }

        let roots = classify_roots(bundle, &catalog);
        summary.root_modules = roots.iter().map(|w| w.to_module_ref()).collect();
        self.progress
            .event(ProgressEvent::RootsClassified { roots: roots.len() });

        let async_in_cycles: Vec<_> = catalog
            .async_wrappers()
            .filter(|w| membership.contains(&membership_key(&w.path, membership)))
            .collect();
        summary.async_in_cycles = async_in_cycles.iter().map(|w| w.to_module_ref()).collect();

        let graph = graph::build_graph(bundle, &catalog);
        summary.edge_count = graph::edge_count(&graph);
        self.progress.event(ProgressEvent::GraphBuilt {
            modules: graph.len(),
        });

        let reversed = graph::reverse(&graph);
        self.progress.event(ProgressEvent::GraphReversed {
            modules: reversed.len(),
        });

        let chains = if async_in_cycles.is_empty() {
            ChainReport::Skipped {
                reason: SkipReason::NoAsyncInCycles,
            }
        } else if roots.is_empty() {
            ChainReport::Skipped {
                reason: SkipReason::NoRootsIdentified,
            }
        } else {
            let root_paths: Vec<String> =
                roots.iter().map(|w| display_path(&w.path)).collect();
            let witness = trace::trace_all(&reversed, &root_paths, membership);
            self.progress.event(ProgressEvent::ChainsTraced {
                chains: witness.len(),
            });

            let strategy = ChainCut::from_witness_chains(&witness);
            match strategy.recommend(self.progress).edges {
                None => ChainReport::NoSolution,
                Some(edges) if edges.is_empty() => ChainReport::Clean,
                Some(edges) => ChainReport::BreakPoints {
                    chains: witness.len(),
                    break_points: report::aggregate_break_points(&edges, &witness),
                },
            }
        };

        // The feedback track is independent of root identification: it
        // runs whenever async modules exist at all.
        let async_paths: BTreeSet<String> = catalog
            .async_wrappers()
            .map(|w| display_path(&w.path))
            .collect();
        let strategy = FeedbackArcSet::new(&graph, async_paths, self.options.max_cycles);
        let recommendation = strategy.recommend(self.progress);
        let feedback = match recommendation.edges {
            None => FeedbackReport::NoSolution,
            Some(edges) if edges.is_empty() => FeedbackReport::Acyclic,
            Some(edges) => FeedbackReport::Edges {
                edges,
                exhaustive: recommendation.exhaustive,
            },
        };

        Report {
            summary,
            chains,
            feedback,
        }
    }
}
