//! Edge-removal optimization.
//!
//! Two formulations recommend dynamic-import conversions: a minimum edge
//! cut over traced propagation chains, and a minimum feedback arc set over
//! the async-restricted subgraph. Both reduce to the same binary
//! hitting-set model, and both sit behind a common strategy interface so
//! either can run, be compared, or be disabled without touching the other.

mod hitting_set;

pub mod chains;
pub mod feedback;

pub use chains::ChainCut;
pub use feedback::FeedbackArcSet;
pub use hitting_set::minimum_hitting_set;

use crate::progress::ProgressSink;
use crate::types::Edge;

/// Outcome of one optimization track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Edges to convert to dynamic imports, or `None` when the solver
    /// found no solution.
    pub edges: Option<Vec<Edge>>,
    /// False when a search cap made the result possibly suboptimal.
    pub exhaustive: bool,
}

/// A pluggable edge-recommendation strategy.
pub trait RecommendationStrategy {
    /// Human-facing strategy name.
    fn name(&self) -> &'static str;

    /// Computes the recommendation, reporting progress through `sink`.
    fn recommend(&self, sink: &dyn ProgressSink) -> Recommendation;
}
