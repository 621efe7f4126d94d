//! Chain-based minimum edge cut.
//!
//! Witness chains arrive root-first from the tracer, but the remediation
//! edit always lives in the importer ("importer stops eagerly importing
//! importee" is the only valid fix direction), so each chain is flipped
//! into importer order before modeling.

use crate::progress::{ProgressEvent, ProgressSink};
use crate::solve::{minimum_hitting_set, Recommendation, RecommendationStrategy};
use crate::trace::WitnessChains;

/// Minimum edge cut across async-propagation chains.
#[derive(Debug)]
pub struct ChainCut {
    chains: Vec<Vec<String>>,
}

impl ChainCut {
    /// Builds the strategy from traced witness chains, flipping each into
    /// importer order.
    pub fn from_witness_chains(witness: &WitnessChains) -> Self {
        let chains = witness
            .values()
            .map(|chain| {
                let mut importer_order = chain.clone();
                importer_order.reverse();
                importer_order
            })
            .collect();
        Self { chains }
    }

    /// The modeled chains, importer-first.
    pub fn chains(&self) -> &[Vec<String>] {
        &self.chains
    }
}

impl RecommendationStrategy for ChainCut {
    fn name(&self) -> &'static str {
        "chain edge cut"
    }

    fn recommend(&self, sink: &dyn ProgressSink) -> Recommendation {
        if self.chains.is_empty() {
            return Recommendation {
                edges: Some(Vec::new()),
                exhaustive: true,
            };
        }

        sink.event(ProgressEvent::SolvingChainCut {
            chains: self.chains.len(),
        });
        let edges = minimum_hitting_set(&self.chains);
        sink.event(ProgressEvent::ChainCutSolved {
            edges: edges.as_ref().map(Vec::len),
        });

        Recommendation {
            edges,
            exhaustive: true,
        }
    }
}
