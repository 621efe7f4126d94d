//! Structured progress events.
//!
//! Computation never prints. Stages emit events through a sink owned by
//! the presentation layer, which keeps the optimization core testable and
//! the console narration replaceable.

/// A progress event emitted during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Wrapper catalog scanned.
    ModulesScanned {
        modules: usize,
        async_modules: usize,
    },
    /// Root-async classification finished.
    RootsClassified { roots: usize },
    /// Dependency graph built from wrapper bodies.
    GraphBuilt { modules: usize },
    /// Graph reversed for importer-direction traversal.
    GraphReversed { modules: usize },
    /// Witness chains traced from roots into cyclic files.
    ChainsTraced { chains: usize },
    /// Chain-cut model being solved.
    SolvingChainCut { chains: usize },
    /// Chain-cut solve finished; `None` means no solution was found.
    ChainCutSolved { edges: Option<usize> },
    /// Async-restricted subgraph assembled.
    SubgraphBuilt {
        async_modules: usize,
        neighbors: usize,
    },
    /// Cycle enumeration finished; `kept` survived the async filter.
    CyclesEnumerated {
        kept: usize,
        total: usize,
        truncated: bool,
    },
    /// Feedback-arc-set solve finished; `None` means no solution.
    FeedbackSolved { edges: Option<usize> },
}

/// Consumer of progress events.
pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn event(&self, _event: ProgressEvent) {}
}
