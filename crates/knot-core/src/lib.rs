//! knot-core: bundle async-cycle analysis engine.
//!
//! Detects when a bundler marks module wrappers as async due to transitive
//! top-level await, and those async modules sit in import cycles, causing
//! bundling errors. The engine recommends the minimal set of import sites
//! to convert to dynamic imports so the bundle builds again.
//!
//! The pipeline is a straight line: scan the bundle for module wrappers,
//! classify which async wrappers contain the genuine top-level suspend
//! point, build the inter-module dependency graph, reverse it, trace async
//! propagation from roots into known cycles, and run two independent
//! optimization tracks (minimum edge cut over traced chains, minimum
//! feedback arc set over the async-restricted subgraph). Every stage
//! forwards either a populated result or an explicit skip marker into the
//! final [`report::Report`].

pub mod analyzer;
pub mod bundle;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod membership;
pub mod paths;
pub mod progress;
pub mod report;
pub mod solve;
pub mod trace;
pub mod types;

pub use analyzer::{AnalyzeOptions, Analyzer};
pub use error::{Error, Result};
pub use membership::{parse_membership, CycleMembership, CycleTool, CycleToolConfig};
pub use progress::{NullProgress, ProgressEvent, ProgressSink};
pub use report::{ChainReport, FeedbackReport, Report, SkipReason, Summary};
pub use types::{BreakPoint, Edge, ModuleRef};
