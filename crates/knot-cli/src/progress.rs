//! Console progress narration.
//!
//! The engine emits structured events; this sink turns them into the
//! interleaved status lines a human expects while the run is underway.

use knot_core::{ProgressEvent, ProgressSink};

pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::ModulesScanned {
                modules,
                async_modules,
            } => println!("✓ Found {modules} total modules ({async_modules} async)\n"),
            ProgressEvent::RootsClassified { roots } => {
                if roots > 0 {
                    println!("✓ Found {roots} root async module(s)\n");
                }
            }
            ProgressEvent::GraphBuilt { modules } => {
                println!("✓ Built dependency graph ({modules} modules)");
            }
            ProgressEvent::GraphReversed { modules } => {
                println!("✓ Built reverse graph ({modules} modules)\n");
            }
            ProgressEvent::ChainsTraced { chains } => {
                println!("Found {chains} path(s) from root async modules to cyclic files\n");
            }
            ProgressEvent::SolvingChainCut { chains } => {
                println!("Solving for minimum edge cut across {chains} chain(s)...");
            }
            ProgressEvent::ChainCutSolved { edges } => match edges {
                Some(edges) => println!("✓ Optimal solution: {edges} edge(s) to remove\n"),
                None => println!("⚠️  Chain solver could not find a solution\n"),
            },
            ProgressEvent::SubgraphBuilt {
                async_modules,
                neighbors,
            } => {
                println!("Built subgraph: {async_modules} async modules + {neighbors} neighbors");
            }
            ProgressEvent::CyclesEnumerated {
                kept,
                total,
                truncated,
            } => {
                println!("✓ Found {kept} cycle(s) containing async modules");
                if kept < total {
                    println!("   (filtered from {total} total cycles in subgraph)");
                }
                if truncated {
                    println!("⚠️  Warning: reached the cycle enumeration cap");
                    println!("   Solution may not be globally optimal\n");
                }
            }
            ProgressEvent::FeedbackSolved { edges } => match edges {
                Some(edges) => println!("✓ Minimum feedback arc set: {edges} edge(s)\n"),
                None => println!("⚠️  MFAS solver could not find a solution\n"),
            },
        }
    }
}
