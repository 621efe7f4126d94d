//! Human-readable report formatter.

use knot_core::{ChainReport, FeedbackReport, Report, SkipReason};

pub struct HumanFormatter;

pub fn print_report(report: &Report) {
    if report.is_clean() {
        println!("✅ No async modules found. Bundle is clean!");
        return;
    }

    print_roots(report);
    print_async_in_cycles(report);
    print_chains(report);
    print_feedback(report);
}

fn print_roots(report: &Report) {
    println!("=== ROOT ASYNC MODULES ===");
    println!("(Modules with actual top-level await)\n");

    if report.summary.root_modules.is_empty() {
        println!("⚠️  Could not identify root modules (may be in a cycle)\n");
        return;
    }
    for module in &report.summary.root_modules {
        println!("  • {}", module.path);
    }
    println!();
}

fn print_async_in_cycles(report: &Report) {
    println!("=== ASYNC MODULES IN CYCLES ===\n");

    if report.summary.async_in_cycles.is_empty() {
        println!("✅ No async modules found in cycles!");
        println!("   The bundle should not have async initialization issues.\n");
        return;
    }

    println!("⚠️  Found async modules in import cycles. These cause build failures");
    println!("   when they form cycles among themselves; see the analysis below.\n");
    for module in &report.summary.async_in_cycles {
        println!("  {:<30} {}", module.name, module.path);
    }
    println!();
}

fn print_chains(report: &Report) {
    println!("=== IMPORT CHAIN ANALYSIS ===\n");

    match &report.chains {
        ChainReport::Skipped { reason } => match reason {
            SkipReason::NoAsyncInCycles => {
                println!("✅ No async modules in cycles - no chain analysis needed.\n");
            }
            SkipReason::NoRootsIdentified => {
                println!("⚠️  Could not trace chains (no root async modules identified)\n");
            }
            SkipReason::NoAsyncModules => {}
        },
        ChainReport::NoSolution => {
            println!("⚠️  No solution found for the chain model.\n");
        }
        ChainReport::Clean => {
            println!("✅ No actionable break points identified.");
            println!("   This may mean the async chains have already been broken.\n");
        }
        ChainReport::BreakPoints {
            chains,
            break_points,
        } => {
            println!(
                "Found {} recommended break point(s) across {} chain(s):\n",
                break_points.len(),
                chains
            );
            for (idx, bp) in break_points.iter().enumerate() {
                println!(
                    "{}. Break point (affects {} cyclic file(s)):\n",
                    idx + 1,
                    bp.affected_files.len()
                );
                println!("   File: {}", bp.file);
                println!("   Currently imports: {}\n", bp.imports);
                println!("   💡 Recommendation:");
                println!("      Make this import dynamic to break the async propagation chain");
                println!("      before it reaches the cyclic code.\n");
                println!("   Affected cyclic files ({}):", bp.affected_files.len());
                for file in bp.affected_files.iter().take(5) {
                    println!("     • {file}");
                }
                if bp.affected_files.len() > 5 {
                    println!("     ... and {} more", bp.affected_files.len() - 5);
                }
                println!();
            }
        }
    }
}

fn print_feedback(report: &Report) {
    println!("=== ALTERNATIVE: BREAK CYCLES DIRECTLY ===\n");

    match &report.feedback {
        FeedbackReport::Skipped { .. } => {}
        FeedbackReport::NoSolution => {
            println!("⚠️  No solution found for the feedback-arc-set model.\n");
        }
        FeedbackReport::Acyclic => {
            println!("✅ No cycles found entirely among async modules!");
            println!("   The async modules are in cycles with non-async code, which is fine.");
            println!("   The build should succeed without changes.\n");
        }
        FeedbackReport::Edges { edges, exhaustive } => {
            println!("Instead of breaking async propagation chains, you can break");
            println!(
                "the cycles themselves by making {} import(s) dynamic:\n",
                edges.len()
            );
            for (idx, edge) in edges.iter().enumerate() {
                println!("{}. File: {}", idx + 1, edge.from);
                println!("   Currently imports: {}", edge.to);
                println!("   💡 Make this import dynamic to help break cycles\n");
            }
            println!("This is the minimum feedback arc set: the fewest edges whose");
            println!("removal makes the async subgraph acyclic.");
            if !exhaustive {
                println!();
                println!("⚠️  The cycle cap was reached; this set may not be globally optimal.");
            }
            println!();
            println!("💡 TIP: If you cannot fix all recommended edges at once:");
            println!("   1. Fix some of the recommended dynamic imports");
            println!("   2. Rebuild the bundle");
            println!("   3. Run this tool again - the recommendations may change!");
            println!("   Breaking some cycles can eliminate others, reducing the total work.\n");
        }
    }
}
