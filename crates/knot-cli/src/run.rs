//! Run orchestration: input loading, cycle-tool invocation, report output.

use crate::config::KnotConfig;
use crate::formatters::{Formatter, HumanFormatter, JsonFormatter};
use crate::progress::ConsoleProgress;
use crate::{Cli, OutputFormat};
use anyhow::{Context, Result};
use knot_core::{
    membership, parse_membership, AnalyzeOptions, Analyzer, CycleMembership, CycleTool,
    CycleToolConfig, NullProgress, ProgressSink,
};
use std::path::PathBuf;
use std::time::Duration;

pub fn run(cli: &Cli) -> Result<()> {
    let config = KnotConfig::load(cli.config.as_deref())?;
    let human = cli.format == OutputFormat::Human;

    let bundle_path = cli
        .bundle
        .clone()
        .unwrap_or_else(|| config.bundle.path.clone());
    if !bundle_path.exists() {
        eprintln!("❌ Bundle not found at: {}", bundle_path.display());
        eprintln!();
        eprintln!("Build the bundle first, or point --bundle at the artifact.");
        return Err(knot_core::Error::BundleNotFound { path: bundle_path }.into());
    }

    if human {
        println!("=== Bundle Async-Cycles Detector ===\n");
        println!("✓ Found bundle at: {}", bundle_path.display());
    }

    let bundle = std::fs::read_to_string(&bundle_path)
        .with_context(|| format!("failed to read bundle: {}", bundle_path.display()))?;
    if human {
        println!(
            "✓ Bundle size: {:.1} MB\n",
            bundle.len() as f64 / 1024.0 / 1024.0
        );
    }

    let (cycle_membership, temp_file) = load_membership(cli, &config, human)?;

    let options = AnalyzeOptions {
        max_cycles: cli
            .max_cycles
            .or(config.analysis.max_cycles)
            .unwrap_or_else(|| AnalyzeOptions::default().max_cycles),
    };

    // JSON output keeps stdout machine-readable; narration only in human
    // mode.
    let progress: Box<dyn ProgressSink> = if human {
        Box::new(ConsoleProgress)
    } else {
        Box::new(NullProgress)
    };
    let report = Analyzer::new(options, progress.as_ref()).analyze(&bundle, &cycle_membership);

    match cli.format {
        OutputFormat::Human => HumanFormatter.format(&report),
        OutputFormat::Json => JsonFormatter.format(&report),
    }

    if let Some(path) = temp_file {
        membership::cleanup(&path);
    }

    Ok(())
}

/// Loads cycle membership, either from an existing file or by running the
/// external cycle tool. Returns the temp file to clean up, if any.
fn load_membership(
    cli: &Cli,
    config: &KnotConfig,
    human: bool,
) -> Result<(CycleMembership, Option<PathBuf>)> {
    if let Some(path) = &cli.cycles_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read cycles file: {}", path.display()))?;
        return Ok((parse_membership(&content), None));
    }

    if human {
        println!("Generating cycle data...");
    }

    let tool = CycleTool::new(CycleToolConfig {
        program: config.cycle_tool.program.clone(),
        base_args: config.cycle_tool.args.clone(),
        timeout: Duration::from_secs(cli.timeout.unwrap_or(config.cycle_tool.timeout_secs)),
    })?;
    let entry_point = cli
        .entry_point
        .clone()
        .unwrap_or_else(|| config.bundle.entry_point.clone());

    let path = tool.generate(&entry_point)?;
    let cycle_membership = tool.load(&path)?;
    if human {
        println!("✓ Found {} files in cycles\n", cycle_membership.len());
    }

    Ok((cycle_membership, Some(path)))
}
