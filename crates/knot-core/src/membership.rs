//! Authoritative cycle membership: external tool invocation and parsing.
//!
//! Whole-graph cycle detection belongs to a separate analysis script; this
//! module runs it, parses its edge-table output, and flattens the result
//! into the set of files known to sit inside an import cycle. The chain
//! track never infers cycle membership on its own.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Files the external detector places inside at least one import cycle.
pub type CycleMembership = BTreeSet<String>;

/// Parses the cycle tool's edge-table output.
///
/// The format is a header line declaring the table followed by two-space
/// indented `from,to` rows:
///
/// ```text
/// edges[2]{from,to}:
///   core/render.ts,core/layout.ts
///   core/layout.ts,core/render.ts
/// ```
///
/// Lines not matching the row shape are ignored, which keeps the parser
/// forward-compatible with extra metadata.
pub fn parse_membership(content: &str) -> CycleMembership {
    let mut files = CycleMembership::new();
    for line in content.lines() {
        let Some(row) = line.strip_prefix("  ") else {
            continue;
        };
        let mut parts = row.trim().split(',');
        if let Some(from) = parts.next() {
            if !from.is_empty() {
                files.insert(from.to_string());
            }
        }
        if let Some(to) = parts.next() {
            if !to.is_empty() {
                files.insert(to.to_string());
            }
        }
    }
    files
}

/// Configuration for the external cycle tool.
#[derive(Debug, Clone)]
pub struct CycleToolConfig {
    /// Program that runs the whole-graph analysis (e.g. `deno`).
    pub program: PathBuf,
    /// Arguments placed before the entry point (subcommand, permission
    /// flags, script path).
    pub base_args: Vec<String>,
    /// Kill the tool after this long; expiry is treated identically to a
    /// failed subprocess.
    pub timeout: Duration,
}

/// Runs the whole-graph cycle detector and loads its output.
///
/// The pipeline is otherwise synchronous; this is its only asynchronous
/// boundary, bridged with an owned single-thread runtime.
#[derive(Debug)]
pub struct CycleTool {
    config: CycleToolConfig,
    runtime: tokio::runtime::Runtime,
}

impl CycleTool {
    /// Creates the tool wrapper.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be initialized.
    pub fn new(config: CycleToolConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { config, runtime })
    }

    /// Regenerates cycle data for `entry_point` and returns the temp file
    /// the tool wrote.
    ///
    /// stdout is ignored on success.
    ///
    /// # Errors
    /// Nonzero exit and timeout are both fatal; stderr is surfaced
    /// verbatim.
    pub fn generate(&self, entry_point: &Path) -> Result<PathBuf> {
        let out_file =
            std::env::temp_dir().join(format!("knot-cycles-{}.toon", std::process::id()));
        let timeout = self.config.timeout;

        tracing::debug!(
            program = %self.config.program.display(),
            entry = %entry_point.display(),
            "regenerating cycle data"
        );

        let output = self.runtime.block_on(async {
            let mut command = tokio::process::Command::new(&self.config.program);
            command
                .args(&self.config.base_args)
                .arg(entry_point)
                .arg("--simplify")
                .arg("--toon")
                .arg(&out_file);
            tokio::time::timeout(timeout, command.output()).await
        });

        let output = match output {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::CycleToolTimeout {
                    seconds: timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            let status = output
                .status
                .code()
                .map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {c}"));
            return Err(Error::CycleTool {
                status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(out_file)
    }

    /// Reads and parses a membership file.
    pub fn load(&self, path: &Path) -> Result<CycleMembership> {
        Ok(parse_membership(&std::fs::read_to_string(path)?))
    }
}

/// Deletes the temp membership file. Best effort: cleanup failure is
/// deliberately ignored.
pub fn cleanup(path: &Path) {
    let _ = std::fs::remove_file(path);
}
