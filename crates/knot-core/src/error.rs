//! Error types for knot-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for knot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an analysis run.
///
/// Only the absence of required raw input is fatal. Everything else
/// degrades: an unparsable wrapper body falls back to regex extraction, an
/// empty root set skips the chain track, and an infeasible solve reports
/// "no solution found" for its track while the sibling track continues.
#[derive(Debug, Error)]
pub enum Error {
    /// The bundled build artifact does not exist.
    #[error("Bundle not found: {path}")]
    BundleNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The cycle tool exited with a failure status.
    #[error("Cycle tool failed ({status}): {stderr}")]
    CycleTool {
        /// Rendered exit status ("exit code 1", "killed by signal").
        status: String,
        /// The tool's stderr, surfaced verbatim.
        stderr: String,
    },

    /// The cycle tool exceeded its configured timeout.
    #[error("Cycle tool timed out after {seconds}s")]
    CycleToolTimeout {
        /// The timeout that expired.
        seconds: u64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
