//! TOML configuration loaded from `.knot.toml`.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// knot configuration loaded from `.knot.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnotConfig {
    /// Bundle input configuration.
    #[serde(default)]
    pub bundle: BundleSection,

    /// External cycle-tool configuration.
    #[serde(default)]
    pub cycle_tool: CycleToolSection,

    /// Analysis options.
    #[serde(default)]
    pub analysis: AnalysisSection,
}

/// Bundle input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleSection {
    /// Path to the bundled artifact.
    #[serde(default = "default_bundle_path")]
    pub path: PathBuf,

    /// Entry point handed to the cycle tool.
    #[serde(default = "default_entry_point")]
    pub entry_point: PathBuf,
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            path: default_bundle_path(),
            entry_point: default_entry_point(),
        }
    }
}

/// External cycle-tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleToolSection {
    /// Program that runs the whole-graph cycle analysis.
    #[serde(default = "default_tool_program")]
    pub program: PathBuf,

    /// Arguments placed before the entry point.
    #[serde(default = "default_tool_args")]
    pub args: Vec<String>,

    /// Seconds before the tool is killed.
    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

impl Default for CycleToolSection {
    fn default() -> Self {
        Self {
            program: default_tool_program(),
            args: default_tool_args(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

/// Analysis behavior configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisSection {
    /// Cap on cycles collected by the feedback-arc-set track.
    #[serde(default)]
    pub max_cycles: Option<usize>,
}

fn default_bundle_path() -> PathBuf {
    PathBuf::from("dist/bundle.js")
}

fn default_entry_point() -> PathBuf {
    PathBuf::from("src/main.ts")
}

fn default_tool_program() -> PathBuf {
    PathBuf::from("deno")
}

fn default_tool_args() -> Vec<String> {
    vec![
        "run".to_string(),
        "--allow-all".to_string(),
        "tools/explain-all-cycles.ts".to_string(),
    ]
}

fn default_tool_timeout() -> u64 {
    120
}

impl KnotConfig {
    /// Loads configuration.
    ///
    /// An explicitly passed path must exist; otherwise `.knot.toml` in the
    /// working directory is used when present, and defaults apply when it
    /// is not.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(".knot.toml");
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KnotConfig::default();
        assert_eq!(config.bundle.path, PathBuf::from("dist/bundle.js"));
        assert_eq!(config.cycle_tool.timeout_secs, 120);
        assert_eq!(config.analysis.max_cycles, None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: KnotConfig = toml::from_str(
            r#"
[bundle]
path = "out/app.js"

[analysis]
max_cycles = 250
"#,
        )
        .unwrap();

        assert_eq!(config.bundle.path, PathBuf::from("out/app.js"));
        assert_eq!(config.bundle.entry_point, PathBuf::from("src/main.ts"));
        assert_eq!(config.cycle_tool.program, PathBuf::from("deno"));
        assert_eq!(config.analysis.max_cycles, Some(250));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(KnotConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knot.toml");
        std::fs::write(&path, "[cycle_tool]\ntimeout_secs = 5\n").unwrap();

        let config = KnotConfig::load(Some(&path)).unwrap();
        assert_eq!(config.cycle_tool.timeout_secs, 5);
    }
}
