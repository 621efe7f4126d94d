//! Core data types for knot analysis.

use serde::Serialize;

/// A module wrapper discovered in the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRef {
    /// Wrapper initializer name (`init_*`), unique per wrapper.
    pub name: String,
    /// Display-normalized source path.
    pub path: String,
    /// Whether the bundler emitted this wrapper as `async`.
    pub is_async: bool,
}

/// A directed import edge between two normalized module paths.
///
/// `from` is the importer; converting `from`'s import of `to` into a
/// dynamic import removes this edge from eager initialization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// A recommended dynamic-import conversion site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakPoint {
    /// Importer file where the edit lives.
    pub file: String,
    /// The import that should become dynamic.
    pub imports: String,
    /// Cyclic files whose witness chains this edit severs.
    pub affected_files: Vec<String>,
}
