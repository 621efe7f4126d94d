//! Module-wrapper catalog extraction.
//!
//! esbuild emits one lazy wrapper per source module:
//!
//! ```text
//! var init_foo = __esm({
//!   "src/foo.ts"() { ... }
//! });
//! ```
//!
//! with an `async` keyword before the path when the module (or anything it
//! transitively imports) top-level awaits.

use crate::bundle::body;
use crate::paths::display_path;
use crate::types::ModuleRef;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Matches both wrapper variants, capturing the initializer name, the
/// optional `async` marker, and the module path.
static WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var (init_\w+) = __esm\(\{\s*(async\s+)?"([^"]+)"\(\)\s*\{"#)
        .expect("wrapper pattern is a valid regex")
});

/// One `__esm` wrapper occurrence in the bundle.
#[derive(Debug, Clone)]
pub struct Wrapper {
    /// Initializer function name (`init_*`).
    pub name: String,
    /// Module path exactly as written in the bundle.
    pub path: String,
    /// Whether the wrapper carries the `async` keyword.
    pub is_async: bool,
    /// Byte offset just past the body's opening brace.
    body_start: usize,
}

impl Wrapper {
    /// Isolates this wrapper's body text from the bundle.
    ///
    /// Returns `None` when the wrapper is truncated past recovery.
    pub fn body<'a>(&self, bundle: &'a str) -> Option<&'a str> {
        body::isolate(bundle, self.body_start)
    }

    /// Converts to the public data-model form with a display path.
    pub fn to_module_ref(&self) -> ModuleRef {
        ModuleRef {
            name: self.name.clone(),
            path: display_path(&self.path),
            is_async: self.is_async,
        }
    }
}

/// All module wrappers found in a bundle, in occurrence order.
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    wrappers: Vec<Wrapper>,
}

impl ModuleCatalog {
    /// Scans bundle text for module wrappers.
    ///
    /// Wrapper text mangled by minification or truncation fails to match
    /// and is skipped; that is expected, not an error.
    pub fn scan(bundle: &str) -> Self {
        let mut wrappers = Vec::new();
        for caps in WRAPPER_RE.captures_iter(bundle) {
            let Some(full) = caps.get(0) else { continue };
            wrappers.push(Wrapper {
                name: caps[1].to_string(),
                is_async: caps.get(2).is_some(),
                path: caps[3].to_string(),
                body_start: full.end(),
            });
        }
        Self { wrappers }
    }

    /// Every wrapper, sync and async.
    pub fn wrappers(&self) -> &[Wrapper] {
        &self.wrappers
    }

    /// The async subset.
    pub fn async_wrappers(&self) -> impl Iterator<Item = &Wrapper> {
        self.wrappers.iter().filter(|w| w.is_async)
    }

    pub fn module_count(&self) -> usize {
        self.wrappers.len()
    }

    pub fn async_count(&self) -> usize {
        self.wrappers.iter().filter(|w| w.is_async).count()
    }

    /// Maps initializer names to their raw module paths.
    pub fn name_to_path(&self) -> BTreeMap<&str, &str> {
        self.wrappers
            .iter()
            .map(|w| (w.name.as_str(), w.path.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"
var init_sync = __esm({
  "src/sync.ts"() {
    var x = 1;
  }
});
var init_root = __esm({
  async "src/root.ts"() {
    await wasm_default();
  }
});
var broken = __esm({
  "src/broken.ts"(
"#;

    #[test]
    fn test_scan_finds_both_variants() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        assert_eq!(catalog.module_count(), 2);
        assert_eq!(catalog.async_count(), 1);
    }

    #[test]
    fn test_malformed_wrapper_is_skipped() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        assert!(!catalog.wrappers().iter().any(|w| w.path.contains("broken")));
    }

    #[test]
    fn test_async_marker() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let root = catalog
            .wrappers()
            .iter()
            .find(|w| w.name == "init_root")
            .unwrap();
        assert!(root.is_async);
        assert_eq!(root.path, "src/root.ts");
    }

    #[test]
    fn test_body_extraction() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let root = catalog
            .wrappers()
            .iter()
            .find(|w| w.name == "init_root")
            .unwrap();
        let body = root.body(BUNDLE).unwrap();
        assert!(body.contains("await wasm_default()"));
        assert!(!body.contains("init_sync"));
    }

    #[test]
    fn test_name_to_path() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let map = catalog.name_to_path();
        assert_eq!(map.get("init_sync"), Some(&"src/sync.ts"));
        assert_eq!(map.get("init_root"), Some(&"src/root.ts"));
    }

    #[test]
    fn test_empty_bundle() {
        let catalog = ModuleCatalog::scan("");
        assert_eq!(catalog.module_count(), 0);
        assert_eq!(catalog.async_count(), 0);
    }
}
