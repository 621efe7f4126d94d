//! Root-async classification.
//!
//! Every importer of an async module is itself forced async, so most async
//! wrappers are merely downstream of the problem. A wrapper is a *root*
//! when its own body holds the genuine top-level suspend point, which in
//! bundle terms means it awaits something that is not another module's
//! initializer.

use crate::bundle::catalog::{ModuleCatalog, Wrapper};
use regex::Regex;
use std::sync::LazyLock;

/// An awaited call into another wrapper's initializer.
static AWAIT_INIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"await init_\w+\(\)").expect("await pattern is a valid regex"));

/// Returns the async wrappers whose bodies never await another module's
/// initializer.
///
/// An empty result is itself diagnostic (the roots may sit inside a cycle
/// and await each other); callers skip the chain track and say so rather
/// than treating it as an error.
pub fn classify_roots<'c>(bundle: &str, catalog: &'c ModuleCatalog) -> Vec<&'c Wrapper> {
    let mut roots = Vec::new();
    for wrapper in catalog.async_wrappers() {
        let Some(body) = wrapper.body(bundle) else {
            continue;
        };
        if !AWAIT_INIT_RE.is_match(body) {
            roots.push(wrapper);
        }
    }
    roots
}
