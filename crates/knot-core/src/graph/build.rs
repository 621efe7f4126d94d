//! Dependency extraction from wrapper bodies.
//!
//! Each wrapper body is parsed as a standalone async function and walked
//! for calls to other wrappers' initializers. Bodies the parser rejects
//! fall back to a regex scan that yields the same output shape; wrappers
//! with broken syntax are exactly the artifact this tool diagnoses, so the
//! fallback is routine rather than exceptional.

use crate::bundle::ModuleCatalog;
use crate::graph::DependencyGraph;
use crate::paths::display_path;
use oxc_allocator::Allocator;
use oxc_ast::ast::{CallExpression, Expression};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::SourceType;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Initializer naming convention shared by every wrapper.
const INIT_PREFIX: &str = "init_";

/// Fallback pattern for initializer calls in unparsable bodies.
static INIT_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(init_\w+)\(\)").expect("call pattern is a valid regex"));

/// Builds the module dependency graph from wrapper bodies.
///
/// Every resolvable wrapper contributes one node; initializer calls that
/// do not resolve through the catalog (helpers, runtime shims) are
/// dropped. All keys and neighbor entries go through [`display_path`], the
/// same normalization every later stage applies.
pub fn build_graph(bundle: &str, catalog: &ModuleCatalog) -> DependencyGraph {
    let name_to_path = catalog.name_to_path();
    let mut graph = DependencyGraph::new();

    for wrapper in catalog.wrappers() {
        let Some(body) = wrapper.body(bundle) else {
            continue;
        };
        let names = match parse_init_calls(body) {
            Some(names) => names,
            None => {
                tracing::debug!(
                    module = %wrapper.path,
                    "wrapper body failed to parse, using regex fallback"
                );
                scan_init_calls(body)
            }
        };
        let deps: BTreeSet<String> = names
            .iter()
            .filter_map(|name| name_to_path.get(name.as_str()))
            .map(|path| display_path(path))
            .collect();
        graph.insert(display_path(&wrapper.path), deps);
    }

    graph
}

struct InitCallCollector {
    calls: BTreeSet<String>,
}

impl<'ast> Visit<'ast> for InitCallCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'ast>) {
        if let Expression::Identifier(ident) = &call.callee {
            if ident.name.starts_with(INIT_PREFIX) {
                self.calls.insert(ident.name.to_string());
            }
        }
        walk::walk_call_expression(self, call);
    }
}

/// Parses a wrapper body and collects initializer call names.
///
/// Returns `None` on parse errors so the caller can fall back.
fn parse_init_calls(body: &str) -> Option<BTreeSet<String>> {
    let source = format!("async function __wrapper() {{\n{body}\n}}");
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, &source, SourceType::mjs()).parse();
    if !parsed.errors.is_empty() {
        return None;
    }
    let mut collector = InitCallCollector {
        calls: BTreeSet::new(),
    };
    walk::walk_program(&mut collector, &parsed.program);
    Some(collector.calls)
}

/// Regex fallback with the same output shape as the parser path.
fn scan_init_calls(body: &str) -> BTreeSet<String> {
    INIT_CALL_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"
var init_a = __esm({
  "src/a.ts"() {
    var x = 1;
  }
});
var init_b = __esm({
  async "src/b.ts"() {
    await init_a();
    init_a();
  }
});
var init_c = __esm({
  async "src/c.ts"() {
    init_b();
    unknown_helper();
    not_an_init();
  }
});
"#;

    #[test]
    fn test_build_resolves_initializer_calls() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let graph = build_graph(BUNDLE, &catalog);

        assert!(graph["src/a.ts"].is_empty());
        assert_eq!(
            graph["src/b.ts"],
            ["src/a.ts".to_string()].into_iter().collect()
        );
        assert_eq!(
            graph["src/c.ts"],
            ["src/b.ts".to_string()].into_iter().collect()
        );
    }

    #[test]
    fn test_unresolvable_calls_are_dropped() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let graph = build_graph(BUNDLE, &catalog);
        assert!(!graph["src/c.ts"].iter().any(|d| d.contains("unknown")));
    }

    #[test]
    fn test_regex_fallback_matches_parser_output() {
        let body = "init_a();\nif (cond) { init_b(); }";
        assert_eq!(parse_init_calls(body).unwrap(), scan_init_calls(body));
    }

    #[test]
    fn test_broken_syntax_falls_back_to_regex() {
        // Braces balance (body isolation succeeds) but the statement is
        // not valid syntax, so the parser rejects it.
        let bundle = r#"
var init_a = __esm({
  "src/a.ts"() {
    var x = 1;
  }
});
var init_bad = __esm({
  async "src/bad.ts"() {
    init_a();
    var x = ;
  }
});
"#;
        let catalog = ModuleCatalog::scan(bundle);
        let graph = build_graph(bundle, &catalog);
        assert!(graph
            .get("src/bad.ts")
            .is_some_and(|deps| deps.contains("src/a.ts")));
    }

    #[test]
    fn test_build_is_deterministic() {
        let catalog = ModuleCatalog::scan(BUNDLE);
        let first = build_graph(BUNDLE, &catalog);
        let second = build_graph(BUNDLE, &ModuleCatalog::scan(BUNDLE));
        assert_eq!(first, second);
    }
}
