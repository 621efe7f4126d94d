//! Wrapper body isolation.
//!
//! Earlier tooling located the end of a wrapper by scanning a fixed
//! character window for a `});` line at column zero, which misfires when a
//! nested literal happens to produce an identical line. The body is
//! delimited here by counting actual brace depth through strings, template
//! literals, and comments instead.

/// Upper bound on a single wrapper body.
const MAX_BODY_BYTES: usize = 512 * 1024;

/// Lexical context while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Plain code, with the brace depth opened in this context.
    Code { depth: usize },
    /// Inside a `'` or `"` string.
    Str { quote: char },
    /// Inside a template literal.
    Template,
    /// Inside `// ...`.
    LineComment,
    /// Inside `/* ... */`.
    BlockComment,
}

/// Isolates a wrapper body given the byte offset just past its opening
/// brace.
///
/// Returns `None` for truncated wrappers whose braces never balance and
/// for bodies exceeding the size guard; callers treat both the same as a
/// failed wrapper match.
pub(crate) fn isolate(bundle: &str, body_start: usize) -> Option<&str> {
    let rest = bundle.get(body_start..)?;
    let mut stack = vec![Mode::Code { depth: 1 }];
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if i > MAX_BODY_BYTES {
            return None;
        }
        match *stack.last()? {
            Mode::Code { depth } => match c {
                '{' => set_depth(&mut stack, depth + 1),
                '}' => {
                    if depth > 1 {
                        set_depth(&mut stack, depth - 1);
                    } else if stack.len() == 1 {
                        return Some(&rest[..i]);
                    } else {
                        // Closed a template substitution.
                        stack.pop();
                    }
                }
                '\'' | '"' => stack.push(Mode::Str { quote: c }),
                '`' => stack.push(Mode::Template),
                '/' => match chars.peek() {
                    Some(&(_, '/')) => {
                        chars.next();
                        stack.push(Mode::LineComment);
                    }
                    Some(&(_, '*')) => {
                        chars.next();
                        stack.push(Mode::BlockComment);
                    }
                    _ => {}
                },
                _ => {}
            },
            Mode::Str { quote } => match c {
                '\\' => {
                    chars.next();
                }
                // Unterminated single-line string: minified wrappers get
                // truncated mid-literal, so recover at the line break.
                '\n' => {
                    stack.pop();
                }
                c if c == quote => {
                    stack.pop();
                }
                _ => {}
            },
            Mode::Template => match c {
                '\\' => {
                    chars.next();
                }
                '`' => {
                    stack.pop();
                }
                '$' => {
                    if matches!(chars.peek(), Some(&(_, '{'))) {
                        chars.next();
                        stack.push(Mode::Code { depth: 1 });
                    }
                }
                _ => {}
            },
            Mode::LineComment => {
                if c == '\n' {
                    stack.pop();
                }
            }
            Mode::BlockComment => {
                if c == '*' && matches!(chars.peek(), Some(&(_, '/'))) {
                    chars.next();
                    stack.pop();
                }
            }
        }
    }

    None
}

fn set_depth(stack: &mut Vec<Mode>, depth: usize) {
    if let Some(top) = stack.last_mut() {
        *top = Mode::Code { depth };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(source: &str) -> Option<&str> {
        let start = source.find('{').map(|i| i + 1).unwrap();
        isolate(source, start)
    }

    #[test]
    fn test_flat_body() {
        assert_eq!(body_of("{ init_a(); }"), Some(" init_a(); "));
    }

    #[test]
    fn test_nested_braces() {
        let source = "{ var x = { a: { b: 1 } }; init_a(); }";
        assert_eq!(body_of(source), Some(" var x = { a: { b: 1 } }; init_a(); "));
    }

    #[test]
    fn test_braces_in_strings_ignored() {
        let source = r#"{ var s = "}"; var t = '}'; init_a(); }"#;
        assert_eq!(body_of(source), Some(r#" var s = "}"; var t = '}'; init_a(); "#));
    }

    #[test]
    fn test_braces_in_comments_ignored() {
        let source = "{ // }\n /* } */ init_a(); }";
        assert_eq!(body_of(source), Some(" // }\n /* } */ init_a(); "));
    }

    #[test]
    fn test_template_substitution() {
        let source = "{ var s = `a ${ { b: 1 } } c`; }";
        assert_eq!(body_of(source), Some(" var s = `a ${ { b: 1 } } c`; "));
    }

    #[test]
    fn test_nested_closing_line_does_not_end_body() {
        // The pattern the old column-zero heuristic tripped over: a nested
        // literal whose text contains a `});` line of its own.
        let source = "{\n  var s = \"x\";\n  callback(() => {\n});\n  init_a();\n}";
        let body = body_of(source).unwrap();
        assert!(body.contains("init_a()"));
    }

    #[test]
    fn test_unbalanced_body_is_none() {
        assert_eq!(body_of("{ init_a(); "), None);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let source = r#"{ var s = "a\"}"; init_a(); }"#;
        let body = body_of(source).unwrap();
        assert!(body.contains("init_a()"));
    }
}
