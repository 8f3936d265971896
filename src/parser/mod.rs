//! Template compiler: source text to node sequence
//!
//! Supports a flat top-level sequence of literal text, placeholder calls,
//! and field references between configurable delimiters. No nesting, no
//! control flow.

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::{Action, Argument, Delimiters, Node, Span, Template};

use crate::error::CompileError;

/// Compile template text into a [`Template`].
///
/// Fails only on structural problems with the source itself (empty
/// delimiters, an action without its closing delimiter). Malformed or
/// unsupported action bodies compile into [`Node::Invalid`] /
/// [`Node::Unsupported`] and are rejected by the engine with the matching
/// error kind.
pub fn parse(source: &str, delims: &Delimiters) -> Result<Template, CompileError> {
    if delims.left.is_empty() || delims.right.is_empty() {
        return Err(CompileError::Syntax {
            span: 0..0,
            message: "delimiters must be non-empty".to_string(),
        });
    }

    let mut nodes = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find(&delims.left) {
        let start = pos + rel;
        if start > pos {
            nodes.push(Node::Literal {
                text: source[pos..start].to_string(),
                offset: pos,
            });
        }

        let content_start = start + delims.left.len();
        let content_end =
            find_closing(source, content_start, &delims.right).ok_or_else(|| {
                CompileError::Syntax {
                    span: start..source.len(),
                    message: format!("action is missing its closing {:?}", delims.right),
                }
            })?;

        let content = &source[content_start..content_end];
        let span = content_start..content_end;
        nodes.push(match grammar::parse_action(content) {
            Action::Call { name, args } => Node::Placeholder {
                name,
                span,
                args,
                extracted: Vec::new(),
            },
            Action::Field { path } => Node::FieldRef { path, span },
            Action::Unsupported { kind } => Node::Unsupported {
                kind,
                offset: content_start,
            },
            Action::Invalid => Node::Invalid {
                offset: content_start,
            },
        });

        pos = content_end + delims.right.len();
    }

    if pos < source.len() {
        nodes.push(Node::Literal {
            text: source[pos..].to_string(),
            offset: pos,
        });
    }

    Ok(Template {
        source: source.to_string(),
        nodes,
    })
}

/// Find the right delimiter closing the action whose body starts at `from`,
/// skipping over quoted string arguments so a delimiter inside quotes does
/// not end the action.
fn find_closing(source: &str, from: usize, right: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let needle = right.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
            }
            None => {
                if b == b'"' || b == b'\'' {
                    quote = Some(b);
                } else if bytes[i..].starts_with(needle) {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}
