//! Node model for compiled templates

use std::fmt;

/// Byte range in template source text
pub type Span = std::ops::Range<usize>;

/// Delimiter pair marking template actions, e.g. `{{` and `}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A static argument declared in a placeholder call, e.g. the `100 200` in
/// `{{inRange 100 200}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Number(f64),
    Str(String),
    Ident(String),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            Argument::Number(n) => write!(f, "{}", n),
            Argument::Str(s) => write!(f, "{:?}", s),
            Argument::Ident(s) => write!(f, "{}", s),
        }
    }
}

/// One node of a compiled template, in source order.
///
/// `offset` / `span` locate the node in the template source: for actions the
/// span covers the content between the delimiters (start is the first byte
/// after the left delimiter, end is the first byte of the right delimiter).
/// Offsets are monotonically non-decreasing across a template's sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw template text, matched verbatim against the input
    Literal { text: String, offset: usize },
    /// A call to a named extractor/validator pair.
    ///
    /// `extracted` starts empty and is populated with the extractor's raw
    /// strings during resolution; at render time the validator receives
    /// `extracted` first, then `args`.
    Placeholder {
        name: String,
        span: Span,
        args: Vec<Argument>,
        extracted: Vec<String>,
    },
    /// A dotted attribute path into the context value, e.g. `.Foo.Bar`.
    /// An empty path refers to the whole context value.
    FieldRef { path: Vec<String>, span: Span },
    /// A construct the engine refuses (control keyword, variable, pipeline)
    Unsupported { kind: String, offset: usize },
    /// An action body without the expected call structure
    Invalid { offset: usize },
}

impl Node {
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal { .. })
    }
}

/// Result of parsing one action body, before it is positioned in the
/// template.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Call { name: String, args: Vec<Argument> },
    Field { path: Vec<String> },
    Unsupported { kind: String },
    Invalid,
}

/// A compiled template: the original source plus its node sequence.
///
/// Immutable once compiled; the resolution engine clones the node sequence
/// per call, so one `Template` may back any number of resolutions.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub source: String,
    pub nodes: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_display() {
        assert_eq!(Argument::Number(100.0).to_string(), "100");
        assert_eq!(Argument::Number(1.5).to_string(), "1.5");
        assert_eq!(Argument::Str("a b".to_string()).to_string(), "\"a b\"");
        assert_eq!(Argument::Ident("max".to_string()).to_string(), "max");
    }

    #[test]
    fn test_default_delimiters() {
        let delims = Delimiters::default();
        assert_eq!(delims.left, "{{");
        assert_eq!(delims.right, "}}");
    }
}
