//! Error types for compilation, resolution, and rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template source text
pub type Span = std::ops::Range<usize>;

/// Errors produced while compiling template text into a node sequence
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Compile error at {span:?}: {message}")]
    Syntax { span: Span, message: String },
}

impl CompileError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            CompileError::Syntax { span, message } => {
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }
}

/// Errors produced while resolving input against a template or rendering
/// the result.
///
/// Every variant is terminal: resolution and rendering fail fast on the
/// first error and return no partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// Resolution was attempted without supplying input text
    #[error("input required")]
    InputRequired,

    /// A placeholder node lacks the expected call structure
    #[error("invalid node at template offset {offset}")]
    InvalidNode { offset: usize },

    /// A node kind outside {literal, placeholder, field reference} appeared
    #[error("unsupported node ({kind}) at template offset {offset}")]
    UnsupportedNode { kind: String, offset: usize },

    /// A placeholder name has no registry entry
    #[error("unsupported or unmapped function: {name}")]
    UnsupportedFunction { name: String },

    /// The cursor was asked for more bytes than remain in the input
    #[error("short input: needed {requested} bytes, {remaining} remain")]
    ShortInput { requested: usize, remaining: usize },

    /// Literal text mismatch, or a validator rejected extracted value(s)
    #[error("input does not match template: {reason}")]
    InputValidation { reason: String },

    /// A field reference path is absent from the context value
    #[error("undefined field: .{path}")]
    UndefinedField { path: String },

    /// Template compilation failed
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl Error {
    /// Shorthand for an [`Error::InputValidation`] with the given reason
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::InputValidation {
            reason: reason.into(),
        }
    }
}
