//! Template Matcher - validate text input against a template-shaped pattern
//!
//! The template's literal text must match the input byte-for-byte; its
//! placeholders are matched against input substrings pulled out by
//! extractor functions and judged by validator functions. The output is the
//! re-rendered template, byte-identical to any accepted input. A mismatch
//! anywhere is an error value, never a crash.
//!
//! # Example
//!
//! ```rust
//! use template_matcher::{builtins, Binding, Matcher, Registry, Value};
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     "inRange",
//!     Binding::new(builtins::until_whitespace, builtins::in_range),
//! );
//!
//! let matcher = Matcher::new("num: {{inRange 100 200}}", registry).unwrap();
//! assert_eq!(matcher.run("num: 150", &Value::Null).unwrap(), "num: 150");
//! assert!(matcher.run("num: 999", &Value::Null).is_err());
//! ```

pub mod builtins;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod rules;
pub mod value;

pub use cursor::Cursor;
pub use error::{CompileError, Error};
pub use parser::{parse, Argument, Delimiters, Node, Template};
pub use registry::{Binding, ExtractFn, Registry, ValidateFn};
pub use resolver::{Config, Matcher, Resolved, ResolveRequest};
pub use rules::{Rules, RulesError};
pub use value::Value;

/// Validate `input` against `template` in one shot with default
/// configuration: compile, resolve, render.
///
/// For repeated validations against the same template, build a [`Matcher`]
/// once and call [`Matcher::run`] instead.
///
/// # Example
///
/// ```rust
/// use template_matcher::{builtins, validate, Value};
///
/// let output = validate(
///     "id: {{uuid}}",
///     "id: d416e1b0-97b2-4a49-8ad5-2e6b2b46eae0",
///     &Value::Null,
///     builtins::default_registry(),
/// )
/// .unwrap();
/// assert_eq!(output, "id: d416e1b0-97b2-4a49-8ad5-2e6b2b46eae0");
/// ```
pub fn validate(
    template: &str,
    input: &str,
    context: &Value,
    registry: Registry,
) -> Result<String, Error> {
    let matcher = Matcher::new(template, registry)?;
    matcher.run(input, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_round_trip() {
        let input = "word: hello";
        let output = validate(
            "word: {{word}}",
            input,
            &Value::Null,
            builtins::default_registry(),
        )
        .unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_validate_compile_error_is_folded() {
        let err = validate(
            "broken {{word",
            "broken x",
            &Value::Null,
            builtins::default_registry(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Compile(_)));
    }

    #[test]
    fn test_validate_rejects_mismatch() {
        let err = validate(
            "word: {{word}}",
            "other: hello",
            &Value::Null,
            builtins::default_registry(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InputValidation { .. }));
    }
}
