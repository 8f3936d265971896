//! Rules files: TOML-declared delimiters and registry bindings
//!
//! Lets the CLI wire template function names to the stock extractors and
//! validators without writing code:
//!
//! ```toml
//! [delimiters]
//! left = "{{"
//! right = "}}"
//!
//! [functions.isUUID]
//! extract = "quoted"
//! validate = "uuid"
//!
//! [functions.inRange]
//! extract = "until-whitespace"
//! validate = "in-range"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::builtins;
use crate::parser::Delimiters;
use crate::registry::{Binding, ExtractFn, Registry, ValidateFn};

/// Errors that can occur when loading or parsing rules files
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rules TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown extractor {extract:?} for function {function:?}")]
    UnknownExtractor { function: String, extract: String },
    #[error("Unknown validator {validate:?} for function {function:?}")]
    UnknownValidator { function: String, validate: String },
}

/// TOML structure for deserializing rules files
#[derive(Deserialize)]
struct TomlRules {
    delimiters: Option<TomlDelimiters>,
    #[serde(default)]
    functions: HashMap<String, TomlFunction>,
}

#[derive(Deserialize)]
struct TomlDelimiters {
    left: String,
    right: String,
}

#[derive(Deserialize)]
struct TomlFunction {
    extract: String,
    validate: String,
}

/// A loaded rules file: delimiters plus the registry it declares.
#[derive(Debug)]
pub struct Rules {
    pub delimiters: Delimiters,
    pub registry: Registry,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            registry: builtins::default_registry(),
        }
    }
}

impl Rules {
    /// Load rules from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load rules from a TOML string
    pub fn from_str(content: &str) -> Result<Self, RulesError> {
        let parsed: TomlRules = toml::from_str(content)?;

        let delimiters = parsed
            .delimiters
            .map(|d| Delimiters::new(d.left, d.right))
            .unwrap_or_default();

        let mut registry = Registry::new();
        for (name, function) in parsed.functions {
            let extract =
                extractor(&function.extract).ok_or_else(|| RulesError::UnknownExtractor {
                    function: name.clone(),
                    extract: function.extract.clone(),
                })?;
            let validate =
                validator(&function.validate).ok_or_else(|| RulesError::UnknownValidator {
                    function: name.clone(),
                    validate: function.validate.clone(),
                })?;
            registry.register(name, Binding { extract, validate });
        }

        Ok(Rules {
            delimiters,
            registry,
        })
    }
}

fn extractor(name: &str) -> Option<ExtractFn> {
    match name {
        "until-whitespace" => Some(Box::new(builtins::until_whitespace)),
        "quoted" => Some(Box::new(builtins::quoted)),
        "line" => Some(Box::new(builtins::line)),
        _ => None,
    }
}

fn validator(name: &str) -> Option<ValidateFn> {
    match name {
        "any" => Some(Box::new(builtins::accept_any)),
        "uuid" => Some(Box::new(builtins::uuid)),
        "integer" => Some(Box::new(builtins::integer)),
        "in-range" => Some(Box::new(builtins::in_range)),
        _ => None,
    }
}
