//! Registry mapping placeholder names to extractor/validator pairs

use std::collections::HashMap;
use std::fmt;

use crate::cursor::Cursor;
use crate::error::Error;
use crate::parser::Argument;
use crate::value::Value;

/// Consumes input bytes for one placeholder and returns the raw strings
/// they decompose into. Decides *how much* of the input belongs to the
/// placeholder; acceptance is the validator's job.
pub type ExtractFn = Box<dyn Fn(&mut Cursor<'_>) -> Result<Vec<String>, Error> + Send + Sync>;

/// Accepts or rejects extracted raw strings at render time and supplies
/// the substitute value. Receives the extracted strings first, then the
/// placeholder's static arguments. Never touches the cursor.
pub type ValidateFn = Box<dyn Fn(&[String], &[Argument]) -> Result<Value, Error> + Send + Sync>;

/// One registry entry: how to pull a placeholder's bytes out of the input,
/// and how to judge them.
pub struct Binding {
    pub extract: ExtractFn,
    pub validate: ValidateFn,
}

impl Binding {
    pub fn new<E, V>(extract: E, validate: V) -> Self
    where
        E: Fn(&mut Cursor<'_>) -> Result<Vec<String>, Error> + Send + Sync + 'static,
        V: Fn(&[String], &[Argument]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self {
            extract: Box::new(extract),
            validate: Box::new(validate),
        }
    }
}

/// Registry of placeholder bindings, looked up by placeholder name during
/// resolution and rendering.
///
/// A placeholder whose name has no entry is a terminal configuration error:
/// without an extractor the engine cannot know how many input bytes the
/// placeholder covers.
#[derive(Default)]
pub struct Registry {
    bindings: HashMap<String, Binding>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding under a placeholder name. Re-registering a name
    /// replaces the previous binding.
    pub fn register(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_binding() -> Binding {
        Binding::new(
            |cursor| Ok(vec![cursor.read_until_whitespace().to_string()]),
            |values, _args| Ok(Value::Str(values.concat())),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register("word", dummy_binding());
        assert!(registry.contains("word"));
        assert!(registry.get("word").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = Registry::new();
        registry.register("word", dummy_binding());
        registry.register("word", dummy_binding());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_binding_roundtrip_through_cursor() {
        let registry = {
            let mut r = Registry::new();
            r.register("word", dummy_binding());
            r
        };
        let binding = registry.get("word").unwrap();
        let mut cursor = Cursor::new("hello world");
        let extracted = (binding.extract)(&mut cursor).unwrap();
        assert_eq!(extracted, vec!["hello".to_string()]);
        let value = (binding.validate)(&extracted, &[]).unwrap();
        assert_eq!(value, Value::Str("hello".to_string()));
    }
}
