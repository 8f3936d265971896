//! Context values for field references and validator results

use std::collections::BTreeMap;
use std::fmt;

/// A structured context value.
///
/// Used in two places: resolving field references to their rendered text
/// (to know how many input bytes they cover), and substituting values into
/// the final render. Validators also return one as the substitute for a
/// placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Look up a dotted attribute path. An empty path is the value itself.
    pub fn get_path(&self, path: &[String]) -> Option<&Value> {
        let mut current = self;
        for segment in path {
            match current {
                Value::Map(entries) => current = entries.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Build a map value from string keys
    pub fn record<'a, I>(entries: I) -> Value
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<toml::Value> for Value {
    fn from(v: toml::Value) -> Self {
        match v {
            toml::Value::String(s) => Value::Str(s),
            toml::Value::Integer(n) => Value::Int(n),
            toml::Value::Float(x) => Value::Float(x),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(d) => Value::Str(d.to_string()),
            toml::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            toml::Value::Table(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path_nested() {
        let ctx = Value::record([(
            "Host",
            Value::record([("Name", Value::from("example.org"))]),
        )]);
        assert_eq!(
            ctx.get_path(&["Host".to_string(), "Name".to_string()]),
            Some(&Value::Str("example.org".to_string()))
        );
        assert_eq!(ctx.get_path(&["Host".to_string(), "Port".to_string()]), None);
    }

    #[test]
    fn test_get_path_empty_is_self() {
        let ctx = Value::from("whole");
        assert_eq!(ctx.get_path(&[]), Some(&ctx));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(
            Value::List(vec![Value::from(1i64), Value::from(2i64)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_from_toml() {
        let parsed: toml::Value = toml::from_str("Host = \"example.org\"\nPort = 8080").unwrap();
        let ctx = Value::from(parsed);
        assert_eq!(
            ctx.get_path(&["Host".to_string()]),
            Some(&Value::Str("example.org".to_string()))
        );
        assert_eq!(
            ctx.get_path(&["Port".to_string()]),
            Some(&Value::Int(8080))
        );
    }
}
