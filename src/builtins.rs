//! Stock extractors and validators
//!
//! Domain-specific checks belong to callers; these cover the common cases
//! and back the CLI's default registry and rules files.

use crate::cursor::Cursor;
use crate::error::Error;
use crate::parser::Argument;
use crate::registry::{Binding, Registry};
use crate::value::Value;

// --- extractors ---

/// Extract everything up to the next whitespace character or end of input.
pub fn until_whitespace(cursor: &mut Cursor<'_>) -> Result<Vec<String>, Error> {
    Ok(vec![cursor.read_until_whitespace().to_string()])
}

/// Extract everything up to the next `"` or `'`. The quote itself stays in
/// the input so the template's closing-quote literal still matches.
pub fn quoted(cursor: &mut Cursor<'_>) -> Result<Vec<String>, Error> {
    Ok(vec![cursor.read_quoted().to_string()])
}

/// Extract everything up to the next newline or end of input.
pub fn line(cursor: &mut Cursor<'_>) -> Result<Vec<String>, Error> {
    Ok(vec![cursor.read_until(|c| c == '\n').to_string()])
}

// --- validators ---

/// Accept whatever was extracted, substituting it unchanged.
pub fn accept_any(values: &[String], _args: &[Argument]) -> Result<Value, Error> {
    Ok(Value::Str(values.concat()))
}

/// Accept a canonically formatted UUID (8-4-4-4-12 hex groups).
pub fn uuid(values: &[String], _args: &[Argument]) -> Result<Value, Error> {
    let raw = first(values)?;
    if !is_valid_uuid(raw) {
        return Err(Error::validation(format!("invalid UUID: {:?}", raw)));
    }
    Ok(Value::Str(raw.clone()))
}

/// Accept a base-10 integer.
pub fn integer(values: &[String], _args: &[Argument]) -> Result<Value, Error> {
    let raw = first(values)?;
    raw.parse::<i64>()
        .map_err(|_| Error::validation(format!("{:?} is not an integer", raw)))?;
    Ok(Value::Str(raw.clone()))
}

/// Accept an integer within the two numeric bounds given as static
/// arguments, e.g. `{{inRange 100 200}}`.
pub fn in_range(values: &[String], args: &[Argument]) -> Result<Value, Error> {
    let raw = first(values)?;
    let n: i64 = raw
        .parse()
        .map_err(|_| Error::validation(format!("{:?} is not an integer", raw)))?;

    let mut bounds = Vec::new();
    for arg in args {
        if let Argument::Number(x) = arg {
            if x.fract() != 0.0 || !x.is_finite() {
                return Err(Error::validation(format!(
                    "range bound {} is not an integer",
                    x
                )));
            }
            bounds.push(*x as i64);
        }
    }
    let &[min, max] = bounds.as_slice() else {
        return Err(Error::validation(
            "in_range expects exactly two numeric bounds",
        ));
    };

    if n < min || n > max {
        return Err(Error::validation(format!(
            "{} is not in range {}..={}",
            n, min, max
        )));
    }
    Ok(Value::Str(raw.clone()))
}

/// Registry wiring the stock pairs under their conventional names. Used by
/// the CLI when no rules file is given.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("word", Binding::new(until_whitespace, accept_any));
    registry.register("quoted", Binding::new(quoted, accept_any));
    registry.register("line", Binding::new(line, accept_any));
    registry.register("uuid", Binding::new(until_whitespace, uuid));
    registry.register("int", Binding::new(until_whitespace, integer));
    registry.register("inRange", Binding::new(until_whitespace, in_range));
    registry
}

fn first(values: &[String]) -> Result<&String, Error> {
    values
        .first()
        .ok_or_else(|| Error::validation("no value was extracted"))
}

fn is_valid_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && [8usize, 4, 4, 4, 12]
            .iter()
            .zip(&groups)
            .all(|(len, group)| {
                group.len() == *len && group.chars().all(|c| c.is_ascii_hexdigit())
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_until_whitespace_extractor() {
        let mut cursor = Cursor::new("150 rest");
        assert_eq!(until_whitespace(&mut cursor).unwrap(), vec!["150"]);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_quoted_extractor_leaves_quote() {
        let mut cursor = Cursor::new("abc\" tail");
        assert_eq!(quoted(&mut cursor).unwrap(), vec!["abc"]);
        assert_eq!(cursor.peek_char(), Some('"'));
    }

    #[test]
    fn test_uuid_accepts_canonical_form() {
        let values = vec!["d416e1b0-97b2-4a49-8ad5-2e6b2b46eae0".to_string()];
        assert!(uuid(&values, &[]).is_ok());
    }

    #[test]
    fn test_uuid_rejects_malformed() {
        for bad in [
            "",
            "not-a-uuid",
            "d416e1b0-97b2-4a49-8ad5",
            "d416e1b0-97b2-4a49-8ad5-2e6b2b46eaeZ",
            "d416e1b097b24a498ad52e6b2b46eae0",
        ] {
            let values = vec![bad.to_string()];
            assert!(uuid(&values, &[]).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_in_range_bounds_inclusive() {
        let bounds = [Argument::Number(100.0), Argument::Number(200.0)];
        for ok in ["100", "150", "200"] {
            assert!(in_range(&[ok.to_string()], &bounds).is_ok());
        }
        for bad in ["99", "201", "abc"] {
            assert!(in_range(&[bad.to_string()], &bounds).is_err());
        }
    }

    #[test]
    fn test_in_range_rejects_fractional_bounds() {
        let bounds = [Argument::Number(99.9), Argument::Number(200.0)];
        let err = in_range(&["150".to_string()], &bounds).unwrap_err();
        assert!(matches!(err, Error::InputValidation { .. }));
    }

    #[test]
    fn test_in_range_requires_two_bounds() {
        let err = in_range(&["150".to_string()], &[Argument::Number(100.0)]).unwrap_err();
        assert!(matches!(err, Error::InputValidation { .. }));
    }

    #[test]
    fn test_integer() {
        assert!(integer(&["-42".to_string()], &[]).is_ok());
        assert!(integer(&["4.2".to_string()], &[]).is_err());
    }

    #[test]
    fn test_default_registry_names() {
        let registry = default_registry();
        for name in ["word", "quoted", "line", "uuid", "int", "inRange"] {
            assert!(registry.contains(name), "missing {:?}", name);
        }
    }
}
