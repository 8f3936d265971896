//! Renderer: executes a node sequence against a context value
//!
//! Rendering is where validators run. Each rewritten placeholder is invoked
//! as `validate(extracted, static_args)`; a rejection aborts the render and
//! no output is returned.

use std::fmt::Write;

use crate::error::Error;
use crate::parser::Node;
use crate::registry::Registry;
use crate::value::Value;

/// Render a node sequence to text. Output is fully materialized; any error
/// means no output at all.
pub fn render(nodes: &[Node], registry: &Registry, context: &Value) -> Result<String, Error> {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Literal { text, .. } => out.push_str(text),
            Node::Placeholder {
                name,
                args,
                extracted,
                ..
            } => {
                let binding = registry
                    .get(name)
                    .ok_or_else(|| Error::UnsupportedFunction { name: name.clone() })?;
                let value = (binding.validate)(extracted, args)?;
                let _ = write!(out, "{}", value);
            }
            Node::FieldRef { path, .. } => {
                let value = context.get_path(path).ok_or_else(|| Error::UndefinedField {
                    path: path.join("."),
                })?;
                let _ = write!(out, "{}", value);
            }
            Node::Unsupported { kind, offset } => {
                return Err(Error::UnsupportedNode {
                    kind: kind.clone(),
                    offset: *offset,
                });
            }
            Node::Invalid { offset } => {
                return Err(Error::InvalidNode { offset: *offset });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;
    use crate::registry::Binding;

    fn registry_with(name: &str, binding: Binding) -> Registry {
        let mut registry = Registry::new();
        registry.register(name, binding);
        registry
    }

    #[test]
    fn test_render_literals_and_fields() {
        let nodes = vec![
            Node::Literal {
                text: "host: ".to_string(),
                offset: 0,
            },
            Node::FieldRef {
                path: vec!["Host".to_string()],
                span: 8..13,
            },
        ];
        let ctx = Value::record([("Host", Value::from("example.org"))]);
        let out = render(&nodes, &Registry::new(), &ctx).unwrap();
        assert_eq!(out, "host: example.org");
    }

    #[test]
    fn test_render_invokes_validator_with_extracted_then_static() {
        use crate::parser::Argument;

        let registry = registry_with(
            "check",
            Binding::new(builtins::until_whitespace, |values, args| {
                assert_eq!(values, ["150"]);
                assert_eq!(args.len(), 2);
                Ok(Value::Str(values[0].clone()))
            }),
        );
        let nodes = vec![Node::Placeholder {
            name: "check".to_string(),
            span: 2..20,
            args: vec![Argument::Number(100.0), Argument::Number(200.0)],
            extracted: vec!["150".to_string()],
        }];
        let out = render(&nodes, &registry, &Value::Null).unwrap();
        assert_eq!(out, "150");
    }

    #[test]
    fn test_validator_rejection_aborts_render() {
        let registry = registry_with(
            "reject",
            Binding::new(builtins::until_whitespace, |_values, _args| {
                Err(Error::validation("nope"))
            }),
        );
        let nodes = vec![
            Node::Placeholder {
                name: "reject".to_string(),
                span: 2..8,
                args: vec![],
                extracted: vec!["x".to_string()],
            },
            Node::Literal {
                text: "never reached".to_string(),
                offset: 10,
            },
        ];
        let err = render(&nodes, &registry, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::InputValidation { .. }));
    }
}
