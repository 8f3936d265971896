//! Resolution engine: walks template nodes, consumes input, and rewrites
//! placeholder nodes with extracted literals
//!
//! The walk is strictly single-pass, left to right, with no backtracking:
//! once bytes are consumed from the cursor they are gone. Running state is
//! one explicit accumulator, the template-source offset where the previous
//! action body ended.

use crate::cursor::Cursor;
use crate::error::{CompileError, Error};
use crate::parser::{self, Delimiters, Node, Template};
use crate::registry::Registry;
use crate::render;
use crate::value::Value;

/// Engine configuration, assembled up front and handed to [`Matcher`]
/// construction. No partially-configured intermediate states.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub delimiters: Delimiters,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }
}

/// One resolution request. `input` is required; a request without it fails
/// with [`Error::InputRequired`]. A missing context behaves as
/// [`Value::Null`], which only matters to templates with field references.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    pub input: Option<&'a str>,
    pub context: Option<&'a Value>,
}

/// The rewritten node sequence produced by one resolution: every
/// placeholder now carries the raw strings its extractor pulled from the
/// input. Render it with [`Matcher::render`].
#[derive(Debug, Clone)]
pub struct Resolved {
    nodes: Vec<Node>,
}

impl Resolved {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

static NULL_CONTEXT: Value = Value::Null;

/// A compiled template plus its registry and configuration.
///
/// Build once, resolve repeatedly: each call to [`Matcher::resolve`] works
/// on a fresh clone of the node sequence, so the matcher itself is never
/// mutated and concurrent resolutions do not interfere.
#[derive(Debug)]
pub struct Matcher {
    template: Template,
    registry: Registry,
    delimiters: Delimiters,
}

impl Matcher {
    /// Compile `template_text` with default configuration.
    pub fn new(template_text: &str, registry: Registry) -> Result<Self, CompileError> {
        Self::with_config(template_text, registry, Config::default())
    }

    /// Compile `template_text` with explicit configuration.
    pub fn with_config(
        template_text: &str,
        registry: Registry,
        config: Config,
    ) -> Result<Self, CompileError> {
        let template = parser::parse(template_text, &config.delimiters)?;
        Ok(Self {
            template,
            registry,
            delimiters: config.delimiters,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `input` against the template, producing a rewritten node
    /// sequence whose render reproduces the accepted input.
    pub fn resolve(&self, input: &str, context: &Value) -> Result<Resolved, Error> {
        self.resolve_request(ResolveRequest {
            input: Some(input),
            context: Some(context),
        })
    }

    /// Resolve an explicit [`ResolveRequest`].
    pub fn resolve_request(&self, request: ResolveRequest<'_>) -> Result<Resolved, Error> {
        let input = request.input.ok_or(Error::InputRequired)?;
        let context = request.context.unwrap_or(&NULL_CONTEXT);

        let mut cursor = Cursor::new(input);
        // Fresh working copy per resolution; the compiled template is never
        // mutated, so one Matcher can back concurrent resolutions.
        let mut nodes = self.template.nodes.clone();
        let last_action = nodes.iter().rposition(|n| !n.is_literal());
        let mut previous_end: Option<usize> = None;

        for i in 0..nodes.len() {
            match &mut nodes[i] {
                Node::Literal { text, offset } => {
                    // Literals before an action are consumed and compared by
                    // that action's resynchronization step. Only literals
                    // after the last action are matched here.
                    if last_action.is_some_and(|last| i < last) {
                        continue;
                    }
                    match_trailing_literal(&mut cursor, text, *offset)?;
                }
                Node::Placeholder {
                    name,
                    span,
                    extracted,
                    ..
                } => {
                    self.resync(&mut cursor, span.start, previous_end)?;
                    let binding =
                        self.registry
                            .get(name)
                            .ok_or_else(|| Error::UnsupportedFunction {
                                name: name.clone(),
                            })?;
                    *extracted = (binding.extract)(&mut cursor)?;
                    previous_end = Some(span.end);
                }
                Node::FieldRef { path, span } => {
                    self.resync(&mut cursor, span.start, previous_end)?;
                    let value = context
                        .get_path(path)
                        .ok_or_else(|| Error::UndefinedField {
                            path: path.join("."),
                        })?;
                    // The field's value is asserted correct by construction;
                    // only its rendered byte length matters here.
                    let rendered = value.to_string();
                    cursor.discard(rendered.len())?;
                    previous_end = Some(span.end);
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

        Ok(Resolved { nodes })
    }

    /// Render a resolved node sequence against the context value.
    pub fn render(&self, resolved: &Resolved, context: &Value) -> Result<String, Error> {
        render::render(&resolved.nodes, &self.registry, context)
    }

    /// Resolve and render in one step.
    pub fn run(&self, input: &str, context: &Value) -> Result<String, Error> {
        let resolved = self.resolve(input, context)?;
        self.render(&resolved, context)
    }

    /// Advance the cursor to where the action body starting at template
    /// offset `start` expects the input to be, comparing the consumed bytes
    /// against the template's literal span on the way.
    ///
    /// The gap is `start - left_len` for the first action, and
    /// `start - previous_end - left_len - right_len` afterwards: template
    /// bytes between the previous action's closing delimiter and this one's
    /// opening delimiter correspond 1:1 to input bytes. Adjacent actions
    /// produce a zero-length gap.
    fn resync(
        &self,
        cursor: &mut Cursor<'_>,
        start: usize,
        previous_end: Option<usize>,
    ) -> Result<(), Error> {
        let left = self.delimiters.left.len();
        let right = self.delimiters.right.len();

        let gap = match previous_end {
            None => start.checked_sub(left),
            Some(end) => start.checked_sub(end + left + right),
        }
        .ok_or(Error::InvalidNode { offset: start })?;

        let literal_start = start - left - gap;
        let expected = &self.template.source[literal_start..literal_start + gap];
        let at = cursor.position();
        let got = cursor.take_bytes(gap)?;
        if got != expected.as_bytes() {
            return Err(Error::validation(format!(
                "expected {:?} at input byte {}, found {:?}",
                expected,
                at,
                String::from_utf8_lossy(got)
            )));
        }
        Ok(())
    }
}

/// Match a literal that follows the last action character by character.
/// Input exhaustion mid-literal is a benign end, not an error.
fn match_trailing_literal(
    cursor: &mut Cursor<'_>,
    text: &str,
    offset: usize,
) -> Result<(), Error> {
    for expected in text.chars() {
        let at = cursor.position();
        match cursor.next_char() {
            Some(c) if c == expected => {}
            Some(c) => {
                return Err(Error::validation(format!(
                    "expected {:?} at input byte {} (template offset {}), found {:?}",
                    expected, at, offset, c
                )));
            }
            None => break,
        }
    }
    Ok(())
}
