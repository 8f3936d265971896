//! Parser for action bodies using chumsky
//!
//! An action body is deliberately tiny: either a call (`name arg*`) or a
//! field reference (`.Foo.Bar`). Everything else is classified so the
//! resolution engine can fail with the precise error kind.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::{Action, Argument};
use crate::parser::lexer::{self, Token};

/// Parse one action body into an [`Action`].
///
/// This is total: bodies the grammar cannot make sense of come back as
/// `Action::Invalid`, and recognizable-but-refused constructs come back as
/// `Action::Unsupported`. Structural validity is the engine's concern, not
/// the compiler's.
pub(crate) fn parse_action(content: &str) -> Action {
    let tokens = match lexer::lex(content) {
        Ok(tokens) => tokens,
        Err(_) => return Action::Invalid,
    };

    let Some((first, _)) = tokens.first() else {
        return Action::Invalid;
    };
    if let Some(kind) = unsupported_kind(first) {
        return Action::Unsupported {
            kind: kind.to_string(),
        };
    }
    if tokens.iter().any(|(t, _)| *t == Token::Pipe) {
        return Action::Unsupported {
            kind: "pipeline".to_string(),
        };
    }

    let len = content.len();
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    match action_parser().parse(token_stream).into_result() {
        Ok(action) => action,
        Err(_) => Action::Invalid,
    }
}

/// Constructs the engine rejects outright when they lead an action body
fn unsupported_kind(token: &Token) -> Option<&'static str> {
    match token {
        Token::If => Some("if"),
        Token::Else => Some("else"),
        Token::End => Some("end"),
        Token::Range => Some("range"),
        Token::With => Some("with"),
        Token::Block => Some("block"),
        Token::Define => Some("define"),
        Token::Template => Some("template"),
        Token::Variable => Some("variable"),
        _ => None,
    }
}

fn action_parser<'a, I>() -> impl Parser<'a, I, Action, extra::Err<Rich<'a, Token>>>
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let argument = choice((
        select! {
            Token::Number(n) => Argument::Number(n),
            Token::Str(s) => Argument::Str(s),
            Token::Ident(s) => Argument::Ident(s),
        },
        just(Token::Minus)
            .ignore_then(select! { Token::Number(n) => n })
            .map(|n| Argument::Number(-n)),
    ));

    let call = select! { Token::Ident(name) => name }
        .then(argument.repeated().collect::<Vec<_>>())
        .map(|(name, args)| Action::Call { name, args });

    let field = select! { Token::Field(raw) => raw }.map(|raw| Action::Field {
        path: raw
            .trim_start_matches('.')
            .split('.')
            .map(str::to_string)
            .collect(),
    });

    let root = just(Token::Dot).to(Action::Field { path: Vec::new() });

    choice((field, root, call)).then_ignore(end())
}
