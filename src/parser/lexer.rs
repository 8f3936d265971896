//! Lexer for action bodies using logos
//!
//! Only the text between the delimiters is lexed; literal template text
//! never reaches the lexer.

use logos::Logos;

/// Byte range in action body text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Control keywords the engine does not support. Recognized so the
    // compiler can record them and the engine can reject them by name.
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("end")]
    End,
    #[token("range")]
    Range,
    #[token("with")]
    With,
    #[token("block")]
    Block,
    #[token("define")]
    Define,
    #[token("template")]
    Template,

    // Pipelines and variables are likewise unsupported
    #[token("|")]
    Pipe,
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    // Dotted field path like .Foo or .Foo.Bar
    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*", |lex| lex.slice().to_string())]
    Field(String),

    // Bare dot: the whole context value
    #[token(".")]
    Dot,

    #[token("-")]
    Minus,

    // Identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    Str(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex an action body into tokens with spans.
///
/// Fails with the span of the first unlexable character; the caller turns
/// that into an invalid node rather than a hard compile failure.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    let mut tokens = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(t) => tokens.push((t, span)),
            Err(()) => return Err(span),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_with_arguments() {
        let tokens: Vec<_> = lex(r#"inRange 100 200"#)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("inRange".to_string()),
                Token::Number(100.0),
                Token::Number(200.0),
            ]
        );
    }

    #[test]
    fn test_field_path() {
        let tokens: Vec<_> = lex(".Foo.Bar")
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(tokens, vec![Token::Field(".Foo.Bar".to_string())]);
    }

    #[test]
    fn test_bare_dot() {
        let tokens: Vec<_> = lex(".").unwrap().into_iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Dot]);
    }

    #[test]
    fn test_control_keywords() {
        let tokens: Vec<_> = lex("if range end")
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(tokens, vec![Token::If, Token::Range, Token::End]);
    }

    #[test]
    fn test_keyword_prefix_is_still_an_identifier() {
        let tokens: Vec<_> = lex("iffy").unwrap().into_iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Ident("iffy".to_string())]);
    }

    #[test]
    fn test_quoted_string() {
        let tokens: Vec<_> = lex(r#"eq "a b""#)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("eq".to_string()),
                Token::Str("a b".to_string()),
            ]
        );
    }

    #[test]
    fn test_variable_and_pipe() {
        let tokens: Vec<_> = lex("$x | print")
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Variable,
                Token::Pipe,
                Token::Ident("print".to_string()),
            ]
        );
    }

    #[test]
    fn test_unlexable_character() {
        assert!(lex("word @").is_err());
    }
}
