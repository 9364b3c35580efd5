//! Lexer for directive text using logos

use std::fmt;

use logos::Logos;

use super::ast::Span;
use crate::po::lexer::unescape;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("=")]
    Equals,

    // Bare keys and values: anything up to whitespace, '=' or a quote
    #[regex(r#"[^ \t\r\n\f="]+"#, |lex| lex.slice().to_string())]
    Word(String),

    // Same escape rules as PO strings
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1])
    })]
    Quoted(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Equals => write!(f, "'='"),
            Token::Word(s) => write!(f, "'{}'", s),
            Token::Quoted(s) => write!(f, "string \"{}\"", s),
        }
    }
}

/// Lex directive text into tokens with spans
///
/// Returns the span of the first unrecognized input on failure, such as an
/// unterminated quote.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input)
            .expect("Should lex")
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_key_value_pairs() {
        assert_eq!(
            tokens("type=term src=greeting"),
            vec![
                Token::Word("type".to_string()),
                Token::Equals,
                Token::Word("term".to_string()),
                Token::Word("src".to_string()),
                Token::Equals,
                Token::Word("greeting".to_string()),
            ]
        );
    }

    #[test]
    fn test_paths_and_builtins_are_words() {
        assert_eq!(
            tokens("src=../partials/nav.html frala.Direction"),
            vec![
                Token::Word("src".to_string()),
                Token::Equals,
                Token::Word("../partials/nav.html".to_string()),
                Token::Word("frala.Direction".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_value() {
        assert_eq!(
            tokens(r#"src = "my term" "say \"hi\"""#),
            vec![
                Token::Word("src".to_string()),
                Token::Equals,
                Token::Quoted("my term".to_string()),
                Token::Quoted("say \"hi\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_escapes_decode_in_one_pass() {
        assert_eq!(
            tokens(r#""a\\\"b\n" "C:\\\\""#),
            vec![
                Token::Quoted("a\\\"b\n".to_string()),
                Token::Quoted("C:\\\\".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_is_rejected() {
        let err = lex(r#"src="greeting"#).expect_err("Should fail");
        assert_eq!(err.start, 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("   ").is_empty());
    }
}
