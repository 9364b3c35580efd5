//! Directive grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::ast::{Directive, DirectiveKind, Pair, Spanned};
use super::lexer::{self, Token};
use crate::error::{describe_rich, DirectiveError};

/// Parse directive text into its `key=value` pairs, in source order
pub fn parse_pairs(input: &str) -> Result<Vec<Spanned<Pair>>, DirectiveError> {
    let len = input.len();

    let tokens = lexer::lex(input).map_err(|span| DirectiveError::Syntax {
        message: format!("unrecognized input '{}'", &input[span.clone()]),
        span,
        expected: Vec::new(),
    })?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    pairs_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            // Only the first error is reported inline
            match errs.first() {
                Some(err) => {
                    let (span, message, expected) = describe_rich(err);
                    DirectiveError::Syntax {
                        span,
                        message,
                        expected,
                    }
                }
                None => DirectiveError::Syntax {
                    span: 0..len,
                    message: "unparseable directive".to_string(),
                    expected: Vec::new(),
                },
            }
        })
}

/// Decode directive text into a [`Directive`]
///
/// Unknown keys are ignored and a repeated key keeps its last value. `type`
/// and a non-empty `src` are required.
pub fn decode(input: &str) -> Result<Directive, DirectiveError> {
    let mut kind = None;
    let mut source = None;
    let mut lang = None;

    for pair in parse_pairs(input)? {
        let Pair { key, value } = pair.node;
        match key.as_str() {
            "type" => kind = Some(value),
            "src" => source = Some(value),
            "lang" => lang = Some(value),
            _ => {}
        }
    }

    let kind = kind.ok_or(DirectiveError::MissingField { field: "type" })?;
    let kind = DirectiveKind::from_name(&kind).ok_or(DirectiveError::UnknownKind { kind })?;

    let source = source
        .filter(|s| !s.is_empty())
        .ok_or(DirectiveError::MissingField { field: "src" })?;

    Ok(Directive {
        kind,
        source,
        lang: lang.filter(|l| !l.is_empty()),
    })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn pairs_parser<'a, I>() -> impl Parser<'a, I, Vec<Spanned<Pair>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let key = select! {
        Token::Word(s) => s,
    };

    let value = select! {
        Token::Word(s) => s,
        Token::Quoted(s) => s,
    };

    let pair = key
        .then_ignore(just(Token::Equals))
        .then(value)
        .map_with(|(key, value), e| Spanned::new(Pair { key, value }, span_range(&e.span())));

    pair.repeated().collect::<Vec<_>>().then_ignore(end())
}
