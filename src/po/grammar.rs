//! PO grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::lexer::{self, Token};
use super::PoMessage;
use crate::error::{describe_rich, PoError};

/// Parse PO source into its entries, header entry included
pub fn parse_entries(input: &str) -> Result<Vec<PoMessage>, PoError> {
    let len = input.len();

    let tokens = lexer::lex(input).map_err(|span| PoError::Syntax {
        message: "unrecognized input".to_string(),
        span,
    })?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    entries_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| match errs.first() {
            Some(err) => {
                let (span, message, expected) = describe_rich(err);
                let message = if expected.is_empty() {
                    message
                } else {
                    format!("{} (expected {})", message, expected.join(", "))
                };
                PoError::Syntax { span, message }
            }
            None => PoError::Syntax {
                span: 0..len,
                message: "unparseable PO file".to_string(),
            },
        })
}

fn entries_parser<'a, I>() -> impl Parser<'a, I, Vec<PoMessage>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Adjacent strings are concatenated: msgstr "" "Language: fi\n"
    let string = select! {
        Token::Str(s) => s,
    }
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>()
    .map(|parts| parts.concat());

    let context = just(Token::MsgCtxt).ignore_then(string.clone()).or_not();
    let id = just(Token::MsgId).ignore_then(string.clone());
    let plural = just(Token::MsgIdPlural).ignore_then(string.clone()).or_not();

    let single = just(Token::MsgStr)
        .ignore_then(string.clone())
        .map(|s| vec![s]);
    let indexed = select! {
        Token::MsgStrIndex(_) => (),
    }
    .ignore_then(string.clone())
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>();

    let entry = context
        .then(id)
        .then(plural)
        .then(single.or(indexed))
        .map(|(((context, id), plural), translations)| PoMessage {
            context,
            id,
            plural,
            translations,
        });

    entry.repeated().collect::<Vec<_>>().then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_entries() {
        let entries = parse_entries("msgid \"a\"\nmsgstr \"A\"\n\nmsgid \"b\"\nmsgstr \"\"\n")
            .expect("Should parse");
        assert_eq!(
            entries,
            vec![PoMessage::new("a", "A"), PoMessage::new("b", "")]
        );
    }

    #[test]
    fn test_multiline_strings_concatenate() {
        let entries = parse_entries("msgid \"\"\n\"long \"\n\"id\"\nmsgstr \"x\"").expect("Should parse");
        assert_eq!(entries[0].id, "long id");
    }

    #[test]
    fn test_context_and_plural() {
        let input = r#"
msgctxt "menu"
msgid "file"
msgid_plural "files"
msgstr[0] "tiedosto"
msgstr[1] "tiedostot"
"#;
        let entries = parse_entries(input).expect("Should parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].context.as_deref(), Some("menu"));
        assert_eq!(entries[0].plural.as_deref(), Some("files"));
        assert_eq!(entries[0].translations, vec!["tiedosto", "tiedostot"]);
    }

    #[test]
    fn test_missing_msgstr_is_error() {
        let result = parse_entries("msgid \"a\"\nmsgid \"b\"\nmsgstr \"B\"");
        assert!(matches!(result, Err(PoError::Syntax { .. })));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let result = parse_entries("msgid \"a\nmsgstr \"A\"");
        assert!(result.is_err());
    }
}
