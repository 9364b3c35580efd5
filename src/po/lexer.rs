//! Lexer for gettext PO files using logos

use std::fmt;

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("msgctxt")]
    MsgCtxt,
    #[token("msgid")]
    MsgId,
    #[token("msgid_plural")]
    MsgIdPlural,
    #[token("msgstr")]
    MsgStr,

    #[regex(r"msgstr\[[0-9]+\]", |lex| {
        let s = lex.slice();
        s[7..s.len()-1].parse::<usize>().ok()
    })]
    MsgStrIndex(usize),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1])
    })]
    Str(String),

    // Translator, extracted, reference and flag comments (skip)
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::MsgCtxt => write!(f, "keyword 'msgctxt'"),
            Token::MsgId => write!(f, "keyword 'msgid'"),
            Token::MsgIdPlural => write!(f, "keyword 'msgid_plural'"),
            Token::MsgStr => write!(f, "keyword 'msgstr'"),
            Token::MsgStrIndex(n) => write!(f, "keyword 'msgstr[{}]'", n),
            Token::Str(s) => write!(f, "string \"{}\"", escape(s)),
            Token::Comment => write!(f, "comment"),
        }
    }
}

/// Lex PO source into tokens with spans
///
/// Returns the span of the first unrecognized input on failure.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
        .collect()
}

/// Decode C-style escapes inside a quoted string
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Encode a value for use inside a PO string
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}
