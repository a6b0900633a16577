//! Formula tokenizer using Logos.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token types of the formula language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    /// A field reference like `C13`; the slice excludes the `C`.
    #[regex(r"[Cc][0-9]+", |lex| &lex.slice()[1..])]
    Field(&'src str),

    /// A non-negative decimal constant like `0.13`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number(&'src str),

    /// `GREATEST`, any case.
    #[token("GREATEST", ignore(ascii_case))]
    Greatest,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(code) => write!(f, "C{code}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Greatest => write!(f, "GREATEST"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
        }
    }
}

/// Tokenizes a formula, failing on the first unrecognized character.
///
/// Returns the byte range of the offending text on error.
pub fn tokenize(source: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, Range<usize>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return Err(lexer.span()),
        }
    }
    Ok(tokens)
}
