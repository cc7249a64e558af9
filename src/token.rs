use std::fmt;

use crate::scanner::LexError;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare or quoted word.
    Word,
    /// Word starting with `--`.
    Option,
    /// Run of non-newline whitespace.
    WhiteSpace,
    /// Comment (`# ...`).
    Comment,
    /// Statement terminator (newline or `;`).
    Terminator,
    /// End of input.
    EndOfInput,
    /// Malformed input; the token carries a `LexError`.
    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Word => "Word",
            Self::Option => "Option",
            Self::WhiteSpace => "WhiteSpace",
            Self::Comment => "Comment",
            Self::Terminator => "Terminator",
            Self::EndOfInput => "EOF",
            Self::Invalid => "Invalid",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, text, and source location.
///
/// `error` is set when the scanner recognised malformed input but
/// still hands back a placeholder token so the parser can report the
/// problem at the right position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub error: Option<LexError>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            error: None,
        }
    }

    /// Build an `Invalid` token carrying a lexical error.
    #[must_use]
    pub fn invalid(text: impl Into<String>, span: Span, error: LexError) -> Self {
        Self {
            kind: TokenKind::Invalid,
            text: text.into(),
            span,
            error: Some(error),
        }
    }

    /// Shorthand for a `Word` token.
    #[must_use]
    pub fn word(text: impl Into<String>, span: Span) -> Self {
        Self::new(TokenKind::Word, text, span)
    }

    /// Whitespace and comments carry no meaning for the parser.
    #[must_use]
    pub const fn is_insignificant(&self) -> bool {
        matches!(self.kind, TokenKind::WhiteSpace | TokenKind::Comment)
    }
}
