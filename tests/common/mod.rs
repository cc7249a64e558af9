#![allow(dead_code)]

use tuiconf::{
    Command, ConfigParser, Error, ParseError, Scan, ScanError, Span, Token, TokenKind, format,
    parse_str,
};

pub const SOURCE: &str = "test";

/// Parse a single command, asserting it parsed cleanly.
pub fn parse_one(input: &str) -> Command {
    let mut parser = ConfigParser::from_reader(input.as_bytes(), SOURCE);
    match parser.parse_next() {
        Ok(Some(command)) => command,
        other => panic!("expected a command from {input:?}, got {other:?}"),
    }
}

/// Parse the first command of `input`, asserting it failed to parse.
pub fn parse_error(input: &str) -> ParseError {
    let mut parser = ConfigParser::from_reader(input.as_bytes(), SOURCE);
    match parser.parse_next() {
        Err(Error::Parse(err)) => err,
        other => panic!("expected a parse error from {input:?}, got {other:?}"),
    }
}

/// Text of each token, for comparing argument lists.
pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Parse, format, and assert the formatted text is unchanged.
pub fn roundtrip(input: &str) {
    let (commands, errors) = parse_str(input, SOURCE);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let output = format(&commands);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Scanner that replays a fixed list of results, then reports end of
/// input forever.
pub struct ScriptedScanner {
    items: std::vec::IntoIter<Result<Token, ScanError>>,
    end: Span,
}

impl ScriptedScanner {
    pub fn new(items: Vec<Result<Token, ScanError>>) -> Self {
        Self {
            items: items.into_iter(),
            end: Span::new(99, 1),
        }
    }
}

impl Scan for ScriptedScanner {
    fn scan(&mut self) -> Result<Token, ScanError> {
        self.items
            .next()
            .unwrap_or_else(|| Ok(Token::new(TokenKind::EndOfInput, "", self.end)))
    }
}

pub fn tok(kind: TokenKind, text: &str, column: usize) -> Result<Token, ScanError> {
    Ok(Token::new(kind, text, Span::new(1, column)))
}

pub fn broken_pipe() -> Result<Token, ScanError> {
    Err(ScanError::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "pipe closed",
    )))
}
