use std::fmt;
use std::io::{self, BufRead};

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexical error embedded in an `Invalid` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Double-quoted section not closed before the end of the line.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated quoted string")
            }
        }
    }
}

/// Lexical error attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// The scanner could not produce a token at all.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Reading the underlying input failed (includes invalid UTF-8).
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// A pull-based source of tokens.
///
/// Once input is exhausted every call returns an `EndOfInput` token.
pub trait Scan {
    /// Produce the next token.
    fn scan(&mut self) -> Result<Token, ScanError>;
}

impl<S: Scan + ?Sized> Scan for &mut S {
    fn scan(&mut self) -> Result<Token, ScanError> {
        (**self).scan()
    }
}

impl<S: Scan + ?Sized> Scan for Box<S> {
    fn scan(&mut self) -> Result<Token, ScanError> {
        (**self).scan()
    }
}

/// Tokenize an in-memory source string.
///
/// The trailing `EndOfInput` token is not included.
///
/// # Errors
///
/// Never fails for string input in practice; the signature mirrors
/// [`Scan::scan`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = ConfigScanner::new(input.as_bytes());
    let mut tokens = Vec::new();

    loop {
        let token = scanner.scan()?;
        if token.kind == TokenKind::EndOfInput {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

/// Scanner for the configuration command language.
///
/// Reads its input one line at a time, so it only blocks when it
/// needs the next line.
pub struct ConfigScanner<R> {
    reader: R,
    buf: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    started: bool,
    exhausted: bool,
}

impl<R: BufRead> ConfigScanner<R> {
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pos: 0,
            line: 1,
            col: 1,
            started: false,
            exhausted: false,
        }
    }

    /// Make sure at least one character is buffered. Returns `false`
    /// at the end of input.
    fn fill(&mut self) -> Result<bool, ScanError> {
        if self.pos < self.buf.len() {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            self.exhausted = true;
            return Ok(false);
        }

        let text = if self.started {
            line.as_str()
        } else {
            self.started = true;
            line.strip_prefix('\u{FEFF}').unwrap_or(&line)
        };

        self.buf = text.chars().collect();
        self.pos = 0;

        // A lone BOM line leaves nothing to scan.
        if self.buf.is_empty() {
            return self.fill();
        }

        Ok(true)
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.buf.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.buf.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        Some(ch)
    }

    fn at_line_end(&self) -> bool {
        match self.peek() {
            None | Some('\n') => true,
            Some('\r') => self.peek_at(1) == Some('\n'),
            Some(_) => false,
        }
    }

    fn read_terminator(&mut self, start: Span) -> Token {
        if self.peek() == Some('\r') {
            self.advance();
        }
        self.advance();
        Token::new(TokenKind::Terminator, "\n", start)
    }

    fn read_whitespace(&mut self, start: Span) -> Token {
        let mut text = String::new();

        while !self.at_line_end() {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    text.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }

        Token::new(TokenKind::WhiteSpace, text, start)
    }

    fn read_comment(&mut self, start: Span) -> Token {
        let mut text = String::new();

        while !self.at_line_end() {
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }

        Token::new(TokenKind::Comment, text, start)
    }

    fn read_word(&mut self, start: Span) -> Token {
        let mut raw = String::new();
        let mut text = String::new();
        let mut quote_start: Option<Span> = None;

        loop {
            if self.at_line_end() {
                break;
            }
            let Some(ch) = self.peek() else {
                break;
            };

            if quote_start.is_some() {
                self.advance();
                raw.push(ch);
                match ch {
                    '"' => quote_start = None,
                    '\\' => self.read_quoted_escape(&mut raw, &mut text),
                    _ => text.push(ch),
                }
                continue;
            }

            match ch {
                ';' | '#' => break,
                c if c.is_whitespace() => break,
                '"' => {
                    quote_start = Some(self.span());
                    self.advance();
                    raw.push(ch);
                }
                '\\' => {
                    self.advance();
                    raw.push(ch);
                    if self.at_line_end() {
                        text.push('\\');
                    } else if let Some(escaped) = self.advance() {
                        raw.push(escaped);
                        text.push(escaped);
                    }
                }
                _ => {
                    self.advance();
                    raw.push(ch);
                    text.push(ch);
                }
            }
        }

        if let Some(span) = quote_start {
            return Token::invalid(
                raw,
                start,
                LexError {
                    kind: LexErrorKind::UnterminatedString,
                    span,
                },
            );
        }

        let kind = if raw.starts_with("--") {
            TokenKind::Option
        } else {
            TokenKind::Word
        };

        Token::new(kind, text, start)
    }

    fn read_quoted_escape(&mut self, raw: &mut String, text: &mut String) {
        if self.at_line_end() {
            text.push('\\');
            return;
        }
        let Some(escaped) = self.advance() else {
            return;
        };
        raw.push(escaped);
        match escaped {
            'n' => text.push('\n'),
            't' => text.push('\t'),
            '"' | '\\' => text.push(escaped),
            other => {
                text.push('\\');
                text.push(other);
            }
        }
    }
}

impl<R: BufRead> Scan for ConfigScanner<R> {
    fn scan(&mut self) -> Result<Token, ScanError> {
        if !self.fill()? {
            return Ok(Token::new(TokenKind::EndOfInput, "", self.span()));
        }

        let start = self.span();
        let token = match self.peek() {
            Some('\n') => self.read_terminator(start),
            Some('\r') if self.peek_at(1) == Some('\n') => self.read_terminator(start),
            Some(';') => {
                self.advance();
                Token::new(TokenKind::Terminator, ";", start)
            }
            Some('#') => self.read_comment(start),
            Some(ch) if ch.is_whitespace() => self.read_whitespace(start),
            _ => self.read_word(start),
        };

        Ok(token)
    }
}
