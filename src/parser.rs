use std::fmt;
use std::io::BufRead;

use tracing::{debug, trace};

use crate::Error;
use crate::command::Command;
use crate::grammar::{CommandKind, Grammar};
use crate::scanner::{ConfigScanner, LexError, Scan, ScanError};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An option where a command name was expected.
    UnexpectedOption(String),
    /// A token the scanner flagged as malformed.
    SyntaxError,
    /// A token that can never start a command.
    UnexpectedToken(String),
    /// A word that names no known command.
    InvalidCommand(String),
    /// Input ended part way through a command.
    UnexpectedEof,
    /// A token of the wrong kind for the command's grammar.
    ExpectedKind {
        expected: TokenKind,
        found: TokenKind,
        text: String,
    },
    /// A theme switch outside `--name`, `--component`, `--bgcolor`
    /// and `--fgcolor`.
    InvalidThemeOption(String),
    /// A view command without its view name.
    Usage { command: String },
    /// A split command whose name maps to no orientation.
    UnrecognisedCommand(String),
    /// A constructor was handed the wrong number of arguments.
    ArgumentCount {
        command: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedOption(text) => write!(f, "Unexpected Option \"{text}\""),
            Self::SyntaxError => write!(f, "Syntax Error"),
            Self::UnexpectedToken(text) => write!(f, "Unexpected token \"{text}\""),
            Self::InvalidCommand(text) => write!(f, "Invalid command \"{text}\""),
            Self::UnexpectedEof => write!(f, "Unexpected EOF"),
            Self::ExpectedKind {
                expected,
                found,
                text,
            } => write!(f, "Expected {expected} but got {found}: \"{text}\""),
            Self::InvalidThemeOption(text) => {
                write!(f, "Invalid option for theme command: \"{text}\"")
            }
            Self::Usage { command } => {
                write!(f, "Invalid {command} command. Usage: {command} [VIEW] [ARGS...]")
            }
            Self::UnrecognisedCommand(name) => write!(f, "Unrecognised command: {name}"),
            Self::ArgumentCount {
                command,
                expected,
                found,
            } => write!(
                f,
                "Invalid {command} command. Expected {expected} argument(s) but got {found}"
            ),
        }
    }
}

/// Error produced during parsing.
///
/// Renders as `<source>:<line>:<col> <message>[: <lexical error>]`,
/// dropping the location prefix when the source label is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{kind}{}", location(.input_source, .span), lex_detail(.lex_error.as_ref()))]
pub struct ParseError {
    pub input_source: String,
    pub span: Span,
    pub kind: ParseErrorKind,
    pub lex_error: Option<LexError>,
}

impl ParseError {
    /// Attribute an error to `token`, carrying over any lexical error
    /// the scanner attached to it.
    #[must_use]
    pub fn at(input_source: &str, token: &Token, kind: ParseErrorKind) -> Self {
        Self {
            input_source: input_source.to_string(),
            span: token.span,
            kind,
            lex_error: token.error.clone(),
        }
    }

    /// Whether the input ran out while this error was detected.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == ParseErrorKind::UnexpectedEof
    }
}

fn location(input_source: &str, span: &Span) -> String {
    if input_source.is_empty() {
        String::new()
    } else {
        format!("{input_source}:{}:{} ", span.line, span.column)
    }
}

fn lex_detail(error: Option<&LexError>) -> String {
    error.map_or_else(String::new, |err| format!(": {err}"))
}

/// Parse an in-memory source to completion.
///
/// Returns every command that parsed and every error encountered;
/// a malformed command only costs the line it is on.
#[must_use]
pub fn parse_str(input: &str, input_source: &str) -> (Vec<Command>, Vec<Error>) {
    let mut parser = ConfigParser::from_reader(input.as_bytes(), input_source);
    let mut commands = Vec::new();
    let mut errors = Vec::new();

    for result in parser.commands() {
        match result {
            Ok(command) => commands.push(command),
            Err(err) => errors.push(err),
        }
    }

    (commands, errors)
}

/// Pulls tokens from a scanner and turns them into commands, one
/// command per call to [`ConfigParser::parse_next`].
pub struct ConfigParser<S> {
    scanner: S,
    input_source: String,
    at_boundary: bool,
}

impl<R: BufRead> ConfigParser<ConfigScanner<R>> {
    /// Parser over a reader, using the built-in scanner.
    #[must_use]
    pub fn from_reader(reader: R, input_source: impl Into<String>) -> Self {
        Self::new(ConfigScanner::new(reader), input_source)
    }
}

impl<S: Scan> ConfigParser<S> {
    /// Parser over any token source.
    #[must_use]
    pub fn new(scanner: S, input_source: impl Into<String>) -> Self {
        Self {
            scanner,
            input_source: input_source.into(),
            at_boundary: true,
        }
    }

    /// Label used to prefix error messages.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.input_source
    }

    /// Parse the next command.
    ///
    /// Returns `Ok(None)` once input is exhausted. After a parse error
    /// the rest of the offending command is discarded so the next call
    /// starts on a fresh command. Scanner failures are returned as is.
    ///
    /// # Errors
    ///
    /// `Error::Parse` for malformed commands (check
    /// [`Error::is_eof`] to see whether input also ran out) and
    /// `Error::Scan` when the underlying input could not be read.
    pub fn parse_next(&mut self) -> Result<Option<Command>, Error> {
        let result = self.parse_statement();

        if let Err(Error::Parse(err)) = &result {
            self.discard_tokens_until_next_command(err);
        }

        result
    }

    /// Iterate over the remaining commands.
    ///
    /// The iterator ends at end of input, after an error that hit end
    /// of input, or after a scanner failure.
    pub const fn commands(&mut self) -> Commands<'_, S> {
        Commands {
            parser: self,
            done: false,
        }
    }

    fn parse_statement(&mut self) -> Result<Option<Command>, Error> {
        loop {
            let token = self.scan()?;

            let kind = match token.kind {
                TokenKind::Word => return self.parse_command(token).map(Some),
                TokenKind::Terminator => continue,
                TokenKind::EndOfInput => return Ok(None),
                TokenKind::Option => ParseErrorKind::UnexpectedOption(token.text.clone()),
                TokenKind::Invalid => ParseErrorKind::SyntaxError,
                TokenKind::WhiteSpace | TokenKind::Comment => {
                    ParseErrorKind::UnexpectedToken(token.text.clone())
                }
            };

            return Err(self.error(&token, kind));
        }
    }

    fn parse_command(&mut self, command: Token) -> Result<Command, Error> {
        let Some(kind) = CommandKind::from_name(&command.text) else {
            let text = command.text.clone();
            return Err(self.error(&command, ParseErrorKind::InvalidCommand(text)));
        };

        let tokens = match kind.grammar() {
            Grammar::Fixed(expected) => {
                let tokens = self.parse_fixed_args(expected)?;
                self.expect_end_of_command()?;
                tokens
            }
            Grammar::Variadic => self.parse_variadic_args()?,
        };

        let command = kind.build(&self.input_source, command, tokens)?;
        trace!(command = command.name(), "parsed command");
        Ok(command)
    }

    fn parse_fixed_args(&mut self, expected: &[TokenKind]) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::with_capacity(expected.len());

        for &expected in expected {
            let token = self.scan()?;

            if token.error.is_some() {
                return Err(self.error(&token, ParseErrorKind::SyntaxError));
            }
            if token.kind == TokenKind::EndOfInput {
                return Err(self.error(&token, ParseErrorKind::UnexpectedEof));
            }
            if token.kind != expected {
                let kind = ParseErrorKind::ExpectedKind {
                    expected,
                    found: token.kind,
                    text: token.text.clone(),
                };
                return Err(self.error(&token, kind));
            }

            tokens.push(token);
        }

        Ok(tokens)
    }

    /// A fixed-arity command must be followed by a terminator or the
    /// end of input; trailing tokens are a grammar error.
    ///
    /// The whole line is rejected, so `q now` is one error rather than
    /// a `q` followed by an invalid command `now`.
    fn expect_end_of_command(&mut self) -> Result<(), Error> {
        let token = self.scan()?;

        match token.kind {
            TokenKind::Terminator | TokenKind::EndOfInput => Ok(()),
            _ if token.error.is_some() => Err(self.error(&token, ParseErrorKind::SyntaxError)),
            found => {
                let kind = ParseErrorKind::ExpectedKind {
                    expected: TokenKind::Terminator,
                    found,
                    text: token.text.clone(),
                };
                Err(self.error(&token, kind))
            }
        }
    }

    fn parse_variadic_args(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan()?;

            if token.error.is_some() {
                return Err(self.error(&token, ParseErrorKind::SyntaxError));
            }
            if matches!(token.kind, TokenKind::Terminator | TokenKind::EndOfInput) {
                return Ok(tokens);
            }

            tokens.push(token);
        }
    }

    /// Next token that is neither whitespace nor a comment.
    fn scan(&mut self) -> Result<Token, ScanError> {
        loop {
            let token = self.scanner.scan()?;
            if token.is_insignificant() {
                continue;
            }
            self.at_boundary = matches!(
                token.kind,
                TokenKind::Terminator | TokenKind::EndOfInput
            );
            trace!(
                kind = %token.kind,
                line = token.span.line,
                column = token.span.column,
                "scanned token"
            );
            return Ok(token);
        }
    }

    fn error(&self, token: &Token, kind: ParseErrorKind) -> Error {
        Error::Parse(ParseError::at(&self.input_source, token, kind))
    }

    /// Skip to the start of the next command. Best effort: a scanner
    /// failure simply ends the skip.
    fn discard_tokens_until_next_command(&mut self, err: &ParseError) {
        let mut discarded = 0usize;

        while !self.at_boundary {
            match self.scan() {
                Ok(_) => discarded += 1,
                Err(scan_err) => {
                    debug!(error = %scan_err, "scanner failed during recovery");
                    self.at_boundary = true;
                }
            }
        }

        debug!(
            source = %self.input_source,
            line = err.span.line,
            discarded,
            "recovered from parse error"
        );
    }
}

/// Iterator returned by [`ConfigParser::commands`].
pub struct Commands<'p, S> {
    parser: &'p mut ConfigParser<S>,
    done: bool,
}

impl<S: Scan> Iterator for Commands<'_, S> {
    type Item = Result<Command, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.parse_next() {
            Ok(Some(command)) => Some(Ok(command)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = err.is_eof() || matches!(err, Error::Scan(_));
                Some(Err(err))
            }
        }
    }
}
