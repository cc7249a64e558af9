//! Scanner, parser, and formatter for a terminal application's
//! configuration command language.
//!
//! The same language is used for startup configuration files and for
//! commands typed at runtime, one command per line (or separated by
//! `;`):
//!
//! ```text
//! set theme solarized
//! theme --name solarized --component CommitView.Date --bgcolor NONE --fgcolor YELLOW
//! map All <C-n> <Down>
//! addtab Logs
//! vsplit CommitView
//! ```
//!
//! A malformed command produces an error for its own line only; the
//! parser resynchronizes at the next terminator and carries on.
//!
//! # Quick start
//!
//! ```
//! use tuiconf::{Command, ConfigParser};
//!
//! let mut parser = ConfigParser::from_reader("set mouse true\nbogus\nq\n".as_bytes(), "grvrc");
//!
//! assert!(matches!(parser.parse_next(), Ok(Some(Command::Set(_)))));
//!
//! let err = parser.parse_next().unwrap_err();
//! assert_eq!(err.to_string(), "grvrc:2:1 Invalid command \"bogus\"");
//!
//! assert_eq!(parser.parse_next().unwrap(), Some(Command::Quit));
//! assert_eq!(parser.parse_next().unwrap(), None);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod command;
pub mod formatter;
pub mod grammar;
pub mod parser;
pub mod scanner;
pub mod token;

pub use command::{
    AddViewCommand, Command, MapCommand, NewTabCommand, Orientation, SetCommand, SplitViewCommand,
    ThemeCommand, UnmapCommand,
};
pub use formatter::format;
pub use grammar::{CommandKind, Grammar};
pub use parser::{Commands, ConfigParser, ParseError, ParseErrorKind, parse_str};
pub use scanner::{ConfigScanner, LexError, LexErrorKind, Scan, ScanError, tokenize};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering scanner failures and parse errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The scanner could not read its input.
    #[error("{0}")]
    Scan(#[from] ScanError),
    /// A malformed command.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Whether input ran out part way through the failed command.
    ///
    /// Callers looping over [`ConfigParser::parse_next`] should stop
    /// once this is `true`.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        match self {
            Self::Parse(err) => err.is_eof(),
            Self::Scan(_) => false,
        }
    }
}
