//! Pretty-printer that serializes commands back into canonical text.
//!
//! One command per line, single spaces between tokens, and quoting
//! only where the scanner would otherwise split or reinterpret a
//! value.

use std::fmt::{self, Write as _};

use crate::command::{Command, ThemeCommand};
use crate::token::{Token, TokenKind};

const THEME_SWITCHES: usize = 4;

/// Format commands into a configuration source string.
///
/// Every command is followed by a newline.
#[must_use]
pub fn format(commands: &[Command]) -> String {
    let mut out = String::new();

    for command in commands {
        let _ = writeln!(out, "{command}");
    }

    out
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;

        match self {
            Self::Set(set) => write_tokens(f, [&set.variable, &set.value]),
            Self::Theme(theme) => write_theme(f, theme),
            Self::Map(map) => write_tokens(f, [&map.view, &map.from, &map.to]),
            Self::Unmap(unmap) => write_tokens(f, [&unmap.view, &unmap.from]),
            Self::Quit | Self::RemoveTab => Ok(()),
            Self::NewTab(tab) => write_token(f, &tab.tab_name),
            Self::AddView(add) => {
                write_token(f, &add.view)?;
                write_tokens(f, &add.args)
            }
            Self::SplitView(split) => {
                write_token(f, &split.view)?;
                write_tokens(f, &split.args)
            }
        }
    }
}

/// Theme always takes four switch/value pairs. Missing switches are
/// made up by repeating the first set one, which parses back to the
/// same command.
fn write_theme(f: &mut fmt::Formatter<'_>, theme: &ThemeCommand) -> fmt::Result {
    let set: Vec<_> = theme
        .options()
        .into_iter()
        .filter_map(|(switch, value)| value.map(|value| (switch, value)))
        .collect();
    let Some(&first) = set.first() else {
        return Ok(());
    };

    let padding = std::iter::repeat_n(first, THEME_SWITCHES - set.len());
    for (switch, value) in padding.chain(set.iter().copied()) {
        write!(f, " {switch}")?;
        write_token(f, value)?;
    }
    Ok(())
}

fn write_tokens<'a>(
    f: &mut fmt::Formatter<'_>,
    tokens: impl IntoIterator<Item = &'a Token>,
) -> fmt::Result {
    for token in tokens {
        write_token(f, token)?;
    }
    Ok(())
}

/// Write a space and then the token, quoted if needed.
fn write_token(f: &mut fmt::Formatter<'_>, token: &Token) -> fmt::Result {
    f.write_char(' ')?;

    if token.kind == TokenKind::Option {
        let rest = token.text.strip_prefix("--").unwrap_or(&token.text);
        f.write_str("--")?;
        return write_value(f, rest, false);
    }

    write_value(f, &token.text, true)
}

fn write_value(f: &mut fmt::Formatter<'_>, text: &str, guard_option: bool) -> fmt::Result {
    if !needs_quotes(text, guard_option) {
        return f.write_str(text);
    }

    f.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

fn needs_quotes(text: &str, guard_option: bool) -> bool {
    if guard_option && (text.is_empty() || text.starts_with("--")) {
        return true;
    }
    text.chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, ';' | '#' | '"' | '\\'))
}
