//! Per-command grammar table and command constructors.
//!
//! Every command name maps to exactly one [`CommandKind`]. Its
//! [`Grammar`] tells the parser which argument tokens to read, and
//! [`CommandKind::build`] turns the matched tokens into a [`Command`].

use crate::command::{
    AddViewCommand, Command, MapCommand, NewTabCommand, Orientation, SetCommand, SplitViewCommand,
    ThemeCommand, UnmapCommand,
};
use crate::parser::{ParseError, ParseErrorKind};
use crate::token::{Token, TokenKind};

/// Argument shape a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Exactly these kinds, in order.
    Fixed(&'static [TokenKind]),
    /// Every token up to the end of the command.
    Variadic,
}

const NO_ARGS: &[TokenKind] = &[];
const ONE_WORD: &[TokenKind] = &[TokenKind::Word];
const TWO_WORDS: &[TokenKind] = &[TokenKind::Word, TokenKind::Word];
const THREE_WORDS: &[TokenKind] = &[TokenKind::Word, TokenKind::Word, TokenKind::Word];
const THEME_ARGS: &[TokenKind] = &[
    TokenKind::Option,
    TokenKind::Word,
    TokenKind::Option,
    TokenKind::Word,
    TokenKind::Option,
    TokenKind::Word,
    TokenKind::Option,
    TokenKind::Word,
];

type ThemeSetter = fn(&mut ThemeCommand, Token);

const THEME_OPTIONS: [(&str, ThemeSetter); 4] = [
    ("--name", |theme, value| theme.name = Some(value)),
    ("--component", |theme, value| theme.component = Some(value)),
    ("--bgcolor", |theme, value| theme.bgcolor = Some(value)),
    ("--fgcolor", |theme, value| theme.fgcolor = Some(value)),
];

/// Every command the language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Set,
    Theme,
    Map,
    Unmap,
    Quit,
    AddTab,
    RemoveTab,
    AddView,
    VSplit,
    HSplit,
    Split,
}

impl CommandKind {
    /// Every registered command, in usage order.
    pub const ALL: [Self; 11] = [
        Self::Set,
        Self::Theme,
        Self::Map,
        Self::Unmap,
        Self::Quit,
        Self::AddTab,
        Self::RemoveTab,
        Self::AddView,
        Self::VSplit,
        Self::HSplit,
        Self::Split,
    ];

    /// Look up a command by name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Name the command is invoked by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Theme => "theme",
            Self::Map => "map",
            Self::Unmap => "unmap",
            Self::Quit => "q",
            Self::AddTab => "addtab",
            Self::RemoveTab => "rmtab",
            Self::AddView => "addview",
            Self::VSplit => "vsplit",
            Self::HSplit => "hsplit",
            Self::Split => "split",
        }
    }

    /// Argument shape the driver enforces before building.
    #[must_use]
    pub const fn grammar(self) -> Grammar {
        match self {
            Self::Set | Self::Unmap => Grammar::Fixed(TWO_WORDS),
            Self::Theme => Grammar::Fixed(THEME_ARGS),
            Self::Map => Grammar::Fixed(THREE_WORDS),
            Self::Quit | Self::RemoveTab => Grammar::Fixed(NO_ARGS),
            Self::AddTab => Grammar::Fixed(ONE_WORD),
            Self::AddView | Self::VSplit | Self::HSplit | Self::Split => Grammar::Variadic,
        }
    }

    /// One-line usage text, as shown by the CLI.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Set => "set VAR VALUE",
            Self::Theme => "theme --name NAME --component COMPONENT --bgcolor BG --fgcolor FG",
            Self::Map => "map VIEW FROM TO",
            Self::Unmap => "unmap VIEW FROM",
            Self::Quit => "q",
            Self::AddTab => "addtab NAME",
            Self::RemoveTab => "rmtab",
            Self::AddView => "addview VIEW [ARGS...]",
            Self::VSplit => "vsplit VIEW [ARGS...]",
            Self::HSplit => "hsplit VIEW [ARGS...]",
            Self::Split => "split VIEW [ARGS...]",
        }
    }

    /// Build the command from its name token and the argument tokens
    /// matched against [`Self::grammar`].
    ///
    /// `input_source` labels any error produced here.
    pub fn build(
        self,
        input_source: &str,
        command: Token,
        tokens: Vec<Token>,
    ) -> Result<Command, ParseError> {
        let command = match self {
            Self::Set => {
                let [variable, value] = take::<2>(input_source, &command, tokens)?;
                Command::Set(SetCommand { variable, value })
            }
            Self::Theme => build_theme(input_source, &command, tokens)?,
            Self::Map => {
                let [view, from, to] = take::<3>(input_source, &command, tokens)?;
                Command::Map(MapCommand { view, from, to })
            }
            Self::Unmap => {
                let [view, from] = take::<2>(input_source, &command, tokens)?;
                Command::Unmap(UnmapCommand { view, from })
            }
            Self::Quit => {
                let [] = take::<0>(input_source, &command, tokens)?;
                Command::Quit
            }
            Self::AddTab => {
                let [tab_name] = take::<1>(input_source, &command, tokens)?;
                Command::NewTab(NewTabCommand { tab_name })
            }
            Self::RemoveTab => {
                let [] = take::<0>(input_source, &command, tokens)?;
                Command::RemoveTab
            }
            Self::AddView => {
                let (view, args) = split_view_args(input_source, &command, tokens)?;
                Command::AddView(AddViewCommand { view, args })
            }
            Self::VSplit | Self::HSplit | Self::Split => {
                build_split_view(input_source, &command, tokens)?
            }
        };

        Ok(command)
    }
}

/// Positional assignment for fixed-arity commands.
fn take<const N: usize>(
    input_source: &str,
    command: &Token,
    tokens: Vec<Token>,
) -> Result<[Token; N], ParseError> {
    let found = tokens.len();
    tokens.try_into().map_err(|_| {
        ParseError::at(
            input_source,
            command,
            ParseErrorKind::ArgumentCount {
                command: command.text.clone(),
                expected: N,
                found,
            },
        )
    })
}

fn build_theme(
    input_source: &str,
    command: &Token,
    tokens: Vec<Token>,
) -> Result<Command, ParseError> {
    if tokens.len() % 2 != 0 {
        return Err(ParseError::at(
            input_source,
            command,
            ParseErrorKind::ArgumentCount {
                command: command.text.clone(),
                expected: THEME_ARGS.len(),
                found: tokens.len(),
            },
        ));
    }

    let mut theme = ThemeCommand::default();
    let mut tokens = tokens.into_iter();

    while let (Some(option), Some(value)) = (tokens.next(), tokens.next()) {
        let Some((_, setter)) = THEME_OPTIONS
            .iter()
            .find(|(switch, _)| *switch == option.text)
        else {
            return Err(ParseError::at(
                input_source,
                &option,
                ParseErrorKind::InvalidThemeOption(option.text.clone()),
            ));
        };
        setter(&mut theme, value);
    }

    Ok(Command::Theme(theme))
}

/// Split variadic arguments into the leading view name and the rest.
fn split_view_args(
    input_source: &str,
    command: &Token,
    tokens: Vec<Token>,
) -> Result<(Token, Vec<Token>), ParseError> {
    let mut tokens = tokens.into_iter();
    let Some(view) = tokens.next() else {
        return Err(ParseError::at(
            input_source,
            command,
            ParseErrorKind::Usage {
                command: command.text.clone(),
            },
        ));
    };
    Ok((view, tokens.collect()))
}

fn build_split_view(
    input_source: &str,
    command: &Token,
    tokens: Vec<Token>,
) -> Result<Command, ParseError> {
    let (view, args) = split_view_args(input_source, command, tokens)?;

    let Some(orientation) = Orientation::from_command(&command.text) else {
        return Err(ParseError::at(
            input_source,
            command,
            ParseErrorKind::UnrecognisedCommand(command.text.clone()),
        ));
    };

    Ok(Command::SplitView(SplitViewCommand {
        orientation,
        view,
        args,
    }))
}
