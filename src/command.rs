//! Typed command values produced by the parser.
//!
//! Every field is an owned [`Token`], so the original text and
//! position stay available to whatever applies the command.

use crate::token::Token;

/// Layout direction for a split view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Let the container pick based on available space (`split`).
    Dynamic,
    /// Side by side (`hsplit`).
    Horizontal,
    /// Stacked (`vsplit`).
    Vertical,
}

impl Orientation {
    /// Map a split command name to its orientation.
    #[must_use]
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "split" => Some(Self::Dynamic),
            "hsplit" => Some(Self::Horizontal),
            "vsplit" => Some(Self::Vertical),
            _ => None,
        }
    }

    /// The command name that produces this orientation.
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Dynamic => "split",
            Self::Horizontal => "hsplit",
            Self::Vertical => "vsplit",
        }
    }
}

/// `set VAR VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommand {
    pub variable: Token,
    pub value: Token,
}

/// `theme --name N --component C --bgcolor B --fgcolor F`
///
/// Fields stay `None` when their switch was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeCommand {
    pub name: Option<Token>,
    pub component: Option<Token>,
    pub bgcolor: Option<Token>,
    pub fgcolor: Option<Token>,
}

/// `map VIEW FROM TO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCommand {
    pub view: Token,
    pub from: Token,
    pub to: Token,
}

/// `unmap VIEW FROM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmapCommand {
    pub view: Token,
    pub from: Token,
}

/// `addtab NAME`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTabCommand {
    pub tab_name: Token,
}

/// `addview VIEW [ARGS...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddViewCommand {
    pub view: Token,
    pub args: Vec<Token>,
}

/// `split|hsplit|vsplit VIEW [ARGS...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitViewCommand {
    pub orientation: Orientation,
    pub view: Token,
    pub args: Vec<Token>,
}

/// A parsed configuration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(SetCommand),
    Theme(ThemeCommand),
    Map(MapCommand),
    Unmap(UnmapCommand),
    Quit,
    NewTab(NewTabCommand),
    RemoveTab,
    AddView(AddViewCommand),
    SplitView(SplitViewCommand),
}

impl Command {
    /// The command-language keyword for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Set(_) => "set",
            Self::Theme(_) => "theme",
            Self::Map(_) => "map",
            Self::Unmap(_) => "unmap",
            Self::Quit => "q",
            Self::NewTab(_) => "addtab",
            Self::RemoveTab => "rmtab",
            Self::AddView(_) => "addview",
            Self::SplitView(split) => split.orientation.command_name(),
        }
    }
}

impl ThemeCommand {
    /// Switches in canonical order paired with their values.
    #[must_use]
    pub fn options(&self) -> [(&'static str, Option<&Token>); 4] {
        [
            ("--name", self.name.as_ref()),
            ("--component", self.component.as_ref()),
            ("--bgcolor", self.bgcolor.as_ref()),
            ("--fgcolor", self.fgcolor.as_ref()),
        ]
    }
}
