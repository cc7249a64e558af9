//! Command grammar tests.

mod common;

use common::{SOURCE, parse_error, parse_one, texts};
use tuiconf::{
    Command, ConfigParser, Error, Orientation, ParseErrorKind, Span, TokenKind, parse_str,
};

// -----------------------------------------------------------
// One test per command.
// -----------------------------------------------------------

#[test]
fn parse_set() {
    let Command::Set(set) = parse_one("set foo bar") else {
        panic!("expected set");
    };
    assert_eq!(set.variable.text, "foo");
    assert_eq!(set.value.text, "bar");
    assert_eq!(set.value.span, Span::new(1, 9));
}

#[test]
fn parse_theme_in_any_order() {
    let Command::Theme(theme) = parse_one("theme --bgcolor 1 --name X --fgcolor 2 --component Y")
    else {
        panic!("expected theme");
    };
    assert_eq!(theme.name.map(|t| t.text).as_deref(), Some("X"));
    assert_eq!(theme.component.map(|t| t.text).as_deref(), Some("Y"));
    assert_eq!(theme.bgcolor.map(|t| t.text).as_deref(), Some("1"));
    assert_eq!(theme.fgcolor.map(|t| t.text).as_deref(), Some("2"));
}

#[test]
fn parse_theme_duplicate_switch_last_write_wins() {
    let Command::Theme(theme) = parse_one("theme --name A --name B --component C --bgcolor 1")
    else {
        panic!("expected theme");
    };
    assert_eq!(theme.name.map(|t| t.text).as_deref(), Some("B"));
    assert_eq!(theme.component.map(|t| t.text).as_deref(), Some("C"));
    assert!(theme.fgcolor.is_none());
}

#[test]
fn parse_map() {
    let Command::Map(map) = parse_one("map CommitView <Up> k") else {
        panic!("expected map");
    };
    assert_eq!(
        [map.view.text, map.from.text, map.to.text],
        ["CommitView", "<Up>", "k"]
    );
}

#[test]
fn parse_unmap() {
    let Command::Unmap(unmap) = parse_one("unmap All <C-w>") else {
        panic!("expected unmap");
    };
    assert_eq!(unmap.view.text, "All");
    assert_eq!(unmap.from.text, "<C-w>");
}

#[test]
fn parse_quit() {
    assert_eq!(parse_one("q"), Command::Quit);
}

#[test]
fn parse_addtab() {
    let Command::NewTab(tab) = parse_one("addtab \"My Tab\"") else {
        panic!("expected addtab");
    };
    assert_eq!(tab.tab_name.text, "My Tab");
}

#[test]
fn parse_rmtab() {
    assert_eq!(parse_one("rmtab"), Command::RemoveTab);
}

#[test]
fn parse_addview_with_args() {
    let Command::AddView(add) = parse_one("addview log --flag") else {
        panic!("expected addview");
    };
    assert_eq!(add.view.text, "log");
    assert_eq!(texts(&add.args), ["--flag"]);
    assert_eq!(add.args[0].kind, TokenKind::Option);
}

#[test]
fn parse_addview_without_args() {
    let Command::AddView(add) = parse_one("addview GitStatusView") else {
        panic!("expected addview");
    };
    assert!(add.args.is_empty());
}

#[test]
fn parse_split_orientations() {
    for (input, orientation) in [
        ("split tree", Orientation::Dynamic),
        ("hsplit tree", Orientation::Horizontal),
        ("vsplit tree", Orientation::Vertical),
    ] {
        let Command::SplitView(split) = parse_one(input) else {
            panic!("expected split view from {input:?}");
        };
        assert_eq!(split.orientation, orientation, "{input}");
        assert_eq!(split.view.text, "tree");
    }
}

#[test]
fn parse_split_keeps_args_in_order() {
    let Command::SplitView(split) = parse_one("vsplit RefView a b c") else {
        panic!("expected split view");
    };
    assert_eq!(texts(&split.args), ["a", "b", "c"]);
}

// -----------------------------------------------------------
// Grammar errors.
// -----------------------------------------------------------

#[test]
fn theme_unknown_switch() {
    let err = parse_error("theme --bogus X --name A --component C --bgcolor 1");
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidThemeOption("--bogus".to_string())
    );
    assert_eq!(
        err.to_string(),
        "test:1:7 Invalid option for theme command: \"--bogus\""
    );
}

#[test]
fn theme_too_few_pairs() {
    let err = parse_error("theme --name A --component C\n");
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedKind {
            expected: TokenKind::Option,
            found: TokenKind::Terminator,
            text: "\n".to_string(),
        }
    );
}

#[test]
fn addview_without_view_is_usage_error() {
    let err = parse_error("addview");
    assert_eq!(
        err.to_string(),
        "test:1:1 Invalid addview command. Usage: addview [VIEW] [ARGS...]"
    );
}

#[test]
fn split_without_view_is_usage_error() {
    let err = parse_error("hsplit ; q");
    assert_eq!(
        err.kind,
        ParseErrorKind::Usage {
            command: "hsplit".to_string()
        }
    );
}

#[test]
fn map_with_one_word() {
    let err = parse_error("map onlyoneword\n");
    assert_eq!(
        err.to_string(),
        "test:1:16 Expected Word but got Terminator: \"\n\""
    );
}

#[test]
fn option_in_word_position() {
    let err = parse_error("set --foo bar");
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedKind {
            expected: TokenKind::Word,
            found: TokenKind::Option,
            text: "--foo".to_string(),
        }
    );
}

#[test]
fn extra_argument_to_fixed_command() {
    let err = parse_error("q now");
    assert_eq!(err.to_string(), "test:1:3 Expected Terminator but got Word: \"now\"");
}

#[test]
fn command_names_are_case_sensitive() {
    let err = parse_error("Set a b");
    assert_eq!(err.kind, ParseErrorKind::InvalidCommand("Set".to_string()));
}

#[test]
fn leading_option_is_rejected() {
    let err = parse_error("--name x");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedOption("--name".to_string())
    );
}

// -----------------------------------------------------------
// End of input.
// -----------------------------------------------------------

#[test]
fn empty_input() {
    let mut parser = ConfigParser::from_reader("".as_bytes(), SOURCE);
    assert!(matches!(parser.parse_next(), Ok(None)));
}

#[test]
fn only_comments_and_blank_lines() {
    let mut parser = ConfigParser::from_reader("# nothing\n\n   \n;\n".as_bytes(), SOURCE);
    assert!(matches!(parser.parse_next(), Ok(None)));
}

#[test]
fn unexpected_eof_mid_command() {
    let mut parser = ConfigParser::from_reader("set foo".as_bytes(), SOURCE);
    let err = parser.parse_next().unwrap_err();
    assert!(err.is_eof());
    assert!(matches!(
        &err,
        Error::Parse(e) if e.kind == ParseErrorKind::UnexpectedEof
    ));
    assert_eq!(err.to_string(), "test:1:8 Unexpected EOF");
}

#[test]
fn command_without_trailing_newline() {
    let mut parser = ConfigParser::from_reader("set a b".as_bytes(), SOURCE);
    assert!(matches!(parser.parse_next(), Ok(Some(Command::Set(_)))));
    assert!(matches!(parser.parse_next(), Ok(None)));
}

#[test]
fn variadic_command_at_end_of_input() {
    let mut parser = ConfigParser::from_reader("addview log".as_bytes(), SOURCE);
    assert!(matches!(parser.parse_next(), Ok(Some(Command::AddView(_)))));
    assert!(matches!(parser.parse_next(), Ok(None)));
}

// -----------------------------------------------------------
// Whole-source helpers.
// -----------------------------------------------------------

#[test]
fn semicolons_separate_commands_on_one_line() {
    let (commands, errors) = parse_str("addtab Logs; addview LogView; q", SOURCE);
    assert!(errors.is_empty());
    let names: Vec<_> = commands.iter().map(Command::name).collect();
    assert_eq!(names, ["addtab", "addview", "q"]);
}

#[test]
fn comments_between_arguments_are_ignored() {
    let Command::Set(set) = parse_one("set a b # trailing comment") else {
        panic!("expected set");
    };
    assert_eq!(set.value.text, "b");
}

#[test]
fn source_label_is_exposed() {
    let parser = ConfigParser::from_reader("".as_bytes(), "~/.config/app/rc");
    assert_eq!(parser.source(), "~/.config/app/rc");
}
