//! CLI tool to validate and format configuration command files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::process::ExitCode;

use tracing::{Level, debug};
use tuiconf::{CommandKind, ConfigParser, format, parse_str};

const STDIN_LABEL: &str = "<stdin>";

fn usage() {
    eprintln!("Usage: tuiconf [-v|-vv] <command> [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  validate  Check if config file(s) parse cleanly");
    eprintln!("  fmt       Format config file(s) and print to stdout");
    eprintln!("  check     Check if config file(s) are formatted");
    eprintln!("  dump      Print the parsed commands");
    eprintln!();
    eprintln!("Use - to read standard input.");
    eprintln!();
    eprintln!("Config commands:");
    for kind in CommandKind::ALL {
        eprintln!("  {}", kind.usage());
    }
}

fn init_logging(verbosity: usize) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn open(path: &str) -> io::Result<(Box<dyn BufRead>, String)> {
    if path == "-" {
        return Ok((Box::new(io::stdin().lock()), STDIN_LABEL.to_string()));
    }
    let file = File::open(path)?;
    Ok((Box::new(BufReader::new(file)), path.to_string()))
}

fn read_to_string(path: &str) -> io::Result<(String, String)> {
    let (mut reader, label) = open(path)?;
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok((content, label))
}

/// Stream a file through the parser, reporting every error.
fn validate(path: &str) -> bool {
    let (reader, label) = match open(path) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("{path}: {e}");
            return false;
        }
    };

    let mut parser = ConfigParser::from_reader(reader, label);
    let mut commands = 0usize;
    let mut errors = 0usize;

    for result in parser.commands() {
        match result {
            Ok(command) => {
                debug!(command = command.name(), "validated command");
                commands += 1;
            }
            Err(e) => {
                eprintln!("{e}");
                errors += 1;
            }
        }
    }

    if errors == 0 {
        eprintln!("{}: valid ({commands} command(s))", parser.source());
        true
    } else {
        eprintln!("{}: {errors} error(s)", parser.source());
        false
    }
}

fn run(command: &str, path: &str) -> bool {
    if command == "validate" {
        return validate(path);
    }

    let (content, label) = match read_to_string(path) {
        Ok(read) => read,
        Err(e) => {
            eprintln!("{path}: {e}");
            return false;
        }
    };

    let (commands, errors) = parse_str(&content, &label);
    for e in &errors {
        eprintln!("{e}");
    }
    let mut ok = errors.is_empty();

    match command {
        "fmt" => print!("{}", format(&commands)),
        "check" if ok => {
            if format(&commands) == content {
                eprintln!("{label}: formatted");
            } else {
                eprintln!("{label}: not formatted");
                ok = false;
            }
        }
        "check" => {}
        _ => {
            for command in &commands {
                println!("{command:?}");
            }
        }
    }

    ok
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut verbosity = 0;
    while let Some(flag) = args.first() {
        match flag.as_str() {
            "-v" | "--verbose" => verbosity += 1,
            "-vv" => verbosity += 2,
            _ => break,
        }
        args.remove(0);
    }

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        usage();
        return ExitCode::from(2);
    }

    init_logging(verbosity);

    let command = args[0].as_str();
    let files = &args[1..];

    if !matches!(command, "validate" | "fmt" | "check" | "dump") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    debug!(command, files = files.len(), "starting");

    let mut had_error = false;
    for path in files {
        if !run(command, path) {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
