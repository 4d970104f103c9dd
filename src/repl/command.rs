use thiserror::Error;

use crate::{record::Record, types::Key};

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create <key> <species> <mutation>`
    Create {
        /// Key to insert.
        key: Key,
        /// Record stored under `key`.
        record: Record,
    },
    /// `read <key>` or `find <key>`
    Read {
        /// Key to look up.
        key: Key,
    },
    /// `update <key> <species> <mutation>`
    Update {
        /// Key whose record is replaced.
        key: Key,
        /// Replacement record.
        record: Record,
    },
    /// `delete <key>`
    Delete {
        /// Key to remove.
        key: Key,
    },
    /// `prefix <prefix>`
    Prefix {
        /// Leading characters every listed key must share.
        prefix: String,
    },
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
}

/// Input the dispatcher cannot act on. Rendered as a usage hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Blank line.
    #[error("empty input")]
    Empty,
    /// A known command without all of its arguments.
    #[error("usage: {usage}")]
    MissingArgs {
        /// Command word as typed.
        command: &'static str,
        /// Expected form of the command.
        usage: &'static str,
    },
    /// First token is not a command.
    #[error("unknown command: {0}")]
    Unknown(String),
}

pub(crate) const USAGE: &[&str] = &[
    "create <key> <species> <mutation>",
    "read <key>",
    "find <key>",
    "update <key> <species> <mutation>",
    "delete <key>",
    "prefix <prefix>",
    "help",
    "exit",
];

/// Parses one whitespace-separated command line. Extra trailing tokens are
/// ignored.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(cmd) = tokens.next() else {
        return Err(ParseError::Empty);
    };

    match cmd {
        "exit" | "quit" => Ok(Command::Exit),
        "help" => Ok(Command::Help),
        "read" | "find" => {
            let (command, usage) = if cmd == "read" {
                ("read", "read <key>")
            } else {
                ("find", "find <key>")
            };
            let key = next_arg(&mut tokens, command, usage)?;
            Ok(Command::Read { key })
        }
        "delete" => {
            let key = next_arg(&mut tokens, "delete", "delete <key>")?;
            Ok(Command::Delete { key })
        }
        "prefix" => {
            let prefix = next_arg(&mut tokens, "prefix", "prefix <prefix>")?;
            Ok(Command::Prefix { prefix })
        }
        "create" => {
            let (key, record) = key_and_record(&mut tokens, "create", "create <key> <species> <mutation>")?;
            Ok(Command::Create { key, record })
        }
        "update" => {
            let (key, record) =
                key_and_record(&mut tokens, "update", "update <key> <new_species> <new_mutation>")?;
            Ok(Command::Update { key, record })
        }
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn next_arg<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    usage: &'static str,
) -> Result<String, ParseError> {
    tokens
        .next()
        .map(str::to_string)
        .ok_or(ParseError::MissingArgs { command, usage })
}

fn key_and_record<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    usage: &'static str,
) -> Result<(Key, Record), ParseError> {
    let key = next_arg(tokens, command, usage)?;
    let species = next_arg(tokens, command, usage)?;
    let mutation = next_arg(tokens, command, usage)?;
    Ok((key, Record::new(species, mutation)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crud_commands() {
        assert_eq!(
            parse("create ACGT human BRCA1"),
            Ok(Command::Create {
                key: "ACGT".into(),
                record: Record::new("human", "BRCA1"),
            })
        );
        assert_eq!(parse("  find   ACGT "), Ok(Command::Read { key: "ACGT".into() }));
        assert_eq!(parse("read ACGT"), Ok(Command::Read { key: "ACGT".into() }));
        assert_eq!(parse("delete ACGT extra"), Ok(Command::Delete { key: "ACGT".into() }));
        assert_eq!(parse("prefix AC"), Ok(Command::Prefix { prefix: "AC".into() }));
        assert_eq!(parse("quit"), Ok(Command::Exit));
    }

    #[test]
    fn missing_arguments_report_usage() {
        let err = parse("update ACGT human").unwrap_err();
        assert_eq!(
            err.to_string(),
            "usage: update <key> <new_species> <new_mutation>"
        );
        assert!(matches!(parse("read"), Err(ParseError::MissingArgs { command: "read", .. })));
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("drop ACGT"), Err(ParseError::Unknown("drop".into())));
    }
}
