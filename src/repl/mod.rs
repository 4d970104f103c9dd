//! Line-oriented command loop over a [`DualIndexStore`].
//!
//! The store is owned by the caller and lent to each command; the loop keeps
//! no state of its own beyond its [`ReplConfig`].

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::{config::ReplConfig, core::store::DualIndexStore};

/// Command parsing.
pub mod command;
/// Text rendering of outcomes.
pub mod render;

use command::{Command, ParseError};
use render::MutationKind;

/// Terminal I/O failure. Command-level failures are rendered, never returned.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading input or writing output failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop the session.
    Exit,
}

/// Runs one command against `store` and renders the outcome.
pub fn execute(
    store: &mut DualIndexStore,
    command: Command,
    out: &mut impl Write,
    config: &ReplConfig,
) -> io::Result<Flow> {
    let unit = config.time_unit;
    match command {
        Command::Create { key, record } => {
            let outcome = store.create(&key, record);
            render::mutation(out, MutationKind::Create, &key, &outcome, unit)?;
        }
        Command::Read { key } => {
            let outcome = store.find_with_fallback(&key);
            let neighbors = (config.show_neighbors && outcome.ordered.value.is_none() && !store.is_empty())
                .then(|| store.neighbors(&key).value);
            render::find(out, &key, &outcome, neighbors.as_ref(), unit)?;
        }
        Command::Update { key, record } => {
            let outcome = store.update(&key, record);
            render::mutation(out, MutationKind::Update, &key, &outcome, unit)?;
        }
        Command::Delete { key } => {
            let outcome = store.delete(&key);
            render::mutation(out, MutationKind::Delete, &key, &outcome, unit)?;
        }
        Command::Prefix { prefix } => {
            let outcome = store.prefix_lookup(&prefix);
            render::prefix(out, &prefix, &outcome, unit)?;
        }
        Command::Help => render::help(out)?,
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Reads commands from `input` until `exit` or end of input.
pub fn run(
    store: &mut DualIndexStore,
    input: impl BufRead,
    out: &mut impl Write,
    config: &ReplConfig,
) -> Result<(), ReplError> {
    writeln!(out, "\nType commands: find/create/read/update/delete/prefix/help/exit")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match command::parse(&line) {
            Ok(cmd) => {
                debug!(?cmd, "dispatch");
                if execute(store, cmd, out, config)? == Flow::Exit {
                    break;
                }
            }
            Err(ParseError::Empty) => {}
            Err(ParseError::MissingArgs { usage, .. }) => writeln!(out, "Usage: {usage}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

