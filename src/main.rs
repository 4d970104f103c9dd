use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dualindex::{
    config::{ReplConfig, TimeUnit, TrialConfig},
    core::store::DualIndexStore,
    loader::{self, LoadedDataset},
    lookup, repl,
    repl::render,
    trials,
};

#[derive(Parser, Debug)]
#[command(name = "dualindex", version)]
#[command(about = "Compare a hash index and an ordered index over the same records")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Unit for single-operation timings
    #[arg(long, global = true, value_enum)]
    time_unit: Option<TimeUnit>,

    /// Emit the report as JSON (lookup and bench)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Interactive create/read/update/delete session
    Repl {
        /// CSV file with key,species,mutation lines
        csv: PathBuf,
    },
    /// Hash exact match against ordered prefix scan for one query
    Lookup {
        /// CSV file with key,species,mutation lines
        csv: PathBuf,
        /// Key or key prefix
        query: String,
    },
    /// Repeated-trial benchmark over the whole dataset
    Bench {
        /// CSV file with key,species,mutation lines
        csv: PathBuf,
        /// Passes averaged for create and find
        #[arg(long, default_value_t = 100)]
        runs: usize,
        /// Report a find-with-fallback for this key first
        #[arg(long)]
        find: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Cmd::Repl { csv } => {
            let dataset = load(&csv)?;
            let config = ReplConfig {
                time_unit: cli.time_unit.unwrap_or(TimeUnit::Micros),
                ..ReplConfig::default()
            };

            let mut store = DualIndexStore::new();
            let report = store.bulk_load(&dataset.records);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            render::bulk_load_table(&mut out, &report, config.time_unit)?;
            repl::run(&mut store, io::stdin().lock(), &mut out, &config)?;
        }
        Cmd::Lookup { csv, query } => {
            let dataset = load_non_empty(&csv)?;
            let report = lookup::run_lookup(&dataset.records, &query);

            let mut out = BufWriter::new(io::stdout().lock());
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                report.render(&mut out, cli.time_unit.unwrap_or(TimeUnit::Micros))?;
            }
            out.flush()?;
        }
        Cmd::Bench { csv, runs, find } => {
            let dataset = load_non_empty(&csv)?;
            let mut out = BufWriter::new(io::stdout().lock());

            if let Some(key) = find {
                let mut store = DualIndexStore::new();
                store.bulk_load(&dataset.records);
                let outcome = store.find_with_fallback(&key);
                let neighbors = outcome.ordered.value.is_none().then(|| store.neighbors(&key).value);
                if cli.json {
                    serde_json::to_writer_pretty(&mut out, &outcome)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "\n=== Find Result for key: '{key}' ===")?;
                    render::find(
                        &mut out,
                        &key,
                        &outcome,
                        neighbors.as_ref(),
                        cli.time_unit.unwrap_or(TimeUnit::Nanos),
                    )?;
                    writeln!(out)?;
                }
            }

            let report = trials::run_trials(&dataset.records, &TrialConfig { runs });
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                report.render(&mut out)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<LoadedDataset> {
    loader::load_path(path).with_context(|| format!("failed to load records from {}", path.display()))
}

fn load_non_empty(path: &Path) -> Result<LoadedDataset> {
    let dataset = load(path)?;
    if dataset.is_empty() {
        bail!("no records loaded from {}", path.display());
    }
    Ok(dataset)
}
