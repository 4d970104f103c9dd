//! CSV ingestion into an ordered sequence of `(key, record)` pairs.
//!
//! Lines look like `key,species,mutation`. The first two commas split the key
//! and species; the remainder of the line is the mutation with trailing
//! whitespace trimmed. A leading `key,...` line is a header. Lines with fewer
//! than three fields are dropped and counted, never surfaced as errors.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{record::Record, types::Key};

/// Hard failures while reading a source. Malformed lines are not errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading from an opened source failed part way.
    #[error("read failed at line {line}: {source}")]
    Read {
        /// One-based line being read when the failure happened.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Parsed source in input order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDataset {
    /// Parsed pairs.
    pub records: Vec<(Key, Record)>,
    /// Non-empty, non-header lines that were dropped as malformed.
    pub skipped: usize,
}

impl LoadedDataset {
    /// Number of parsed pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing parsed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads and parses the file at `path`.
pub fn load_path(path: impl AsRef<Path>) -> Result<LoadedDataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_reader(BufReader::new(file))?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        skipped = dataset.skipped,
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parses every line of `reader`. A line that is not valid UTF-8 is dropped
/// like any other malformed line; only a failing read is an error.
pub fn parse_reader(mut reader: impl BufRead) -> Result<LoadedDataset, LoadError> {
    let mut dataset = LoadedDataset::default();
    let mut seen_content = false;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        line_no += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                line: line_no,
                source,
            })?;
        if read == 0 {
            break;
        }

        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(line) => push_line(&mut dataset, line, line_no, &mut seen_content),
            Err(_) => {
                seen_content = true;
                dataset.skipped += 1;
                debug!(line = line_no, "dropping record line that is not valid UTF-8");
            }
        }
    }
    Ok(dataset)
}

/// Parses an in-memory source.
pub fn parse_str(input: &str) -> LoadedDataset {
    let mut dataset = LoadedDataset::default();
    let mut seen_content = false;
    for (idx, line) in input.lines().enumerate() {
        push_line(&mut dataset, line, idx + 1, &mut seen_content);
    }
    dataset
}

fn push_line(dataset: &mut LoadedDataset, line: &str, line_no: usize, seen_content: &mut bool) {
    if line.trim().is_empty() {
        return;
    }
    let first = !*seen_content;
    *seen_content = true;
    if first && line.starts_with("key,") {
        return;
    }

    match parse_line(line) {
        Some(pair) => dataset.records.push(pair),
        None => {
            dataset.skipped += 1;
            debug!(line = line_no, "dropping malformed record line");
        }
    }
}

/// Splits one `key,species,mutation` line. `None` when a field is missing.
pub fn parse_line(line: &str) -> Option<(Key, Record)> {
    let mut fields = line.splitn(3, ',');
    let key = fields.next()?;
    let species = fields.next()?;
    let mutation = fields.next()?;
    if mutation.is_empty() {
        return None;
    }
    let mutation = mutation.trim_end_matches([' ', '\t', '\r', '\n']);
    Some((key.to_string(), Record::new(species, mutation)))
}
