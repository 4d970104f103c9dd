//! Runtime knobs for the REPL and the trial benchmark.

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit used when rendering a single timing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum TimeUnit {
    /// Nanoseconds.
    #[value(name = "ns")]
    Nanos,
    /// Microseconds, truncated.
    #[default]
    #[value(name = "us")]
    Micros,
}

impl TimeUnit {
    /// Unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "µs",
        }
    }

    /// Whole units in `elapsed`.
    pub fn count(self, elapsed: Duration) -> u128 {
        match self {
            Self::Nanos => elapsed.as_nanos(),
            Self::Micros => elapsed.as_micros(),
        }
    }

    /// `elapsed` as `"<count><suffix>"`.
    pub fn format(self, elapsed: Duration) -> String {
        format!("{}{}", self.count(elapsed), self.suffix())
    }
}

/// Interactive session settings.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Unit used for every elapsed time printed by the REPL.
    pub time_unit: TimeUnit,
    /// Text written before each command is read.
    pub prompt: String,
    /// Print lower/upper bounds next to the nearest fallback on an ordered miss.
    pub show_neighbors: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Micros,
            prompt: "> ".to_string(),
            show_neighbors: true,
        }
    }
}

/// Repeated-trial benchmark settings.
#[derive(Debug, Clone)]
pub struct TrialConfig {
    /// Passes averaged for create and find. Zero is treated as one.
    pub runs: usize,
}

impl TrialConfig {
    /// `runs`, never below one.
    pub fn effective_runs(&self) -> usize {
        self.runs.max(1)
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self { runs: 100 }
    }
}
