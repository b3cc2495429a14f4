//! Runtime options for a session.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AnnocatError;

/// When a constructed record is folded into the running statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatsPolicy {
    /// Observe every successfully parsed record, including ones whose key is
    /// already in the catalog. Reloading a key inflates the totals.
    #[default]
    EveryAttempt,
    /// Observe only records that were actually inserted.
    AcceptedOnly,
}

impl FromStr for StatsPolicy {
    type Err = AnnocatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every-attempt" | "every_attempt" | "all" => Ok(StatsPolicy::EveryAttempt),
            "accepted-only" | "accepted_only" | "accepted" => Ok(StatsPolicy::AcceptedOnly),
            other => Err(AnnocatError::Unsupported(format!(
                "stats policy '{other}' (supported: every-attempt, accepted-only)"
            ))),
        }
    }
}

impl fmt::Display for StatsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsPolicy::EveryAttempt => f.write_str("every-attempt"),
            StatsPolicy::AcceptedOnly => f.write_str("accepted-only"),
        }
    }
}

/// How the menu prints records, search results and statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnnocatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnnocatError::Unsupported(format!(
                "output format '{other}' (supported: text, json)"
            ))),
        }
    }
}

/// Options for a [`Session`](crate::session::Session).
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Directory that file names given to the loader are resolved against.
    pub root: PathBuf,
    pub stats_policy: StatsPolicy,
    pub output: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            stats_policy: StatsPolicy::default(),
            output: OutputFormat::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_stats_policy(mut self, policy: StatsPolicy) -> Self {
        self.stats_policy = policy;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}
