use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::SweepConfig;
use super::error::SweepError;

/// Statistics from a completed sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepStats {
    /// Pairs handed to the worker pool
    pub pairs_submitted: usize,
    /// Rows written to the sink, header excluded
    pub rows_written: usize,
    /// Pairs whose simulation failed
    pub pairs_skipped: usize,
    /// Wall-clock time of the sweep
    pub elapsed_seconds: f64,
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} of {} pairs ({} skipped) in {:.2}s",
            self.rows_written, self.pairs_submitted, self.pairs_skipped, self.elapsed_seconds
        )
    }
}

/// JSON sidecar describing how a sweep output was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepManifest {
    /// Crate version that ran the sweep
    pub version: String,
    /// When the sweep finished
    pub created: DateTime<Utc>,
    /// Sweep parameters
    pub config: SweepConfig,
    /// Sweep outcome
    pub stats: SweepStats,
}

impl SweepManifest {
    /// Describe a finished sweep.
    pub fn new(config: SweepConfig, stats: SweepStats) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created: Utc::now(),
            config,
            stats,
        }
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SweepError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
