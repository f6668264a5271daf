//! TOML configuration file support.
//!
//! Sweep parameters and the instrument calibration can live in a config file
//! instead of CLI flags:
//!
//! ```toml
//! # mrsgate.toml
//! [instrument]
//! calibration_ns = 22682.5
//!
//! [sweep]
//! lower_bound = 60
//! upper_bound = 80
//! window = 20
//! cycles = 30.0
//! proportion = 0.4
//! adjacency_break = 10
//! normalized_only = false
//! workers = 8
//! ```
//!
//! Flags given on the command line win over file values, which win over the
//! built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mrsgate::sweep::SweepConfig;

/// Root configuration structure for mrsgate.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Instrument timing settings.
    #[serde(default)]
    pub instrument: InstrumentConfig,

    /// Sweep-specific settings.
    #[serde(default)]
    pub sweep: SweepSection,
}

/// Instrument timing settings.
#[derive(Debug, Default, Deserialize)]
pub struct InstrumentConfig {
    /// Duration of one Cs-133 MRS cycle, ns.
    pub calibration_ns: Option<f64>,
}

/// Configuration for the sweep command.
#[derive(Debug, Default, Deserialize)]
pub struct SweepSection {
    /// Lightest mass scanned.
    pub lower_bound: Option<u32>,

    /// Heaviest mass scanned.
    pub upper_bound: Option<u32>,

    /// Largest mass difference within a pair.
    pub window: Option<u32>,

    /// MRS cycles of the heavy mass.
    pub cycles: Option<f64>,

    /// Fraction of each duty cycle the gate is OFF.
    pub proportion: Option<f64>,

    /// Runs shorter than this count as peaks.
    pub adjacency_break: Option<u32>,

    /// Write only the normalized on-time.
    pub normalized_only: Option<bool>,

    /// Worker threads.
    pub workers: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// File values layered over the sweep defaults.
    pub fn sweep_config(&self) -> SweepConfig {
        let defaults = SweepConfig::default();
        let section = &self.sweep;
        SweepConfig {
            lower_bound: section.lower_bound.unwrap_or(defaults.lower_bound),
            upper_bound: section.upper_bound.unwrap_or(defaults.upper_bound),
            window: section.window.unwrap_or(defaults.window),
            cycles: section.cycles.unwrap_or(defaults.cycles),
            proportion: section.proportion.unwrap_or(defaults.proportion),
            adjacency_break: section.adjacency_break.unwrap_or(defaults.adjacency_break),
            normalized_only: section.normalized_only.unwrap_or(defaults.normalized_only),
            calibration: self.instrument.calibration_ns.unwrap_or(defaults.calibration),
            workers: section.workers.unwrap_or(defaults.workers),
            channel_capacity: defaults.channel_capacity,
        }
    }

    /// Calibration from the file, or `default`.
    pub fn calibration_or(&self, default: f64) -> f64 {
        self.instrument.calibration_ns.unwrap_or(default)
    }
}
