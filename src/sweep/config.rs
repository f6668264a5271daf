use serde::{Deserialize, Serialize};

use crate::records::RecordFormat;
use crate::timing::{CESIUM_CYCLE_NS, MAX_MRS_CYCLES};

use super::error::SweepError;

/// Parameters of a mass-pair sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Lightest mass scanned, amu
    pub lower_bound: u32,
    /// Heaviest mass scanned, amu
    pub upper_bound: u32,
    /// Largest mass difference within a pair, amu
    pub window: u32,
    /// MRS cycles of the heavy mass
    pub cycles: f64,
    /// Duty proportion (fraction OFF)
    pub proportion: f64,
    /// Runs shorter than this count as peaks
    pub adjacency_break: u32,
    /// Write only the normalized on-time of each pair
    pub normalized_only: bool,
    /// Reference cycle duration, ns
    pub calibration: f64,
    /// Worker threads (defaults to available parallelism)
    pub workers: usize,
    /// Rows buffered between the workers and the writer
    pub channel_capacity: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lower_bound: 60,
            upper_bound: 80,
            window: 20,
            cycles: 30.0,
            proportion: 0.4,
            adjacency_break: 10,
            normalized_only: false,
            calibration: CESIUM_CYCLE_NS,
            workers: std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4),
            channel_capacity: 256,
        }
    }
}

impl SweepConfig {
    /// Row layout written by the sweep.
    pub fn format(&self) -> RecordFormat {
        if self.normalized_only {
            RecordFormat::Normalized
        } else {
            RecordFormat::Statistics
        }
    }

    /// Check the parameters before any work is scheduled.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.lower_bound == 0 {
            return Err(SweepError::InvalidConfig(
                "lower_bound must be positive".to_string(),
            ));
        }
        if self.upper_bound < self.lower_bound {
            return Err(SweepError::InvalidConfig(format!(
                "upper_bound {} is below lower_bound {}",
                self.upper_bound, self.lower_bound
            )));
        }
        if self.adjacency_break == 0 {
            return Err(SweepError::InvalidConfig(
                "adjacency_break must be positive".to_string(),
            ));
        }
        if !(self.cycles > 0.0 && self.cycles <= MAX_MRS_CYCLES) {
            return Err(SweepError::InvalidConfig(format!(
                "cycles must lie in (0, {}], got {}",
                MAX_MRS_CYCLES, self.cycles
            )));
        }
        if !(0.0..=1.0).contains(&self.proportion) {
            return Err(SweepError::InvalidConfig(format!(
                "proportion must lie in [0, 1], got {}",
                self.proportion
            )));
        }
        if !(self.calibration.is_finite() && self.calibration > 0.0) {
            return Err(SweepError::InvalidConfig(format!(
                "calibration must be positive, got {}",
                self.calibration
            )));
        }
        if self.workers == 0 || self.channel_capacity == 0 {
            return Err(SweepError::InvalidConfig(
                "workers and channel_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
