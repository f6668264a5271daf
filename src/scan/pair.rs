use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::statistics::{self, RunStatistics};
use crate::timing::{self, CESIUM_CYCLE_NS};
use crate::waveform::{PhaseOffset, SampleWindow, Species, Waveform, WaveformEngine, WaveformError};

use super::table::SampleTable;
use super::NORMALIZED_ADJACENCY_BREAK;

/// Two masses of interest, in the order they were given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassPair {
    /// First mass, amu
    pub first: f64,
    /// Second mass, amu
    pub second: f64,
}

impl MassPair {
    /// Pair two masses.
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    /// The heavier mass. Its cycle count sets the total ON duration.
    pub fn heavy(&self) -> f64 {
        if self.first > self.second {
            self.first
        } else {
            self.second
        }
    }

    /// The lighter mass.
    pub fn light(&self) -> f64 {
        if self.first > self.second {
            self.second
        } else {
            self.first
        }
    }
}

impl fmt::Display for MassPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

/// The three waves of a pair scan.
#[derive(Debug, Clone)]
pub struct PairWaves {
    /// Heavy mass gated for `N` cycles
    pub heavy: Waveform,
    /// Light mass gated for the heavy mass' ON duration
    pub light: Waveform,
    /// `heavy AND light`
    pub combined: Waveform,
}

/// Dual-species gate of one mass pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScan {
    /// Masses of interest
    pub pair: MassPair,
    /// MRS cycles of the heavy mass
    pub cycles: f64,
    /// Duty proportion (fraction OFF)
    pub proportion: f64,
    /// Sampling window shared by all waves
    pub window: SampleWindow,
    /// Reference cycle duration, ns
    pub calibration: f64,
}

impl PairScan {
    /// Scan with the default cesium calibration.
    pub fn new(pair: MassPair, cycles: f64, proportion: f64, window: SampleWindow) -> Self {
        Self {
            pair,
            cycles,
            proportion,
            window,
            calibration: CESIUM_CYCLE_NS,
        }
    }

    /// Scan over the suggested window of the heavy mass, sampled at 1 ns.
    pub fn suggested(pair: MassPair, cycles: f64, proportion: f64, calibration: f64) -> Self {
        let length = timing::suggested_time_scale(pair.heavy(), cycles, proportion, calibration);
        Self {
            pair,
            cycles,
            proportion,
            window: SampleWindow::unit(length),
            calibration,
        }
    }

    /// Override the reference cycle duration.
    pub fn with_calibration(mut self, calibration: f64) -> Self {
        self.calibration = calibration;
        self
    }

    pub(crate) fn species(&self, mass: f64) -> Species {
        Species::new(mass, self.proportion).with_calibration(self.calibration)
    }

    /// ON duration shared by both waves, ns
    pub fn total_on_time(&self) -> f64 {
        timing::scaled_cycle(self.pair.heavy(), self.calibration) * self.cycles
    }

    /// Denominator of the normalized on-time, from the heavy mass
    pub fn expected_on_time(&self) -> i64 {
        timing::expected_on_time(self.pair.heavy(), self.cycles, self.proportion, self.calibration)
    }

    /// Generate the heavy, light and combined waves.
    pub fn waveforms(&self) -> Result<PairWaves, WaveformError> {
        let heavy = WaveformEngine::with_cycles(
            self.species(self.pair.heavy()),
            self.cycles,
            self.window,
            PhaseOffset::None,
        )?
        .generate()?;
        let light = WaveformEngine::with_on_time(
            self.species(self.pair.light()),
            self.total_on_time(),
            self.window,
            PhaseOffset::None,
        )?
        .generate()?;
        let combined = heavy.and(&light)?;

        debug!(
            "Pair {}: {} combined samples, {} Hi",
            self.pair,
            combined.len(),
            combined.hi_count()
        );

        Ok(PairWaves {
            heavy,
            light,
            combined,
        })
    }

    /// Run-length statistics of the combined wave.
    pub fn statistics(&self, adjacency_break: u32) -> Result<RunStatistics, WaveformError> {
        let waves = self.waveforms()?;
        Ok(RunStatistics::compute(
            waves.combined.values(),
            adjacency_break,
            self.expected_on_time(),
        ))
    }

    /// Closed run lengths of the combined wave.
    pub fn run_lengths(&self) -> Result<Vec<usize>, WaveformError> {
        let waves = self.waveforms()?;
        Ok(statistics::run_lengths(waves.combined.values()))
    }

    /// Intervals between short runs of the combined wave, ns.
    pub fn peak_intervals(&self, adjacency_break: u32) -> Result<Vec<f64>, WaveformError> {
        let waves = self.waveforms()?;
        Ok(statistics::peak_intervals(
            waves.combined.values(),
            waves.combined.timings(),
            adjacency_break,
        ))
    }

    /// Heavy-wave samples from the end of the combined wave's first run to the
    /// start of its open trailing run.
    ///
    /// Drops the Lo lead-in and the extended tail. Empty when the combined wave
    /// has fewer than two closed runs.
    pub fn values_of_interest(&self) -> Result<Vec<u8>, WaveformError> {
        let waves = self.waveforms()?;
        let lengths = statistics::run_lengths(waves.combined.values());
        let start = lengths.first().copied().unwrap_or(0);
        let end = lengths.iter().sum::<usize>();
        Ok(waves.heavy.values()[start..end].to_vec())
    }

    /// Heavy, light and combined waves side by side: `Ti HM LM CM`.
    pub fn sample_table(&self) -> Result<SampleTable, WaveformError> {
        let waves = self.waveforms()?;
        Ok(SampleTable::from_waves(
            "Ti",
            &[
                ("HM", &waves.heavy),
                ("LM", &waves.light),
                ("CM", &waves.combined),
            ],
        ))
    }
}

/// Normalized on-time of a mass pair over its suggested window.
pub fn normalized_on_time(
    first: f64,
    second: f64,
    cycles: f64,
    proportion: f64,
    calibration: f64,
) -> Result<i64, WaveformError> {
    let scan = PairScan::suggested(MassPair::new(first, second), cycles, proportion, calibration);
    Ok(scan.statistics(NORMALIZED_ADJACENCY_BREAK)?.normalized_on_time)
}
