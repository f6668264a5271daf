use log::debug;
use serde::{Deserialize, Serialize};

use crate::statistics::{self, RunStatistics};
use crate::waveform::{PhaseOffset, Waveform, WaveformEngine, WaveformError};

use super::pair::PairScan;
use super::table::SampleTable;

/// Waves of an ion-of-interest scan.
#[derive(Debug, Clone)]
pub struct IoiWaves {
    /// `heavy AND light`
    pub combined: Waveform,
    /// Ion of interest gated for the heavy mass' ON duration
    pub ion_of_interest: Waveform,
    /// Combined gate with the ion of interest removed
    pub excluded: Waveform,
}

/// A pair scan that must also keep an ion of interest out of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IoiScan {
    /// The underlying mass pair scan
    pub scan: PairScan,
    /// Mass of the ion of interest, amu
    pub ion_of_interest: f64,
    /// Heavy-mass cycles into the sequence at which the window starts
    pub start_cycle: f64,
}

impl IoiScan {
    /// Scan from the start of the sequence.
    pub fn new(scan: PairScan, ion_of_interest: f64) -> Self {
        Self {
            scan,
            ion_of_interest,
            start_cycle: 0.0,
        }
    }

    /// Start the window `start_cycle` heavy cycles after the heavy startup delay.
    pub fn starting_at(mut self, start_cycle: f64) -> Self {
        self.start_cycle = start_cycle;
        self
    }

    /// Offset for the waves gated on the heavy mass' ON duration. They share the
    /// heavy wave's first sample.
    fn follower_offset(&self) -> PhaseOffset {
        if self.start_cycle == 0.0 {
            return PhaseOffset::None;
        }
        let heavy = self.scan.species(self.scan.pair.heavy()).timing();
        PhaseOffset::Time(self.start_cycle * heavy.cycle + heavy.delay)
    }

    /// Generate the combined, ion-of-interest and excluded waves.
    pub fn waveforms(&self) -> Result<IoiWaves, WaveformError> {
        let scan = &self.scan;
        let on_time = scan.total_on_time();
        let follower = self.follower_offset();

        let heavy = WaveformEngine::with_cycles(
            scan.species(scan.pair.heavy()),
            scan.cycles,
            scan.window,
            PhaseOffset::Cycles(self.start_cycle),
        )?
        .generate()?;
        let light = WaveformEngine::with_on_time(
            scan.species(scan.pair.light()),
            on_time,
            scan.window,
            follower,
        )?
        .generate()?;
        let ion_of_interest = WaveformEngine::with_on_time(
            scan.species(self.ion_of_interest),
            on_time,
            scan.window,
            follower,
        )?
        .generate()?;

        let combined = heavy.and(&light)?;
        let excluded = combined.exclude(&ion_of_interest)?;

        debug!(
            "Pair {} without {}: {} of {} combined Hi samples remain",
            scan.pair,
            self.ion_of_interest,
            excluded.hi_count(),
            combined.hi_count()
        );

        Ok(IoiWaves {
            combined,
            ion_of_interest,
            excluded,
        })
    }

    /// Run-length statistics of the excluded wave, normalized against the heavy mass.
    pub fn statistics(&self, adjacency_break: u32) -> Result<RunStatistics, WaveformError> {
        let waves = self.waveforms()?;
        Ok(RunStatistics::compute(
            waves.excluded.values(),
            adjacency_break,
            self.scan.expected_on_time(),
        ))
    }

    /// Hi samples left once the ion of interest is removed.
    pub fn on_time(&self) -> Result<usize, WaveformError> {
        Ok(self.waveforms()?.excluded.hi_count())
    }

    /// Closed run lengths of the excluded wave.
    pub fn run_lengths(&self) -> Result<Vec<usize>, WaveformError> {
        let waves = self.waveforms()?;
        Ok(statistics::run_lengths(waves.excluded.values()))
    }

    /// Combined, ion-of-interest and excluded waves side by side: `Ti CM IO XR`.
    pub fn sample_table(&self) -> Result<SampleTable, WaveformError> {
        let waves = self.waveforms()?;
        Ok(SampleTable::from_waves(
            "Ti",
            &[
                ("CM", &waves.combined),
                ("IO", &waves.ion_of_interest),
                ("XR", &waves.excluded),
            ],
        ))
    }
}
