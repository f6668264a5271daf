use log::debug;
use serde::{Deserialize, Serialize};

use crate::timing::{DutyTiming, CESIUM_CYCLE_NS, MAX_MRS_CYCLES};

use super::error::WaveformError;
use super::types::Waveform;

/// Physical description of one gated species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Mass of interest, amu
    pub mass: f64,
    /// Fraction of each duty cycle the gate is OFF, `0.0..=1.0`
    pub proportion: f64,
    /// Duration of one reference (Cs-133) cycle, ns
    pub calibration: f64,
}

impl Species {
    /// A species timed against the default cesium calibration.
    pub fn new(mass: f64, proportion: f64) -> Self {
        Self {
            mass,
            proportion,
            calibration: CESIUM_CYCLE_NS,
        }
    }

    /// Override the reference cycle duration.
    pub fn with_calibration(mut self, calibration: f64) -> Self {
        self.calibration = calibration;
        self
    }

    /// Derived duty-cycle intervals for this species.
    pub fn timing(&self) -> DutyTiming {
        DutyTiming::new(self.mass, self.proportion, self.calibration)
    }

    fn validate(&self) -> Result<(), WaveformError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(WaveformError::InvalidParameter(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        if !(0.0..=1.0).contains(&self.proportion) {
            return Err(WaveformError::InvalidParameter(format!(
                "duty proportion must lie in [0, 1], got {}",
                self.proportion
            )));
        }
        if !(self.calibration.is_finite() && self.calibration > 0.0) {
            return Err(WaveformError::InvalidParameter(format!(
                "calibration must be positive, got {}",
                self.calibration
            )));
        }
        Ok(())
    }
}

/// Sampling window: `length_ns` of simulated time cut into `steps` intervals.
///
/// The resolution is `length_ns / steps` truncated to whole nanoseconds. Samples
/// are taken at every multiple of the resolution strictly below `length_ns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// Simulated time span, ns
    pub length_ns: u32,
    /// Number of steps across the span
    pub steps: u32,
}

impl SampleWindow {
    /// Create a window.
    pub fn new(length_ns: u32, steps: u32) -> Self {
        Self { length_ns, steps }
    }

    /// A window sampled at 1 ns.
    pub fn unit(length_ns: u32) -> Self {
        Self::new(length_ns, length_ns)
    }

    /// Time between samples, ns. Zero for a degenerate window.
    pub fn resolution(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        (self.length_ns / self.steps) as f64
    }

    /// Number of samples in the window.
    pub fn sample_count(&self) -> usize {
        if self.steps == 0 || self.length_ns < self.steps {
            return 0;
        }
        let length = u64::from(self.length_ns);
        let step = u64::from(self.length_ns / self.steps);
        ((length + step - 1) / step) as usize
    }

    fn validate(&self) -> Result<(), WaveformError> {
        if self.steps == 0 || self.length_ns == 0 {
            return Err(WaveformError::InvalidParameter(format!(
                "window length and steps must be positive, got {} ns / {} steps",
                self.length_ns, self.steps
            )));
        }
        if self.resolution() < 1.0 {
            return Err(WaveformError::InvalidParameter(format!(
                "{} steps over {} ns gives a resolution below 1 ns",
                self.steps, self.length_ns
            )));
        }
        if self.sample_count() < 2 {
            return Err(WaveformError::InvalidParameter(format!(
                "{} steps over {} ns yields fewer than 2 samples",
                self.steps, self.length_ns
            )));
        }
        Ok(())
    }
}

/// Where the sample window starts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PhaseOffset {
    /// Start sampling at t = 0
    #[default]
    None,
    /// Start a whole number of the species' own cycles after its startup delay.
    /// Zero cycles means no offset.
    Cycles(f64),
    /// Start at an absolute time, ns
    Time(f64),
}

impl PhaseOffset {
    /// Absolute start time of the window for a species, ns.
    pub fn start_time(&self, timing: &DutyTiming) -> f64 {
        match *self {
            PhaseOffset::None => 0.0,
            PhaseOffset::Cycles(cycles) if cycles == 0.0 => 0.0,
            PhaseOffset::Cycles(cycles) => timing.delay + cycles * timing.cycle,
            PhaseOffset::Time(time) => time,
        }
    }
}

/// Which closing edge of the gate applies to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The gate closes right after the nominal ON duration.
    Nominal,
    /// The gate stays open one extra ON interval so a Hi half-period that
    /// straddles the nominal end can complete.
    Extended,
}

/// Incremental evaluator of the square-wave formula.
///
/// The value at `t` is found by walking duty cycles forward from the startup
/// delay. The cursor keeps the start of the cycle reached by the previous query,
/// so a run of increasing queries costs amortized O(1) each. A query at or before
/// that cycle start restarts the walk from the delay.
#[derive(Debug, Clone)]
pub struct SquareWaveCursor {
    off: f64,
    on_half: f64,
    delay: f64,
    end: f64,
    edge: f64,
}

impl SquareWaveCursor {
    fn new(timing: &DutyTiming, on_duration: f64) -> Self {
        Self {
            off: timing.off,
            on_half: timing.on_half,
            delay: timing.delay,
            end: timing.delay + on_duration,
            edge: timing.delay,
        }
    }

    /// Gate value at `time`: true for Hi.
    pub fn value_at(&mut self, time: f64, gate: Gate) -> bool {
        let closed = match gate {
            Gate::Nominal => time > self.end,
            Gate::Extended => time >= self.end + self.on_half,
        };
        if time <= self.delay || closed {
            return false;
        }
        if time <= self.edge {
            self.edge = self.delay;
        }
        self.walk(time)
    }

    /// Start of the duty cycle holding the last evaluated time, ns.
    pub fn edge(&self) -> f64 {
        self.edge
    }

    fn walk(&mut self, time: f64) -> bool {
        let mut edge = self.edge;
        while edge < time {
            let off_end = edge + self.off;
            if off_end >= time {
                self.edge = edge;
                return false;
            }
            let on_end = off_end + self.on_half;
            if on_end > time {
                self.edge = edge;
                return true;
            }
            if on_end == time {
                self.edge = edge;
                return false;
            }
            edge = on_end;
        }
        self.edge = edge;
        false
    }
}

/// Generator of a single species' gate waveform.
#[derive(Debug, Clone)]
pub struct WaveformEngine {
    timing: DutyTiming,
    cycles: f64,
    window: SampleWindow,
    offset: PhaseOffset,
}

impl WaveformEngine {
    /// Gate a species for `cycles` MRS cycles.
    pub fn with_cycles(
        species: Species,
        cycles: f64,
        window: SampleWindow,
        offset: PhaseOffset,
    ) -> Result<Self, WaveformError> {
        if !(cycles.is_finite() && cycles > 0.0 && cycles <= MAX_MRS_CYCLES) {
            return Err(WaveformError::InvalidParameter(format!(
                "MRS cycles must lie in (0, {}], got {}",
                MAX_MRS_CYCLES, cycles
            )));
        }
        Self::build(species, cycles, window, offset)
    }

    /// Gate a species for a total ON duration of `on_time_ns`.
    ///
    /// The equivalent cycle count is `on_time_ns / scaled_cycle`, which lets a
    /// lighter species stay open exactly as long as a heavier one.
    pub fn with_on_time(
        species: Species,
        on_time_ns: f64,
        window: SampleWindow,
        offset: PhaseOffset,
    ) -> Result<Self, WaveformError> {
        if !(on_time_ns.is_finite() && on_time_ns > 0.0) {
            return Err(WaveformError::InvalidParameter(format!(
                "ON duration must be positive, got {}",
                on_time_ns
            )));
        }
        species.validate()?;
        let cycles = on_time_ns / species.timing().cycle;
        Self::build(species, cycles, window, offset)
    }

    fn build(
        species: Species,
        cycles: f64,
        window: SampleWindow,
        offset: PhaseOffset,
    ) -> Result<Self, WaveformError> {
        species.validate()?;
        window.validate()?;
        let timing = species.timing();
        if timing.period() <= 0.0 {
            return Err(WaveformError::InvalidParameter(format!(
                "mass {} quantizes to an empty duty cycle",
                species.mass
            )));
        }
        let start = offset.start_time(&timing);
        if !start.is_finite() {
            return Err(WaveformError::InvalidParameter(format!(
                "phase offset {:?} is not finite",
                offset
            )));
        }
        Ok(Self {
            timing,
            cycles,
            window,
            offset,
        })
    }

    /// Derived duty-cycle intervals
    pub fn timing(&self) -> &DutyTiming {
        &self.timing
    }

    /// MRS cycle count (fractional when back-solved from an ON duration)
    pub fn cycles(&self) -> f64 {
        self.cycles
    }

    /// Nominal ON duration, ns
    pub fn on_duration(&self) -> f64 {
        self.timing.cycle * self.cycles
    }

    /// Nominal end of the gate, ns
    pub fn gate_end(&self) -> f64 {
        self.timing.delay + self.on_duration()
    }

    /// Timestamp of the first sample, ns
    pub fn start_time(&self) -> f64 {
        self.offset.start_time(&self.timing)
    }

    /// A fresh cursor positioned at the startup delay.
    pub fn cursor(&self) -> SquareWaveCursor {
        SquareWaveCursor::new(&self.timing, self.on_duration())
    }

    /// True when the gate is still Hi at its nominal end, so the final ON
    /// interval must be allowed to complete.
    pub fn is_extended(&self) -> bool {
        self.cursor().value_at(self.gate_end(), Gate::Nominal)
    }

    /// Materialize the waveform over the sampling window.
    pub fn generate(&self) -> Result<Waveform, WaveformError> {
        let resolution = self.window.resolution();
        let count = self.window.sample_count();
        let start = self.start_time();
        let end = self.gate_end();
        let extension_end = end + self.timing.on_half;

        let mut extending = self.is_extended();
        let mut cursor = self.cursor();
        let mut values = Vec::with_capacity(count);
        let mut timings = Vec::with_capacity(count);

        for k in 0..count {
            let time = start + k as f64 * resolution;
            let hi = if !extending || time < end || time > extension_end {
                cursor.value_at(time, Gate::Nominal)
            } else {
                let hi = cursor.value_at(time, Gate::Extended);
                if time > end && !hi {
                    extending = false;
                }
                hi
            };
            values.push(u8::from(hi));
            timings.push(time);
        }

        debug!(
            "Generated wave for mass {}: {} samples at {} ns from {} ns, delay {} ns, gate end {} ns",
            self.timing.mass,
            count,
            resolution,
            start,
            self.timing.delay,
            end
        );

        Ok(Waveform::from_parts(values, timings))
    }
}
