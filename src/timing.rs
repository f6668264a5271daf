//! Mass scaling and hardware time-grid quantization.
//!
//! Every interval of an MRS gate waveform is derived from one calibrated cycle
//! time of a reference species (cesium-133) scaled by the square root of the mass
//! ratio, and then snapped down onto the 5 ns grid of the trigger hardware.
//!
//! ```rust
//! use mrsgate::timing::{self, CESIUM_CYCLE_NS};
//!
//! let off = timing::off_time(85.0, 0.4, CESIUM_CYCLE_NS);
//! let on = timing::on_half(85.0, 0.4, CESIUM_CYCLE_NS);
//! assert_eq!(off % 5.0, 0.0);
//! assert_eq!(on % 5.0, 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// Atomic mass of the reference species (cesium-133), amu
pub const REFERENCE_MASS: f64 = 132.905;

/// Default calibration: one cesium-133 MRS cycle, ns
pub const CESIUM_CYCLE_NS: f64 = 22682.5;

/// Empirical trigger offset for the reference species, ns
pub const TRIGGER_OFFSET_NS: f64 = 32800.0;

/// Resolution of the gate timing hardware, ns
pub const TIME_GRID_NS: f64 = 5.0;

/// Largest number of MRS cycles the trigger sequencer accepts
pub const MAX_MRS_CYCLES: f64 = 850.0;

/// `sqrt(mass / REFERENCE_MASS)`
#[inline]
pub fn mass_ratio(mass: f64) -> f64 {
    (mass / REFERENCE_MASS).sqrt()
}

/// Duration of one MRS cycle for `mass`, ns.
#[inline]
pub fn scaled_cycle(mass: f64, calibration: f64) -> f64 {
    calibration * mass_ratio(mass)
}

/// Snap `x` down onto the 5 ns hardware grid.
#[inline]
pub fn quantize5(x: f64) -> f64 {
    TIME_GRID_NS * (x / TIME_GRID_NS).floor()
}

/// Quantized OFF interval of one duty cycle, ns.
pub fn off_time(mass: f64, proportion: f64, calibration: f64) -> f64 {
    quantize5(proportion * scaled_cycle(mass, calibration) / 2.0)
}

/// Quantized ON interval of one duty cycle, ns.
pub fn on_half(mass: f64, proportion: f64, calibration: f64) -> f64 {
    quantize5((1.0 - proportion) * scaled_cycle(mass, calibration) / 2.0)
}

/// Time of the first gate edge, ns.
///
/// The trigger offset scales with the mass ratio and is pulled in by half the
/// quantized OFF interval, truncated to whole nanoseconds.
pub fn startup_delay(mass: f64, proportion: f64, calibration: f64) -> f64 {
    let half_off = (off_time(mass, proportion, calibration) / 2.0).floor();
    quantize5(TRIGGER_OFFSET_NS * mass_ratio(mass) - half_off)
}

/// Analytic count of Hi samples a single species' gate produces over `cycles`
/// cycles at 1 ns resolution.
///
/// Used as the denominator of the normalized on-time.
pub fn expected_on_time(mass: f64, cycles: f64, proportion: f64, calibration: f64) -> i64 {
    ((on_half(mass, proportion, calibration) - 1.0) * (cycles * 2.0)) as i64
}

/// Sample window that covers the startup delay, the whole ON duration and one
/// spare cycle, ns.
pub fn suggested_time_scale(mass: f64, cycles: f64, proportion: f64, calibration: f64) -> u32 {
    let on_duration = scaled_cycle(mass, calibration) * cycles;
    let delay = startup_delay(mass, proportion, calibration);
    (on_duration + delay + on_duration / cycles) as u32
}

/// All derived intervals of one species' duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DutyTiming {
    /// Mass of interest, amu
    pub mass: f64,
    /// Fraction of each cycle the gate is OFF
    pub proportion: f64,
    /// Reference cycle duration, ns
    pub calibration: f64,
    /// Unquantized cycle duration for this mass, ns
    pub cycle: f64,
    /// Quantized OFF interval, ns
    pub off: f64,
    /// Quantized ON interval, ns
    pub on_half: f64,
    /// Time of the first gate edge, ns
    pub delay: f64,
}

impl DutyTiming {
    /// Derive all intervals for a species.
    pub fn new(mass: f64, proportion: f64, calibration: f64) -> Self {
        Self {
            mass,
            proportion,
            calibration,
            cycle: scaled_cycle(mass, calibration),
            off: off_time(mass, proportion, calibration),
            on_half: on_half(mass, proportion, calibration),
            delay: startup_delay(mass, proportion, calibration),
        }
    }

    /// Quantized length of one full duty cycle, ns.
    pub fn period(&self) -> f64 {
        self.off + self.on_half
    }
}
