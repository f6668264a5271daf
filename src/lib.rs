//! # mrsgate - Dual-Species MRS Gate Simulator
//!
//! `mrsgate` simulates the digital duty-cycle waveforms that time-gate ions by
//! mass in a multi-reflection (MRS) resonance-ejection instrument, and scores the
//! combined gate of two species by the statistics of its bit runs.
//!
//! ## Key Features
//!
//! - **Hardware-exact timing**: Every interval is quantized to the 5 ns trigger
//!   grid the same way the pulse generator does it.
//!
//! - **Incremental evaluation**: A square-wave cursor walks the duty cycle forward
//!   so generating a wave is linear in its sample count.
//!
//! - **Run statistics**: Peak counts under three boundary conventions, switch
//!   counts, on-time and the two shortest runs, all from a single pass.
//!
//! - **Parallel sweeps**: Whole ranges of mass pairs scored on a worker pool, with
//!   a single writer thread owning the output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mrsgate::scan::{MassPair, PairScan};
//! use mrsgate::timing::CESIUM_CYCLE_NS;
//!
//! // Rb-85 against K-39, 30 cycles, 40% OFF, over the suggested window
//! let scan = PairScan::suggested(MassPair::new(85.0, 39.0), 30.0, 0.4, CESIUM_CYCLE_NS);
//!
//! let stats = scan.statistics(10)?;
//! println!("{}", stats);
//! println!("{} peaks, normalized on-time {}%", stats.peaks, stats.normalized_on_time);
//! # Ok::<(), mrsgate::waveform::WaveformError>(())
//! ```
//!
//! ## Sweeping a Mass Range
//!
//! ```rust,no_run
//! use mrsgate::sweep::{Sweep, SweepConfig};
//!
//! let config = SweepConfig {
//!     lower_bound: 60,
//!     upper_bound: 80,
//!     window: 20,
//!     ..SweepConfig::default()
//! };
//!
//! let stats = Sweep::new(config)?.run_to_file("scores.txt")?;
//! println!("{}", stats);
//! # Ok::<(), mrsgate::sweep::SweepError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`timing`] | Mass scaling, grid quantization, derived intervals |
//! | [`waveform`] | Single-species waves and their combination |
//! | [`statistics`] | Run scanner and the ten-field statistics |
//! | [`scan`] | Mass-pair and ion-of-interest entry points |
//! | [`records`] | Text record formats |
//! | [`sweep`] | Parallel mass-pair sweep |
//! | [`report`] | Human-readable scan reports |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod records;
pub mod report;
pub mod scan;
pub mod statistics;
pub mod sweep;
pub mod timing;
pub mod waveform;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::records::{RecordFormat, RecordWriter};
    pub use crate::report::ScanReport;
    pub use crate::scan::{
        normalized_on_time, IoiScan, IoiWaves, MassPair, PairScan, PairWaves, SampleTable,
    };
    pub use crate::statistics::{peak_intervals, run_lengths, RunStatistics};
    pub use crate::sweep::{Sweep, SweepConfig, SweepError, SweepManifest, SweepStats};
    pub use crate::timing::{DutyTiming, CESIUM_CYCLE_NS};
    pub use crate::waveform::{
        PhaseOffset, SampleWindow, Species, Waveform, WaveformEngine, WaveformError,
    };
}
