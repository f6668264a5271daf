//! # Mass Pair Scans
//!
//! Entry points that build the gate waves for a mass pair, combine them and score
//! the result.
//!
//! A [`PairScan`] gates the heavier mass for `N` MRS cycles and the lighter mass
//! for the same total ON duration, then ANDs the two. An [`IoiScan`] additionally
//! removes an ion of interest from the combined gate and can start the window a
//! number of heavy cycles into the sequence.
//!
//! ```rust
//! use mrsgate::scan::{MassPair, PairScan};
//! use mrsgate::timing::CESIUM_CYCLE_NS;
//!
//! let scan = PairScan::suggested(MassPair::new(85.0, 85.0), 30.0, 0.4, CESIUM_CYCLE_NS);
//! let waves = scan.waveforms()?;
//! assert_eq!(waves.combined, waves.heavy);
//! # Ok::<(), mrsgate::waveform::WaveformError>(())
//! ```

mod ioi;
mod pair;
mod table;

#[cfg(test)]
mod tests;

pub use ioi::{IoiScan, IoiWaves};
pub use pair::{normalized_on_time, MassPair, PairScan, PairWaves};
pub use table::SampleTable;

/// Adjacency break used when only the normalized on-time is wanted
pub const NORMALIZED_ADJACENCY_BREAK: u32 = 5;
