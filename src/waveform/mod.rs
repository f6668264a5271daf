//! # Gate Waveform Module
//!
//! Synthesis and combination of the digital MRS gate waveforms.
//!
//! A [`Waveform`] is a fully materialized sequence of 0/1 samples on a uniform
//! time grid. [`WaveformEngine`] produces one for a single species from its
//! physical parameters; [`combine`] merges two waveforms into a new one.
//!
//! ```rust
//! use mrsgate::waveform::{PhaseOffset, SampleWindow, Species, WaveformEngine};
//!
//! let rb = Species::new(85.0, 0.4);
//! let window = SampleWindow::new(1_000_000, 100_000);
//! let wave = WaveformEngine::with_cycles(rb, 30.0, window, PhaseOffset::None)?
//!     .generate()?;
//!
//! assert_eq!(wave.resolution(), 10.0);
//! assert_eq!(wave.len(), 100_000);
//! # Ok::<(), mrsgate::waveform::WaveformError>(())
//! ```

pub mod combine;
mod engine;
mod error;
mod types;


pub use engine::{Gate, PhaseOffset, SampleWindow, Species, SquareWaveCursor, WaveformEngine};
pub use error::WaveformError;
pub use types::Waveform;
