//! # Mass-Pair Sweep
//!
//! Scores every mass pair in a trapezoid of the mass plane and writes one record
//! per pair.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐   bounded channel   ┌───────────────┐
//! │ mass_pairs  │────▶│ rayon pool   │ ──────PairRow─────▶ │ Writer thread │───▶ sink
//! │ (i, j)      │     │ (N workers)  │                     │ (sole owner)  │
//! └─────────────┘     └──────────────┘                     └───────────────┘
//! ```
//!
//! The pool returns once every pair has been scored, which drops all senders.
//! The writer then drains the channel, flushes the sink and is joined. Rows are
//! written in completion order.

mod config;
mod error;
mod pairs;
mod runner;
mod stats;

#[cfg(test)]
mod tests;

pub use config::SweepConfig;
pub use error::SweepError;
pub use pairs::mass_pairs;
pub use runner::Sweep;
pub use stats::{SweepManifest, SweepStats};
