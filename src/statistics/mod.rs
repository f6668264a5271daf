//! # Run-Length Statistics
//!
//! Scores a gate bit sequence by its runs: maximal stretches of equal samples.
//!
//! ## Structure
//!
//! 1. **Scanner**: [`RunScanner`] walks the sequence once and emits a [`Run`] for
//!    every run closed by a transition. The open trailing run is never emitted;
//!    [`trailing_edge`] reports whether the last two samples differ.
//!
//! 2. **Reducers**: [`PeakCounter`] counts runs shorter than the adjacency break
//!    under one [`BoundaryConvention`], and [`Extrema`] tracks the shortest and
//!    second-shortest run.
//!
//! 3. **Result**: [`RunStatistics::compute`] drives every reducer over one scan and
//!    assembles the ten-field result.
//!
//! ## Boundary conventions
//!
//! A run's length can be counted with or without the samples that touch its
//! neighbours:
//!
//! | Convention          | Hi run                           | Lo run                           |
//! |---------------------|----------------------------------|----------------------------------|
//! | [`Plain`]           | `L`                              | `L`                              |
//! | [`Inclusive`]       | `L + 1`, `L + 2` after a Lo run  | `L`                              |
//! | [`Indeterminate`]   | `L`                              | `L - 1`, `L - 2` after a Hi run  |
//!
//! ```rust
//! use mrsgate::statistics::RunStatistics;
//!
//! let bits = [0, 0, 1, 1, 1, 0, 0, 0, 1];
//! let stats = RunStatistics::compute(&bits, 3, 4);
//! assert_eq!(stats.switches, 4);
//! assert_eq!(stats.on_time, 4);
//! assert_eq!(stats.normalized_on_time, 100);
//! ```

mod conventions;
mod extrema;
mod scanner;
mod stats;


pub use conventions::{BoundaryConvention, Inclusive, Indeterminate, PeakCounter, Plain};
pub use extrema::Extrema;
pub use scanner::{trailing_edge, Run, RunScanner};
pub use stats::{peak_intervals, run_lengths, RunStatistics};
