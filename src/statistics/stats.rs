use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::conventions::{BoundaryConvention, Inclusive, Indeterminate, PeakCounter, Plain};
use super::extrema::Extrema;
use super::scanner::{trailing_edge, RunScanner};

/// Run-length statistics of one bit sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Closed runs shorter than the adjacency break
    pub peaks: i64,
    /// Number of value transitions
    pub switches: i64,
    /// Peaks counted with Lo runs shortened by their boundary samples
    pub indeterminate_peaks: i64,
    /// Peaks counted with Hi runs lengthened by their boundary samples
    pub inclusive_peaks: i64,
    /// Number of Hi samples
    pub on_time: i64,
    /// Shortest closed run, 0 if fewer than two distinct extrema were seen
    pub min_run: i64,
    /// Second-shortest closed run, 0 if fewer than two distinct extrema were seen
    pub second_min_run: i64,
    /// Last sample index of the shortest run
    pub min_index: Option<usize>,
    /// Last sample index of the second-shortest run
    pub second_min_index: Option<usize>,
    /// `on_time` as a truncated percentage of the expected on-time
    pub normalized_on_time: i64,
}

impl RunStatistics {
    /// Scan `bits` once and reduce it under every boundary convention.
    ///
    /// `expected_on_time` is the denominator of the normalized on-time; a value
    /// that is not positive yields 0. Sequences shorter than two samples have no
    /// transitions to score and return the default result.
    pub fn compute(bits: &[u8], adjacency_break: u32, expected_on_time: i64) -> Self {
        if bits.len() < 2 {
            return Self::default();
        }

        let mut plain = PeakCounter::<Plain>::new(adjacency_break);
        let mut inclusive = PeakCounter::<Inclusive>::new(adjacency_break);
        let mut indeterminate = PeakCounter::<Indeterminate>::new(adjacency_break);
        let mut extrema = Extrema::new();
        let mut closed_runs = 0i64;

        for run in RunScanner::new(bits) {
            plain.observe(&run);
            inclusive.observe(&run);
            indeterminate.observe(&run);
            extrema.observe(&run);
            closed_runs += 1;
        }

        let edge = trailing_edge(bits);
        let on_time = bits.iter().filter(|&&v| v == 1).count() as i64;
        let (min_run, second_min_run) = extrema.lengths();

        let stats = Self {
            peaks: plain.finish(edge),
            switches: closed_runs + i64::from(edge),
            indeterminate_peaks: indeterminate.finish(edge),
            inclusive_peaks: inclusive.finish(edge),
            on_time,
            min_run: min_run as i64,
            second_min_run: second_min_run as i64,
            min_index: extrema.min_index(),
            second_min_index: extrema.second_index(),
            normalized_on_time: normalize(on_time, expected_on_time),
        };

        debug!(
            "Scanned {} samples: {} runs, {} {} / {} {} / {} {} peaks",
            bits.len(),
            closed_runs,
            stats.peaks,
            Plain::NAME,
            stats.inclusive_peaks,
            Inclusive::NAME,
            stats.indeterminate_peaks,
            Indeterminate::NAME
        );

        stats
    }

    /// The ten fields in record-array order: peaks, switches, indeterminate peaks,
    /// inclusive peaks, on-time, min run, second-min run, min index, second-min
    /// index, normalized on-time. Unobserved indices are -1.
    pub fn as_array(&self) -> [i64; 10] {
        let index = |i: Option<usize>| i.map_or(-1, |i| i as i64);
        [
            self.peaks,
            self.switches,
            self.indeterminate_peaks,
            self.inclusive_peaks,
            self.on_time,
            self.min_run,
            self.second_min_run,
            index(self.min_index),
            index(self.second_min_index),
            self.normalized_on_time,
        ]
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} peaks ({} inclusive, {} indeterminate), {} switches, on-time {} ({}%), min run {}, second {}",
            self.peaks,
            self.inclusive_peaks,
            self.indeterminate_peaks,
            self.switches,
            self.on_time,
            self.normalized_on_time,
            self.min_run,
            self.second_min_run
        )
    }
}

fn normalize(on_time: i64, expected_on_time: i64) -> i64 {
    if expected_on_time <= 0 {
        return 0;
    }
    on_time * 100 / expected_on_time
}

/// Lengths of every closed run, in order. The open trailing run is excluded.
pub fn run_lengths(bits: &[u8]) -> Vec<usize> {
    RunScanner::new(bits).map(|run| run.length).collect()
}

/// Time between the starts of successive runs shorter than `adjacency_break`.
///
/// A short Lo run starts at its first sample and a short Hi run one sample before
/// its first. The result holds the differences between consecutive start times.
pub fn peak_intervals(bits: &[u8], timings: &[f64], adjacency_break: u32) -> Vec<f64> {
    let threshold = adjacency_break as usize;
    let starts: Vec<f64> = RunScanner::new(bits)
        .filter(|run| run.length < threshold)
        .filter_map(|run| {
            let index = if run.is_hi() {
                run.first_index().saturating_sub(1)
            } else {
                run.first_index()
            };
            timings.get(index).copied()
        })
        .collect();

    starts.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
