use std::marker::PhantomData;

use super::scanner::Run;

/// How a run's length is adjusted before comparing it to the adjacency break.
pub trait BoundaryConvention {
    /// Short label used in logs
    const NAME: &'static str;

    /// Adjusted length of a closed run.
    fn adjusted_length(run: &Run) -> i64;
}

/// Raw run length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

/// Hi runs absorb the transition samples on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inclusive;

/// Lo runs lose the transition samples on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Indeterminate;

impl BoundaryConvention for Plain {
    const NAME: &'static str = "plain";

    fn adjusted_length(run: &Run) -> i64 {
        run.length as i64
    }
}

impl BoundaryConvention for Inclusive {
    const NAME: &'static str = "inclusive";

    fn adjusted_length(run: &Run) -> i64 {
        let length = run.length as i64;
        match (run.is_hi(), run.leading) {
            (true, true) => length + 1,
            (true, false) => length + 2,
            (false, _) => length,
        }
    }
}

impl BoundaryConvention for Indeterminate {
    const NAME: &'static str = "indeterminate";

    fn adjusted_length(run: &Run) -> i64 {
        let length = run.length as i64;
        match (run.is_hi(), run.leading) {
            (true, _) => length,
            (false, true) => length - 1,
            (false, false) => length - 2,
        }
    }
}

/// Counts closed runs whose adjusted length is strictly below a threshold.
#[derive(Debug, Clone)]
pub struct PeakCounter<C> {
    threshold: i64,
    count: i64,
    _convention: PhantomData<C>,
}

impl<C: BoundaryConvention> PeakCounter<C> {
    /// Counter for the given adjacency break.
    pub fn new(adjacency_break: u32) -> Self {
        Self {
            threshold: i64::from(adjacency_break),
            count: 0,
            _convention: PhantomData,
        }
    }

    /// Feed one closed run.
    pub fn observe(&mut self, run: &Run) {
        if C::adjusted_length(run) < self.threshold {
            self.count += 1;
        }
    }

    /// Final count. A trailing edge adds one peak under every convention.
    pub fn finish(self, trailing_edge: bool) -> i64 {
        self.count + i64::from(trailing_edge)
    }
}
