use super::scanner::Run;

/// Shortest and second-shortest closed run, with the index of each run's last
/// sample.
///
/// A strictly shorter run takes the minimum and pushes the previous minimum into
/// second place, even when that displaces a shorter second. Separately, a run
/// longer than the minimum becomes the second when it is shorter than the current
/// second or no second exists yet. Equal lengths never replace anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extrema {
    min: Option<usize>,
    min_index: Option<usize>,
    second: Option<usize>,
    second_index: Option<usize>,
}

impl Extrema {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one closed run.
    pub fn observe(&mut self, run: &Run) {
        let length = run.length;
        let index = run.last_index;

        if self.min.map_or(true, |min| length < min) {
            if let Some(min) = self.min {
                self.second = Some(min);
                self.second_index = self.min_index;
            }
            self.min = Some(length);
            self.min_index = Some(index);
        }

        if let Some(min) = self.min {
            if length > min && self.second.map_or(true, |second| second > length) {
                self.second = Some(length);
                self.second_index = Some(index);
            }
        }
    }

    /// `(min, second)` lengths. Both are 0 unless both were observed.
    pub fn lengths(&self) -> (usize, usize) {
        match (self.min, self.second) {
            (Some(min), Some(second)) => (min, second),
            _ => (0, 0),
        }
    }

    /// Index of the minimum run's last sample, as observed.
    pub fn min_index(&self) -> Option<usize> {
        self.min_index
    }

    /// Index of the second-minimum run's last sample, as observed.
    pub fn second_index(&self) -> Option<usize> {
        self.second_index
    }
}
