use super::combine;
use super::error::WaveformError;

/// Relative tolerance for comparing timestamp spacings.
///
/// Timestamps are produced as `start + k * resolution`, which is exact for whole
/// nanosecond offsets but rounds in the last bits for fractional ones.
const SPACING_TOLERANCE: f64 = 1e-9;

/// A digital gate waveform: 0/1 samples on a uniform, strictly increasing time grid.
///
/// A value of 1 means Hi (blocking), 0 means Lo (passing). Timestamps are in
/// nanoseconds. The waveform is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    values: Vec<u8>,
    timings: Vec<f64>,
    resolution: f64,
}

impl Waveform {
    /// Build a waveform from explicit samples and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`WaveformError::RepresentationViolation`] if the sequences differ in
    /// length, hold fewer than two samples, contain a value other than 0 or 1, or if
    /// the timestamps are not strictly increasing with a constant step.
    pub fn new(values: Vec<u8>, timings: Vec<f64>) -> Result<Self, WaveformError> {
        if values.len() != timings.len() {
            return Err(WaveformError::RepresentationViolation(format!(
                "{} values but {} timings",
                values.len(),
                timings.len()
            )));
        }
        if values.len() < 2 {
            return Err(WaveformError::RepresentationViolation(format!(
                "a waveform needs at least 2 samples, got {}",
                values.len()
            )));
        }
        let resolution = timings[1] - timings[0];
        check_values(&values)?;
        check_timings(&timings, resolution)?;

        Ok(Self {
            values,
            timings,
            resolution,
        })
    }

    /// Build a waveform from digital values sampled every `resolution` ns from t = 0.
    pub fn from_digital(values: Vec<u8>, resolution: f64) -> Result<Self, WaveformError> {
        let timings = (0..values.len()).map(|i| resolution * i as f64).collect();
        Self::new(values, timings)
    }

    /// Assemble a waveform whose invariants the caller already guarantees.
    pub(crate) fn from_parts(values: Vec<u8>, timings: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), timings.len());
        debug_assert!(values.len() >= 2);
        let resolution = timings[1] - timings[0];
        Self {
            values,
            timings,
            resolution,
        }
    }

    /// Sample values, 0 or 1
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Sample timestamps, ns
    pub fn timings(&self) -> &[f64] {
        &self.timings
    }

    /// Time between consecutive samples, ns
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Timestamp of the first sample, ns
    pub fn start(&self) -> f64 {
        self.timings[0]
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a waveform holds at least two samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of Hi samples
    pub fn hi_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }

    /// Iterate over `(timestamp, value)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, u8)> + '_ {
        self.timings.iter().copied().zip(self.values.iter().copied())
    }

    /// Logical AND with another waveform of identical grid.
    pub fn and(&self, other: &Waveform) -> Result<Waveform, WaveformError> {
        combine::and(self, other)
    }

    /// Hi where `self` is Hi and `ion_of_interest` is Lo. See [`combine::exclude`].
    pub fn exclude(&self, ion_of_interest: &Waveform) -> Result<Waveform, WaveformError> {
        combine::exclude(self, ion_of_interest)
    }
}

fn check_values(values: &[u8]) -> Result<(), WaveformError> {
    match values.iter().position(|&v| v > 1) {
        Some(index) => Err(WaveformError::RepresentationViolation(format!(
            "value {} at index {} is not 0 or 1",
            values[index], index
        ))),
        None => Ok(()),
    }
}

fn check_timings(timings: &[f64], resolution: f64) -> Result<(), WaveformError> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(WaveformError::RepresentationViolation(format!(
            "resolution must be positive, got {}",
            resolution
        )));
    }
    for (i, pair) in timings.windows(2).enumerate() {
        let step = pair[1] - pair[0];
        let tolerance = SPACING_TOLERANCE * pair[1].abs().max(1.0);
        if (step - resolution).abs() > tolerance {
            return Err(WaveformError::RepresentationViolation(format!(
                "timestamp step {} at index {} differs from resolution {}",
                step,
                i + 1,
                resolution
            )));
        }
    }
    Ok(())
}
