//! Sample-wise combinators over waveforms sharing one time grid.

use super::error::WaveformError;
use super::types::Waveform;

/// Logical AND of two waveforms.
///
/// Both inputs must have the same length, resolution and first timestamp.
///
/// # Errors
///
/// [`WaveformError::SpecViolation`] if the grids differ.
pub fn and(a: &Waveform, b: &Waveform) -> Result<Waveform, WaveformError> {
    if a.len() != b.len() {
        return Err(WaveformError::SpecViolation(format!(
            "cannot AND waveforms of {} and {} samples",
            a.len(),
            b.len()
        )));
    }
    check_grid(a, b)?;

    let values = a
        .values()
        .iter()
        .zip(b.values())
        .map(|(&x, &y)| x & y)
        .collect();
    Ok(Waveform::from_parts(values, a.timings().to_vec()))
}

/// Hi where `primary` is Hi and `ion_of_interest` is Lo.
///
/// The operator is asymmetric. The result always has the primary's length: past
/// the end of a shorter `ion_of_interest` the primary passes through unchanged,
/// and the excess of a longer one is ignored.
///
/// # Errors
///
/// [`WaveformError::SpecViolation`] if resolution or first timestamp differ.
pub fn exclude(primary: &Waveform, ion_of_interest: &Waveform) -> Result<Waveform, WaveformError> {
    check_grid(primary, ion_of_interest)?;

    let overlap = primary.len().min(ion_of_interest.len());
    let mut values = Vec::with_capacity(primary.len());
    values.extend(
        primary.values()[..overlap]
            .iter()
            .zip(&ion_of_interest.values()[..overlap])
            .map(|(&p, &s)| p & (s ^ 1)),
    );
    values.extend_from_slice(&primary.values()[overlap..]);

    Ok(Waveform::from_parts(values, primary.timings().to_vec()))
}

fn check_grid(a: &Waveform, b: &Waveform) -> Result<(), WaveformError> {
    if a.resolution() != b.resolution() {
        return Err(WaveformError::SpecViolation(format!(
            "resolutions differ: {} ns vs {} ns",
            a.resolution(),
            b.resolution()
        )));
    }
    if a.start() != b.start() {
        return Err(WaveformError::SpecViolation(format!(
            "start times differ: {} ns vs {} ns",
            a.start(),
            b.start()
        )));
    }
    Ok(())
}
