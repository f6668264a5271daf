/// Errors that can occur while building or combining waveforms
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveformError {
    /// Samples and timestamps do not satisfy the waveform invariants
    #[error("The representation invariant has been violated: {0}")]
    RepresentationViolation(String),

    /// Two waveforms handed to a combiner do not line up
    #[error("Timings do not align: {0}")]
    SpecViolation(String),

    /// A physical or sampling parameter is outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
