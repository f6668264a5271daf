use crate::waveform::WaveformError;

/// Errors that can occur during a mass-pair sweep
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// I/O error on the output sink or manifest
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Waveform generation failed outside a per-pair task
    #[error("Waveform error: {0}")]
    WaveformError(#[from] WaveformError),

    /// The worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),

    /// Manifest serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The sweep parameters are unusable
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(String),

    /// The writer thread stopped accepting rows
    #[error("Writer thread disconnected before all rows were sent")]
    WriterDisconnected,

    /// Writer thread panicked
    #[error("Writer thread panicked")]
    ThreadPanicked,
}
