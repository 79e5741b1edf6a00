use thiserror::Error;

pub type MapperResult<T> = Result<T, MapperError>;

/// Errors raised by the probe generator and the echo detector.
///
/// A missing echo is not an error; see [`svms_shared_protocol::EchoEstimate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// Generation or detection parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Probe and response were sampled at different rates.
    #[error("sample rate mismatch: probe {probe} Hz, response {response} Hz")]
    SampleRateMismatch { probe: u32, response: u32 },

    /// Sample data that cannot form a waveform (zero rate, non-finite samples).
    #[error("invalid waveform: {0}")]
    InvalidWaveform(String),
}
