use log::{debug, warn};
use svms_shared_protocol::{DetectorConfig, EchoEstimate};

use crate::error::{MapperError, MapperResult};
use crate::waveform::Waveform;

/// Locates the first echo in `response` and ranges it.
///
/// The response is rectified and scanned from the first sample; the first
/// index whose envelope strictly exceeds `amplitude_threshold` is the echo
/// onset, so a closer weak reflection wins over a later strong one. The
/// onset is converted to a one-way distance with `speed_of_sound`.
pub fn detect_echo(
    probe: &Waveform,
    response: &Waveform,
    speed_of_sound: f64,
    amplitude_threshold: f64,
) -> MapperResult<EchoEstimate> {
    let cfg = DetectorConfig {
        speed_of_sound,
        amplitude_threshold,
        ..DetectorConfig::default()
    };
    detect_echo_with(probe, response, &cfg)
}

/// Same as [`detect_echo`], taking every detector knob from `cfg`.
pub fn detect_echo_with(
    probe: &Waveform,
    response: &Waveform,
    cfg: &DetectorConfig,
) -> MapperResult<EchoEstimate> {
    validate(cfg)?;
    if probe.sample_rate() != response.sample_rate() {
        return Err(MapperError::SampleRateMismatch {
            probe: probe.sample_rate(),
            response: response.sample_rate(),
        });
    }
    if response.len() < probe.len() {
        warn!(
            "response ({} samples) is shorter than the probe ({} samples)",
            response.len(),
            probe.len()
        );
    }

    let env = envelope(response.samples(), cfg.smoothing_window);
    let hit = env
        .iter()
        .enumerate()
        .find(|(_, level)| **level > cfg.amplitude_threshold);

    let estimate = match hit {
        Some((sample_offset, &amplitude)) => EchoEstimate::Detected {
            sample_offset,
            distance: offset_to_distance(sample_offset, response.sample_rate(), cfg.speed_of_sound),
            amplitude,
        },
        None => EchoEstimate::NotDetected,
    };
    debug!("echo detection over {} samples: {:?}", env.len(), estimate);
    Ok(estimate)
}

/// Rectified amplitude profile, smoothed with a trailing moving average of
/// `window` samples. The first samples average over what is available so the
/// output has the same length as the input.
pub fn envelope(samples: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    if window == 1 {
        return samples.iter().map(|s| s.abs()).collect();
    }

    let mut out = Vec::with_capacity(samples.len());
    let mut acc = 0.0;
    for (n, s) in samples.iter().enumerate() {
        acc += s.abs();
        if n >= window {
            acc -= samples[n - window].abs();
        }
        let filled = (n + 1).min(window);
        out.push(acc / filled as f64);
    }
    out
}

/// Converts a round-trip sample offset to the one-way distance in metres.
pub fn offset_to_distance(sample_offset: usize, sample_rate: u32, speed_of_sound: f64) -> f64 {
    let elapsed = sample_offset as f64 / sample_rate as f64;
    speed_of_sound * elapsed / 2.0
}

pub fn validate(cfg: &DetectorConfig) -> MapperResult<()> {
    if !cfg.speed_of_sound.is_finite() || cfg.speed_of_sound <= 0.0 {
        return Err(MapperError::InvalidConfig(format!(
            "speed of sound must be positive, got {}",
            cfg.speed_of_sound
        )));
    }
    if cfg.amplitude_threshold.is_nan() || cfg.amplitude_threshold < 0.0 {
        return Err(MapperError::InvalidConfig(format!(
            "amplitude threshold must be non-negative, got {}",
            cfg.amplitude_threshold
        )));
    }
    Ok(())
}
