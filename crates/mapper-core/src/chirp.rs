use std::f64::consts::PI;

use log::debug;
use svms_shared_protocol::ChirpConfig;

use crate::error::{MapperError, MapperResult};
use crate::waveform::Waveform;

/// Longest probe `generate` will build: 2^26 samples (512 MiB of `f64`,
/// about 25 minutes at 44.1 kHz).
pub const MAX_PROBE_SAMPLES: usize = 1 << 26;

/// Generates the linear-sweep probe described by `cfg`.
///
/// The waveform has `round(duration * sample_rate)` samples at `t = n / fs`,
/// unit peak amplitude, and its instantaneous frequency moves linearly from
/// `start_freq` to `end_freq` over `duration`. Equal frequencies give a tone.
pub fn generate(cfg: &ChirpConfig) -> MapperResult<Waveform> {
    validate(cfg)?;

    let sr = cfg.sample_rate as f64;
    let f0 = cfg.start_freq;
    let sweep_k = (cfg.end_freq - cfg.start_freq) / cfg.duration;
    if cfg.is_tone() {
        debug!("generating {} Hz tone, {} s", f0, cfg.duration);
    } else {
        debug!("generating {} -> {} Hz sweep, {} s", f0, cfg.end_freq, cfg.duration);
    }
    let samples = (0..cfg.num_samples())
        .map(|n| {
            let t = n as f64 / sr;
            let phase = 2.0 * PI * (f0 * t + 0.5 * sweep_k * t * t);
            phase.sin()
        })
        .collect();

    Waveform::new(cfg.sample_rate, samples)
}

/// Pure tone reference with the same sampling grid as [`generate`].
pub fn generate_tone(sample_rate: u32, duration: f64, freq: f64) -> MapperResult<Waveform> {
    let cfg = ChirpConfig {
        sample_rate,
        duration,
        start_freq: freq,
        end_freq: freq,
    };
    validate(&cfg)?;

    let sr = sample_rate as f64;
    let samples = (0..cfg.num_samples())
        .map(|n| (2.0 * PI * freq * n as f64 / sr).sin())
        .collect();
    Waveform::new(sample_rate, samples)
}

pub fn validate(cfg: &ChirpConfig) -> MapperResult<()> {
    if cfg.sample_rate == 0 {
        return Err(MapperError::InvalidConfig(
            "sample rate must be positive".into(),
        ));
    }
    if !cfg.duration.is_finite() || cfg.duration <= 0.0 {
        return Err(MapperError::InvalidConfig(format!(
            "duration must be positive, got {}",
            cfg.duration
        )));
    }
    let requested = (cfg.duration * cfg.sample_rate as f64).round();
    if requested > MAX_PROBE_SAMPLES as f64 {
        return Err(MapperError::InvalidConfig(format!(
            "probe of {} s at {} Hz exceeds {} samples",
            cfg.duration, cfg.sample_rate, MAX_PROBE_SAMPLES
        )));
    }
    for (name, freq) in [("start_freq", cfg.start_freq), ("end_freq", cfg.end_freq)] {
        if !freq.is_finite() || freq < 0.0 {
            return Err(MapperError::InvalidConfig(format!(
                "{} must be non-negative, got {}",
                name, freq
            )));
        }
    }
    Ok(())
}
