use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{MapperError, MapperResult};

/// Fixed-length block of real samples together with the rate that produced it.
///
/// There are no mutable accessors; a waveform is built once and read many times.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    sample_rate: u32,
    samples: Vec<f64>,
}

impl Waveform {
    pub fn new(sample_rate: u32, samples: Vec<f64>) -> MapperResult<Self> {
        if sample_rate == 0 {
            return Err(MapperError::InvalidWaveform(
                "sample rate must be positive".into(),
            ));
        }
        if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
            return Err(MapperError::InvalidWaveform(format!(
                "non-finite sample at index {}",
                idx
            )));
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Silent waveform of `len` samples.
    pub fn silence(sample_rate: u32, len: usize) -> MapperResult<Self> {
        Self::new(sample_rate, vec![0.0; len])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()))
    }

    /// Writes the waveform as 16-bit mono PCM, clipping to [-1, 1] and
    /// scaling by `gain`.
    pub fn write_wav(&self, path: impl AsRef<Path>, gain: f64) -> Result<()> {
        let path = path.as_ref();
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec)
            .with_context(|| format!("creating {}", path.display()))?;
        let gain = gain.clamp(0.0, 1.0);
        for s in &self.samples {
            let pcm = ((s * gain).clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
            writer.write_sample(pcm)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Reads a WAV file, normalising integer PCM to [-1, 1]. Multi-channel
    /// files keep only the first channel.
    pub fn read_wav(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader =
            WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f64> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / full_scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let samples = interleaved.into_iter().step_by(channels).collect();
        Ok(Self::new(spec.sample_rate, samples)?)
    }
}
