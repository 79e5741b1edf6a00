use std::collections::VecDeque;
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::waveform::Waveform;

pub mod simulated;

pub use simulated::SimulatedCapture;

/// Emits a probe and records what comes back.
///
/// Implementations block until the recording is complete and return the
/// whole response; callers never see a partial buffer.
pub trait Capture {
    fn capture(&mut self, probe: &Waveform) -> Result<Waveform>;
}

impl<C: Capture + ?Sized> Capture for Box<C> {
    fn capture(&mut self, probe: &Waveform) -> Result<Waveform> {
        (**self).capture(probe)
    }
}

/// Plays back previously recorded responses in order.
pub struct ReplayCapture {
    responses: VecDeque<Waveform>,
}

impl ReplayCapture {
    pub fn new(responses: impl IntoIterator<Item = Waveform>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }

    pub fn from_wav_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let responses = paths
            .into_iter()
            .map(|p| Waveform::read_wav(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(responses))
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Capture for ReplayCapture {
    fn capture(&mut self, _probe: &Waveform) -> Result<Waveform> {
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow!("no recorded responses left to replay"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn probe() -> Waveform {
        Waveform::new(8_000, vec![0.5; 16]).unwrap()
    }

    #[test]
    fn replays_in_order_then_fails() {
        let first = Waveform::new(8_000, vec![0.1; 4]).unwrap();
        let second = Waveform::new(8_000, vec![0.2; 4]).unwrap();
        let mut replay = ReplayCapture::new([first.clone(), second.clone()]);

        assert_eq!(replay.capture(&probe()).unwrap(), first);
        assert_eq!(replay.capture(&probe()).unwrap(), second);
        assert_eq!(replay.remaining(), 0);
        assert!(replay.capture(&probe()).is_err());
    }

    #[test]
    fn loads_recordings_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("response_0.wav");
        Waveform::new(8_000, vec![0.0, 0.25, -0.25, 0.0])
            .unwrap()
            .write_wav(&path, 1.0)
            .unwrap();

        let mut replay = ReplayCapture::from_wav_files([&path]).unwrap();
        let response = replay.capture(&probe()).unwrap();
        assert_eq!(response.sample_rate(), 8_000);
        assert_eq!(response.len(), 4);
    }

    #[test]
    fn missing_recording_is_reported() {
        let dir = tempdir().unwrap();
        let result = ReplayCapture::from_wav_files([dir.path().join("absent.wav")]);
        assert!(result.is_err());
    }

    #[test]
    fn boxed_backends_forward_calls() {
        let mut boxed: Box<dyn Capture> =
            Box::new(ReplayCapture::new([Waveform::silence(8_000, 2).unwrap()]));
        assert_eq!(boxed.capture(&probe()).unwrap().len(), 2);
    }
}
