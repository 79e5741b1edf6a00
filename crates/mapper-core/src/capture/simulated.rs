use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use svms_shared_protocol::SPEED_OF_SOUND;

use super::Capture;
use crate::waveform::Waveform;

/// Synthesises responses for a scene of point reflectors.
///
/// Each call consumes the next entry of the target queue: `Some(distance)`
/// places a reflector at that range, `None` leaves the direction empty. The
/// response is uniform noise plus the probe, scaled by `echo_gain` and delayed
/// by the round-trip time. Noise comes from a seeded generator so a scene
/// replays identically.
pub struct SimulatedCapture {
    targets: VecDeque<Option<f64>>,
    speed_of_sound: f64,
    echo_gain: f64,
    noise_amplitude: f64,
    listen_samples: Option<usize>,
    rng: StdRng,
}

impl SimulatedCapture {
    pub fn new(targets: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            speed_of_sound: SPEED_OF_SOUND,
            echo_gain: 0.5,
            noise_amplitude: 0.0,
            listen_samples: None,
            rng: StdRng::seed_from_u64(0),
        }
    }

    pub fn with_speed_of_sound(mut self, speed_of_sound: f64) -> Self {
        self.speed_of_sound = speed_of_sound;
        self
    }

    pub fn with_echo_gain(mut self, gain: f64) -> Self {
        self.echo_gain = gain;
        self
    }

    pub fn with_noise(mut self, amplitude: f64, seed: u64) -> Self {
        self.noise_amplitude = amplitude.abs();
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Recording window in samples. Defaults to the probe length; shorter
    /// windows are widened to the probe length.
    pub fn with_listen_samples(mut self, samples: usize) -> Self {
        self.listen_samples = Some(samples);
        self
    }

    pub fn remaining(&self) -> usize {
        self.targets.len()
    }

    fn round_trip_samples(&self, distance: f64, sample_rate: u32) -> usize {
        let seconds = 2.0 * distance / self.speed_of_sound;
        (seconds * sample_rate as f64).round().max(0.0) as usize
    }
}

impl Capture for SimulatedCapture {
    fn capture(&mut self, probe: &Waveform) -> Result<Waveform> {
        let target = self
            .targets
            .pop_front()
            .ok_or_else(|| anyhow!("simulated scene has no directions left"))?;

        let len = self.listen_samples.unwrap_or(0).max(probe.len());
        let mut samples = vec![0.0; len];

        if self.noise_amplitude > 0.0 {
            let amp = self.noise_amplitude;
            for s in samples.iter_mut() {
                *s = self.rng.gen_range(-amp..=amp);
            }
        }

        if let Some(distance) = target {
            let delay = self.round_trip_samples(distance, probe.sample_rate());
            for (n, p) in probe.samples().iter().enumerate() {
                match samples.get_mut(delay + n) {
                    Some(slot) => *slot += p * self.echo_gain,
                    None => break,
                }
            }
        }

        Ok(Waveform::new(probe.sample_rate(), samples)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chirp::generate;
    use crate::echo::detect_echo;
    use svms_shared_protocol::{ChirpConfig, EchoEstimate};

    fn short_probe() -> Waveform {
        generate(&ChirpConfig {
            sample_rate: 44_100,
            duration: 0.005,
            start_freq: 8_000.0,
            end_freq: 12_000.0,
        })
        .unwrap()
    }

    #[test]
    fn places_echo_at_round_trip_delay() {
        let probe = short_probe();
        let mut sim = SimulatedCapture::new([Some(3.43)])
            .with_echo_gain(1.0)
            .with_listen_samples(4_410);
        let response = sim.capture(&probe).unwrap();
        assert_eq!(response.len(), 4_410);

        // 2 * 3.43 m / 343 m/s = 20 ms = 882 samples.
        assert!(response.samples()[..882].iter().all(|s| *s == 0.0));
        let est = detect_echo(&probe, &response, 343.0, 0.1).unwrap();
        match est {
            EchoEstimate::Detected {
                sample_offset,
                distance,
                ..
            } => {
                assert!((882..=884).contains(&sample_offset), "offset {}", sample_offset);
                assert!((distance - 3.43).abs() < 0.01, "distance {}", distance);
            }
            other => panic!("expected detection, got {:?}", other),
        }
    }

    #[test]
    fn empty_direction_is_noise_only() {
        let probe = short_probe();
        let mut sim = SimulatedCapture::new([None]).with_noise(0.05, 7);
        let response = sim.capture(&probe).unwrap();
        assert!(response.peak() <= 0.05);
        let est = detect_echo(&probe, &response, 343.0, 0.1).unwrap();
        assert_eq!(est, EchoEstimate::NotDetected);
    }

    #[test]
    fn echo_beyond_window_is_dropped() {
        let probe = short_probe();
        let mut sim = SimulatedCapture::new([Some(100.0)]).with_listen_samples(1_000);
        let response = sim.capture(&probe).unwrap();
        assert_eq!(response.peak(), 0.0);
    }

    #[test]
    fn window_never_shorter_than_probe() {
        let probe = short_probe();
        let mut sim = SimulatedCapture::new([None]).with_listen_samples(10);
        assert_eq!(sim.capture(&probe).unwrap().len(), probe.len());
    }

    #[test]
    fn same_seed_same_noise() {
        let probe = short_probe();
        let mut a = SimulatedCapture::new([Some(1.0)]).with_noise(0.02, 42);
        let mut b = SimulatedCapture::new([Some(1.0)]).with_noise(0.02, 42);
        assert_eq!(a.capture(&probe).unwrap(), b.capture(&probe).unwrap());
    }

    #[test]
    fn errors_when_scene_exhausted() {
        let probe = short_probe();
        let mut sim = SimulatedCapture::new([None]);
        sim.capture(&probe).unwrap();
        assert_eq!(sim.remaining(), 0);
        assert!(sim.capture(&probe).is_err());
    }
}
