use serde::{Deserialize, Serialize};

/// Parameters of the linear frequency sweep used as the sonar probe.
///
/// `start_freq == end_freq` describes a constant tone. Keeping the sample rate
/// above twice the highest frequency is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChirpConfig {
    pub sample_rate: u32,
    pub duration: f64,
    pub start_freq: f64,
    pub end_freq: f64,
}

impl ChirpConfig {
    pub fn num_samples(&self) -> usize {
        (self.duration * self.sample_rate as f64).round().max(0.0) as usize
    }

    pub fn is_tone(&self) -> bool {
        self.start_freq == self.end_freq
    }
}

impl Default for ChirpConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration: 0.5,
            start_freq: 20_000.0,
            end_freq: 20_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_probe_is_half_second_tone() {
        let cfg = ChirpConfig::default();
        assert!(cfg.is_tone());
        assert_eq!(cfg.num_samples(), 22_050);
    }

    #[test]
    fn num_samples_rounds_to_nearest() {
        let cfg = ChirpConfig {
            sample_rate: 1_000,
            duration: 0.0106,
            ..ChirpConfig::default()
        };
        assert_eq!(cfg.num_samples(), 11);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: ChirpConfig = serde_json::from_str(r#"{"end_freq": 18000.0}"#).unwrap();
        assert_eq!(cfg.sample_rate, 44_100);
        assert_eq!(cfg.start_freq, 20_000.0);
        assert_eq!(cfg.end_freq, 18_000.0);
    }
}
