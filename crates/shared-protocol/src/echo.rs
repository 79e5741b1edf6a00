use serde::{Deserialize, Serialize};

/// Speed of sound in dry air at roughly 20 °C, in metres per second.
pub const SPEED_OF_SOUND: f64 = 343.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub speed_of_sound: f64,
    pub amplitude_threshold: f64,
    /// Length of the trailing moving average applied to the rectified
    /// response. 1 (or 0) leaves the rectified signal untouched.
    pub smoothing_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            speed_of_sound: SPEED_OF_SOUND,
            amplitude_threshold: 0.1,
            smoothing_window: 1,
        }
    }
}

/// Outcome of a single detection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EchoEstimate {
    Detected {
        sample_offset: usize,
        distance: f64,
        amplitude: f64,
    },
    NotDetected,
}

impl EchoEstimate {
    pub fn is_detected(&self) -> bool {
        matches!(self, EchoEstimate::Detected { .. })
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            EchoEstimate::Detected { distance, .. } => Some(*distance),
            EchoEstimate::NotDetected => None,
        }
    }
}
