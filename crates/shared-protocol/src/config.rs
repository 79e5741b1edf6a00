use serde::{Deserialize, Serialize};

use crate::chirp::ChirpConfig;
use crate::echo::DetectorConfig;

/// Angular resolution of a scan. Only the orchestration layer reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub num_directions: usize,
    pub elevation_angles: usize,
}

impl SweepConfig {
    pub fn total_directions(&self) -> usize {
        self.num_directions * self.elevation_angles
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            num_directions: 36,
            elevation_angles: 9,
        }
    }
}

/// Full configuration surface of a mapping run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub chirp: ChirpConfig,
    pub detector: DetectorConfig,
    pub sweep: SweepConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_covers_324_directions() {
        assert_eq!(SweepConfig::default().total_directions(), 324);
    }

    #[test]
    fn partial_document_keeps_other_sections() {
        let cfg: MapperConfig =
            serde_json::from_str(r#"{"detector": {"amplitude_threshold": 0.25}}"#).unwrap();
        assert_eq!(cfg.detector.amplitude_threshold, 0.25);
        assert_eq!(cfg.detector.speed_of_sound, 343.0);
        assert_eq!(cfg.chirp, ChirpConfig::default());
        assert_eq!(cfg.sweep, SweepConfig::default());
    }
}
