use serde::{Deserialize, Serialize};

use crate::echo::EchoEstimate;

/// Line-delimited events emitted by a scan for an external visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEvent {
    ScanStarted {
        directions: usize,
        sample_rate: u32,
    },
    EchoMeasured {
        azimuth: f64,
        elevation: f64,
        estimate: EchoEstimate,
    },
    ScanCompleted {
        detected: usize,
        missed: usize,
    },
}
