use std::f64::consts::{FRAC_PI_4, PI};
use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use svms_shared_protocol::{DetectorConfig, EchoEstimate, SweepConfig};

use crate::capture::Capture;
use crate::echo::detect_echo_with;
use crate::error::MapperResult;
use crate::waveform::Waveform;

/// Pointing direction in radians. Azimuth is measured in the horizontal
/// plane, elevation above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub azimuth: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub direction: Direction,
    pub estimate: EchoEstimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    pub azimuth: f64,
    pub elevation: f64,
    pub distance: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Measurement {
    /// Cartesian position of the echo, or `None` when nothing was detected.
    pub fn to_point(&self) -> Option<MappedPoint> {
        let distance = self.estimate.distance()?;
        let Direction { azimuth, elevation } = self.direction;
        Some(MappedPoint {
            azimuth,
            elevation,
            distance,
            x: distance * elevation.cos() * azimuth.cos(),
            y: distance * elevation.cos() * azimuth.sin(),
            z: distance * elevation.sin(),
        })
    }
}

/// Scan grid in capture order: elevations from -45° to +45° inclusive on the
/// outer loop, azimuths over a full turn (end excluded) on the inner loop.
pub fn directions(cfg: &SweepConfig) -> Vec<Direction> {
    let azimuth_step = if cfg.num_directions > 0 {
        2.0 * PI / cfg.num_directions as f64
    } else {
        0.0
    };
    let elevation_step = if cfg.elevation_angles > 1 {
        2.0 * FRAC_PI_4 / (cfg.elevation_angles - 1) as f64
    } else {
        0.0
    };

    let mut out = Vec::with_capacity(cfg.total_directions());
    for v in 0..cfg.elevation_angles {
        let elevation = -FRAC_PI_4 + v as f64 * elevation_step;
        for h in 0..cfg.num_directions {
            out.push(Direction {
                azimuth: h as f64 * azimuth_step,
                elevation,
            });
        }
    }
    out
}

/// Captures and ranges every direction in turn. The first capture or
/// detection failure aborts the sweep.
pub fn sweep<C: Capture + ?Sized>(
    capture: &mut C,
    probe: &Waveform,
    directions: &[Direction],
    detector: &DetectorConfig,
) -> Result<Vec<Measurement>> {
    let mut out = Vec::with_capacity(directions.len());
    for direction in directions {
        let response = capture.capture(probe).with_context(|| {
            format!(
                "capturing azimuth={:.3} elevation={:.3}",
                direction.azimuth, direction.elevation
            )
        })?;
        let estimate = detect_echo_with(probe, &response, detector)?;
        info!(
            "collected azimuth={:.3} elevation={:.3} distance={:?}",
            direction.azimuth,
            direction.elevation,
            estimate.distance()
        );
        out.push(Measurement {
            direction: *direction,
            estimate,
        });
    }
    Ok(out)
}

/// Ranges already captured responses on the current rayon pool. Output
/// order matches input order; any failing response fails the whole batch.
/// Run inside `ThreadPool::install` to bound the worker count.
pub fn detect_all(
    probe: &Waveform,
    responses: &[(Direction, Waveform)],
    detector: &DetectorConfig,
) -> MapperResult<Vec<Measurement>> {
    responses
        .par_iter()
        .map(|(direction, response)| {
            detect_echo_with(probe, response, detector).map(|estimate| Measurement {
                direction: *direction,
                estimate,
            })
        })
        .collect::<MapperResult<Vec<_>>>()
}
