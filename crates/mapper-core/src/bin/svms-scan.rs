use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use svms_mapper_core::{config, directions, generate, sweep, Direction, SimulatedCapture};
use svms_shared_protocol::ScanEvent;

// Half extents of the simulated room (x, y, z) in metres, sonar at the centre.
const ROOM: (f64, f64, f64) = (4.0, 3.0, 1.5);
const NOISE_AMPLITUDE: f64 = 0.02;
const NOISE_SEED: u64 = 1;

/// Range from the room centre to the nearest wall along `dir`.
fn wall_distance(dir: &Direction) -> Option<f64> {
    let components = [
        (dir.elevation.cos() * dir.azimuth.cos(), ROOM.0),
        (dir.elevation.cos() * dir.azimuth.sin(), ROOM.1),
        (dir.elevation.sin(), ROOM.2),
    ];
    components
        .iter()
        .filter(|(c, _)| c.abs() > 1e-9)
        .map(|(c, half)| half / c.abs())
        .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.min(d))))
}

const USAGE: &str = "Usage: svms-scan [config.toml] [points.csv]";

#[derive(Debug, PartialEq)]
enum Invocation {
    Help,
    Misuse,
    Run,
}

fn invocation(args: &[String]) -> Invocation {
    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        Invocation::Help
    } else if args.len() > 3 {
        Invocation::Misuse
    } else {
        Invocation::Run
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    match invocation(&args) {
        Invocation::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Invocation::Misuse => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
        Invocation::Run => {}
    }

    let cfg = match args.get(1) {
        Some(path) => config::load_or_default(path)?,
        None => Default::default(),
    };
    config::validate(&cfg)?;
    let csv_path = args.get(2).map(PathBuf::from);

    log::info!("starting sonar scan");
    let probe = generate(&cfg.chirp)?;
    let grid = directions(&cfg.sweep);

    let mut capture = SimulatedCapture::new(grid.iter().map(wall_distance))
        .with_speed_of_sound(cfg.detector.speed_of_sound)
        .with_noise(NOISE_AMPLITUDE, NOISE_SEED);

    let started = ScanEvent::ScanStarted {
        directions: grid.len(),
        sample_rate: probe.sample_rate(),
    };
    println!("{}", serde_json::to_string(&started)?);

    let measurements = sweep(&mut capture, &probe, &grid, &cfg.detector)?;
    log::info!("data collection completed");

    for m in &measurements {
        let event = ScanEvent::EchoMeasured {
            azimuth: m.direction.azimuth,
            elevation: m.direction.elevation,
            estimate: m.estimate,
        };
        println!("{}", serde_json::to_string(&event)?);
    }

    let detected = measurements.iter().filter(|m| m.estimate.is_detected()).count();
    let completed = ScanEvent::ScanCompleted {
        detected,
        missed: measurements.len() - detected,
    };
    println!("{}", serde_json::to_string(&completed)?);

    if let Some(path) = csv_path {
        let points: Vec<_> = measurements.iter().filter_map(|m| m.to_point()).collect();
        let mut out = String::from("x,y,z\n");
        for p in &points {
            writeln!(out, "{:.4},{:.4},{:.4}", p.x, p.y, p.z)?;
        }
        fs::write(&path, out)?;
        log::info!("wrote {} points to {}", points.len(), path.display());
    }
    Ok(())
}
