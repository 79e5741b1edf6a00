use std::fs;
use std::path::PathBuf;

use svms_mapper_core::{config, generate};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: generate-chirp-wav <output_path> [config.toml] [gain]");
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);
    let cfg = match args.get(2) {
        Some(cfg_path) => config::load(cfg_path)?,
        None => Default::default(),
    };
    let gain: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let probe = generate(&cfg.chirp)?;
    probe.write_wav(&path, gain)?;
    log::info!(
        "wrote {} Hz -> {} Hz probe ({} samples at {} Hz) to {}",
        cfg.chirp.start_freq,
        cfg.chirp.end_freq,
        probe.len(),
        probe.sample_rate(),
        path.display()
    );
    Ok(())
}
