use anyhow::Context;
use svms_mapper_core::{config, detect_echo_with, Waveform};
use svms_shared_protocol::EchoEstimate;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: detect-echo <probe.wav> <response.wav> [config.toml]");
        eprintln!("\nExample:");
        eprintln!("  detect-echo probe.wav response.wav");
        eprintln!("  detect-echo probe.wav response.wav svms.toml");
        std::process::exit(1);
    }

    let cfg = match args.get(3) {
        Some(path) => config::load(path)?,
        None => Default::default(),
    };
    let probe = Waveform::read_wav(&args[1]).context("loading probe")?;
    let response = Waveform::read_wav(&args[2]).context("loading response")?;

    match detect_echo_with(&probe, &response, &cfg.detector)? {
        EchoEstimate::Detected {
            sample_offset,
            distance,
            amplitude,
        } => {
            println!("Echo detected");
            println!("  Sample offset: {}", sample_offset);
            println!("  Distance:      {:.3} m", distance);
            println!("  Amplitude:     {:.3}", amplitude);
        }
        EchoEstimate::NotDetected => {
            println!(
                "No echo above {:.3} in {:.3} s of response",
                cfg.detector.amplitude_threshold,
                response.duration()
            );
        }
    }
    Ok(())
}
