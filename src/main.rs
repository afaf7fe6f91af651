use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use run::Emitter;

mod config;
mod run;

/// Headless stable-fluids simulation with a single held-down dye source.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration file [default: plume.yaml if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid cells per side
    #[arg(short = 'n', long)]
    resolution: Option<usize>,

    /// Time step per frame
    #[arg(long)]
    dt: Option<f32>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<usize>,

    /// Seed for the injection perturbations
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to record frames into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source cell along x [default: grid centre]
    #[arg(long)]
    source_x: Option<usize>,

    /// Source cell along y [default: grid centre]
    #[arg(long)]
    source_y: Option<usize>,

    /// Number of leading frames with an active source
    #[arg(long, default_value_t = 60)]
    inject_frames: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = config::load(args.config.as_deref())?;

    if let Some(n) = args.resolution {
        config.n = n;
    }
    if let Some(dt) = args.dt {
        config.dt = dt;
    }
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    let emitter = Emitter {
        cell: (
            args.source_x.unwrap_or(config.n / 2),
            args.source_y.unwrap_or(config.n / 2),
        ),
        frames: args.inject_frames,
    };

    let summary = run::run_d2(&config, emitter, args.output)?;

    log::info!(
        "finished {} frames: total density {:.1}, kinetic energy {:.4}, max divergence {:.3e}",
        summary.frames,
        summary.total_density,
        summary.kinetic_energy,
        summary.max_divergence,
    );

    Ok(())
}
