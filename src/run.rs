use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use plume_fluids::{
    diagnostics,
    scene::Scene,
    source::SourceInjector,
    stable::StableFluid2D,
    Fluid,
};
use plume_io::encode::FluidDataEncoder;

use crate::config::Config;

/// Where and for how long the host holds its source down.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub cell: (usize, usize),
    /// Number of leading frames that receive an injection.
    pub frames: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub frames: usize,
    pub total_density: f32,
    pub kinetic_energy: f32,
    pub max_divergence: f32,
}

pub fn run_d2(config: &Config, emitter: Emitter, output: Option<PathBuf>) -> Result<RunSummary> {
    let fluid = StableFluid2D::new(config.n).context("failed to create fluid")?;
    let injector = SourceInjector::seeded(config.source, config.seed)?;
    let mut scene = Scene::new(fluid, config.fluid, injector);

    let (si, sj) = emitter.cell;
    scene.fluid.grid().check(si, sj).context("source cell is outside of the grid")?;

    let mut encoder = match output {
        Some(path) => {
            let mut encoder = FluidDataEncoder::new(path.clone(), config.frames as u64, config.fps)
                .with_context(|| format!("failed to create recording at {}", path.display()))?;
            encoder.encode_metadata(&scene, config.dt)?;
            Some(encoder)
        }
        None => None,
    };

    log::info!(
        "simulating {} frames on a {n}x{n} grid (dt={}, source at ({si}, {sj}) for {} frames)",
        config.frames,
        config.dt,
        emitter.frames,
        n = config.n,
    );

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(config.frames as u64).with_style(style);

    for frame in (0..config.frames).progress_with(progress) {
        if frame < emitter.frames {
            scene.inject(si, sj)?;
        }

        scene.step(config.dt);

        if let Some(encoder) = encoder.as_mut() {
            encoder.encode_frame(&scene)?;
        }
    }

    let grid = scene.fluid().grid();
    Ok(RunSummary {
        frames: config.frames,
        total_density: diagnostics::total_density(grid),
        kinetic_energy: diagnostics::kinetic_energy(grid),
        max_divergence: diagnostics::max_divergence(grid.velocities_x(), grid.velocities_y()),
    })
}

#[cfg(test)]
mod tests {
    use plume_fluids::source::SourceParams;
    use plume_io::decode::FluidDataDecoder;

    use super::*;

    fn small_config() -> Config {
        Config {
            n: 12,
            frames: 5,
            source: SourceParams { force: 1.0, amount: 100.0 },
            ..Config::default()
        }
    }

    #[test]
    fn test_run_accumulates_density() {
        let config = small_config();
        let emitter = Emitter { cell: (6, 6), frames: 3 };

        let summary = run_d2(&config, emitter, None).unwrap();

        assert_eq!(summary.frames, 5);
        assert!(summary.total_density > 0.0);
        assert!(summary.kinetic_energy.is_finite());
    }

    #[test]
    fn test_run_rejects_source_outside_grid() {
        let config = small_config();
        let emitter = Emitter { cell: (12, 0), frames: 1 };

        assert!(run_d2(&config, emitter, None).is_err());
    }

    #[test]
    fn test_run_records_every_frame() {
        let config = small_config();
        let emitter = Emitter { cell: (3, 8), frames: 5 };
        let dir = std::env::temp_dir().join(format!("plume_run_{}", std::process::id()));

        run_d2(&config, emitter, Some(dir.clone())).unwrap();

        let mut decoder = FluidDataDecoder::new(dir.clone());
        let meta = decoder.decode_metadata().unwrap();
        assert_eq!(meta.n, 12);
        assert_eq!(meta.num_frames, 5);

        let mut frames = 0;
        while let Some(frame) = decoder.decode_frame().unwrap() {
            assert!(frame.densities().iter().all(|&d| d >= 0.0));
            frames += 1;
        }
        assert_eq!(frames, 5);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
