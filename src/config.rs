use std::path::Path;

use anyhow::{bail, Context, Result};
use plume_fluids::{source::SourceParams, stable::StableFluid2DParams};
use serde::Deserialize;

/// Configuration file picked up from the working directory when `--config` is not given.
pub const DEFAULT_PATH: &str = "plume.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid cells per side.
    pub n: usize,
    /// Time step per frame.
    pub dt: f32,
    /// Seed for the injection perturbations.
    pub seed: u64,
    pub frames: usize,
    pub fps: u32,
    pub fluid: StableFluid2DParams,
    pub source: SourceParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n: 50,
            dt: 0.1,
            seed: 0,
            frames: 600,
            fps: 60,
            fluid: StableFluid2DParams::default(),
            source: SourceParams::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            bail!("time step must be positive and finite, got {}", self.dt);
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }

        self.fluid.validate().context("invalid fluid parameters")?;
        self.source.validate().context("invalid source parameters")?;

        Ok(())
    }
}

fn parse(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads `path` if given, failing on any error. Otherwise falls back to [`DEFAULT_PATH`] when it
/// exists and to the defaults when it does not or cannot be parsed.
pub fn load(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return parse(path);
    }

    let path = Path::new(DEFAULT_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }

    match parse(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            log::warn!("{e:#}; using defaults");
            Ok(Config::default())
        }
    }
}
