use std::{io::Write, path::{Path, PathBuf}};

use encode::{EncodingError, FluidFrameEncoder};
use plume_fluids::{stable::StableFluid2D, Fluid};

pub mod encode;
pub mod decode;
pub mod as_bytes;

/// Name of the header file inside a recording directory.
pub(crate) const META_FILE: &str = "_meta";
pub(crate) const DIMENSIONS: u8 = 2;

pub trait EncodeFluid {
    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeFluid for StableFluid2D {
    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        let grid = self.grid();
        let cells = grid.densities().len();

        encoder.encode_section(cells, grid.densities().iter().copied())?;
        encoder.encode_section(cells, grid.velocities_x().iter()
            .zip(grid.velocities_y().iter())
            .map(|(&u, &v)| glam::Vec2::new(u, v)))?;

        Ok(())
    }
}

/// Zero-padded so that frame files sort in playback order.
pub(crate) fn frame_path(dir: &Path, num_frames: u64, frame: u64) -> PathBuf {
    let max_digits = num_frames.saturating_sub(1).checked_ilog10().unwrap_or(0) + 1;
    let digits = frame.checked_ilog10().unwrap_or(0) + 1;
    let zeros = max_digits.saturating_sub(digits);

    dir.join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
}
