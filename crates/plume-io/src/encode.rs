use std::{fs::File, io::{BufWriter, Write}, path::PathBuf};

use thiserror::Error;

use plume_fluids::{scene::Scene, Fluid};

use crate::EncodeFluid;

use super::as_bytes::AsBytes;

/// Writes a recording as a directory holding a `_meta` header and one `.dat` file per frame.
pub struct FluidDataEncoder {
    /// The path to the directory into which the fluid data will be placed.
    path: PathBuf,
    num_frames: u64,
    fps: u32,
    current_frame: u64,
}

impl FluidDataEncoder {
    pub fn new(path: PathBuf, num_frames: u64, fps: u32) -> Result<FluidDataEncoder, EncodingError> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            num_frames,
            fps,
            current_frame: 0,
        })
    }

    #[inline]
    pub fn frames_written(&self) -> u64 {
        self.current_frame
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        crate::frame_path(&self.path, self.num_frames, frame)
    }

    pub fn encode_metadata<F: Fluid, R>(&mut self, scene: &Scene<F, R>, dt: f32) -> Result<(), EncodingError> {
        let path = self.path.join(crate::META_FILE);
        let mut writer = BufWriter::new(File::create(path)?);

        writer.write_all(&[crate::DIMENSIONS])?;
        writer.write_all(&self.fps.to_bytes())?;
        writer.write_all(&self.num_frames.to_bytes())?;
        writer.write_all(&(scene.size() as u32).to_bytes())?;
        writer.write_all(&dt.to_bytes())?;
        writer.flush()?;

        Ok(())
    }

    pub fn encode_frame<F, R>(&mut self, scene: &Scene<F, R>) -> Result<(), EncodingError>
    where
        F: Fluid + EncodeFluid,
    {
        if self.current_frame >= self.num_frames {
            return Err(EncodingError::TooManyFrames { limit: self.num_frames });
        }

        let path = self.frame_path(self.current_frame);
        let mut frame = FluidFrameEncoder { writer: BufWriter::new(File::create(path)?) };

        scene.fluid.encode_state(&mut frame)?;
        frame.writer.flush()?;

        self.current_frame += 1;

        Ok(())
    }
}

pub struct FluidFrameEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> FluidFrameEncoder<W> {
    pub fn encode_section<const N: usize, T, I>(&mut self, len: usize, values: I) -> Result<(), EncodingError>
    where
        I: Iterator<Item = T>,
        T: AsBytes<N>,
    {
        self.writer.write_all(&(len as u64).to_bytes())?;

        for v in values {
            self.writer.write_all(&v.to_bytes())?;
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("recording is limited to {limit} frames")]
    TooManyFrames { limit: u64 },
}
