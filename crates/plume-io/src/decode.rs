use std::{fs::File, io::{BufReader, Read}, path::PathBuf};

use glam::Vec2;
use thiserror::Error;

use super::as_bytes::AsBytes;

/// Reads back a recording written by [`FluidDataEncoder`](crate::encode::FluidDataEncoder).
pub struct FluidDataDecoder {
    /// The path to the directory into which the fluid data resides.
    path: PathBuf,
    n: usize,
    num_frames: u64,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            n: 0,
            num_frames: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;

        Ok(T::from_bytes(bytes))
    }

    fn read_section<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R, expected: usize) -> Result<Vec<T>, DecodingError> {
        let len = Self::read_value::<8, u64, _>(reader)? as usize;
        if len != expected {
            return Err(DecodingError::Dimension { expected, found: len });
        }

        let mut bytes = vec![0; N * len];
        reader.read_exact(&mut bytes)?;

        Ok(bytes.chunks_exact(N).map(|b| {
            let mut chunk = [0; N];
            chunk.copy_from_slice(b);
            T::from_bytes(chunk)
        }).collect())
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        crate::frame_path(&self.path, self.num_frames, frame)
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join(crate::META_FILE);
        let mut reader = BufReader::new(File::open(path)?);

        let dim = Self::read_value::<1, u8, _>(&mut reader)?;
        if dim != crate::DIMENSIONS {
            return Err(DecodingError::Dimensionality(dim));
        }

        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let n = Self::read_value::<4, u32, _>(&mut reader)? as usize;
        let dt = Self::read_value::<4, f32, _>(&mut reader)?;

        self.n = n;
        self.num_frames = num_frames;

        Ok(FluidMetadata {
            fps,
            num_frames,
            n,
            dt,
        })
    }

    /// Decodes the next frame, or `None` once every frame has been read. Frames missing from
    /// an interrupted recording surface as I/O errors.
    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        if self.current_frame >= self.num_frames {
            return Ok(None)
        }

        let path = self.frame_path(self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let cells = self.n * self.n;
        let density = Self::read_section::<4, f32, _>(&mut reader, cells)?;
        let velocity = Self::read_section::<8, Vec2, _>(&mut reader, cells)?;

        self.current_frame += 1;

        Ok(Some(FluidFrameData {
            n: self.n,
            density,
            velocity,
        }))
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidMetadata {
    pub fps: u32,
    pub num_frames: u64,
    /// Grid cells per side.
    pub n: usize,
    pub dt: f32,
}

/// One decoded frame, stored row-major with `j` varying fastest.
#[derive(Debug, Clone)]
pub struct FluidFrameData {
    n: usize,
    density: Vec<f32>,
    velocity: Vec<Vec2>,
}

impl FluidFrameData {
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.n && j < self.n).then(|| i * self.n + j)
    }

    /// Density at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn density(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.n && j < self.n, "cell ({i}, {j}) is outside of the {0}x{0} frame", self.n);
        self.density[i * self.n + j]
    }

    /// Velocity at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn velocity(&self, i: usize, j: usize) -> Vec2 {
        assert!(i < self.n && j < self.n, "cell ({i}, {j}) is outside of the {0}x{0} frame", self.n);
        self.velocity[i * self.n + j]
    }

    pub fn get_density(&self, i: usize, j: usize) -> Option<f32> {
        self.index(i, j).map(|k| self.density[k])
    }

    pub fn get_velocity(&self, i: usize, j: usize) -> Option<Vec2> {
        self.index(i, j).map(|k| self.velocity[k])
    }

    pub fn densities(&self) -> &[f32] {
        &self.density
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocity
    }
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("expected {expected} cells per section, found {found}")]
    Dimension { expected: usize, found: usize },
    #[error("unsupported {0}-dimensional recording")]
    Dimensionality(u8),
}
