use grid::FieldGrid;
use thiserror::Error;

pub mod diagnostics;
pub mod grid;
pub mod scene;
pub mod source;
pub mod stable;

/// A fluid that can be advanced one frame at a time.
pub trait Fluid {
    type Params;

    fn step(&mut self, dt: f32, params: &Self::Params);

    /// The persistent fields the host reads back after each step.
    fn grid(&self) -> &FieldGrid;

    fn grid_mut(&mut self) -> &mut FieldGrid;
}

#[derive(Debug, Error, PartialEq)]
pub enum FluidError {
    #[error("grid resolution {n} is too small, at least {} cells per side are required", grid::MIN_RESOLUTION)]
    GridTooSmall { n: usize },
    #[error("cell ({i}, {j}) is outside of the {n}x{n} grid")]
    OutOfBounds { i: usize, j: usize, n: usize },
    #[error("invalid value {value} for `{name}`")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Rejects values that are negative, infinite or NaN.
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), FluidError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FluidError::InvalidParameter { name, value })
    }
}
