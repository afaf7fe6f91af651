//! Grid-based "stable fluids" solver: implicit diffusion, semi-Lagrangian advection and pressure
//! projection on a single dense N×N grid.

use ndarray::Array2;
use serde::Deserialize;

use crate::{check_non_negative, grid::FieldGrid, Fluid, FluidError};

pub use advect::advect;
pub use diffuse::{diffuse, diffuse_in_place};
pub use project::{divergence, project};

mod advect;
mod diffuse;
mod project;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StableFluid2DParams {
    /// Diffusion rate of the velocity field.
    pub viscosity: f32,
    /// Diffusion rate of the density field.
    pub diffusion: f32,
    /// Gauss-Seidel sweeps per diffusion and pressure solve. There is no convergence check, every
    /// solve runs exactly this many sweeps.
    pub iterations: usize,
}

impl Default for StableFluid2DParams {
    fn default() -> Self {
        Self {
            viscosity: 1e-9,
            diffusion: 1e-9,
            iterations: 20,
        }
    }
}

impl StableFluid2DParams {
    pub fn validate(&self) -> Result<(), FluidError> {
        check_non_negative("viscosity", self.viscosity)?;
        check_non_negative("diffusion", self.diffusion)
    }
}

#[derive(Debug, Clone)]
pub struct StableFluid2D {
    /// Persistent density and velocity fields.
    grid: FieldGrid,

    /// Velocity in the X direction before self-advection.
    u_prev: Array2<f32>,
    /// Velocity in the Y direction before self-advection.
    v_prev: Array2<f32>,
    /// Diffused density before advection.
    density_prev: Array2<f32>,
    /// Pressure solved for during projection.
    pressure: Array2<f32>,
    /// Divergence of the velocity field during projection.
    divergence: Array2<f32>,
}

impl StableFluid2D {
    /// Creates a zeroed simulation with `n` cells per side.
    ///
    /// All buffers are allocated once here and reused by every step.
    pub fn new(n: usize) -> Result<Self, FluidError> {
        let grid = FieldGrid::new(n)?;
        log::debug!("allocated {n}x{n} stable fluid grid");

        Ok(Self {
            grid,
            u_prev: Array2::zeros((n, n)),
            v_prev: Array2::zeros((n, n)),
            density_prev: Array2::zeros((n, n)),
            pressure: Array2::zeros((n, n)),
            divergence: Array2::zeros((n, n)),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    fn project(&mut self, iterations: usize) {
        project(
            &mut self.grid.u,
            &mut self.grid.v,
            &mut self.pressure,
            &mut self.divergence,
            iterations,
        );
    }

    fn velocity_step(&mut self, dt: f32, params: &StableFluid2DParams) {
        let iters = params.iterations;

        diffuse_in_place(&mut self.grid.u, params.viscosity, dt, iters);
        diffuse_in_place(&mut self.grid.v, params.viscosity, dt, iters);

        // The field that transports velocity must itself be divergence free.
        self.project(iters);

        self.u_prev.assign(&self.grid.u);
        self.v_prev.assign(&self.grid.v);
        advect(&mut self.grid.u, &self.u_prev, &self.u_prev, &self.v_prev, dt);
        advect(&mut self.grid.v, &self.v_prev, &self.u_prev, &self.v_prev, dt);

        self.project(iters);
    }

    fn density_step(&mut self, dt: f32, params: &StableFluid2DParams) {
        diffuse_in_place(&mut self.grid.density, params.diffusion, dt, params.iterations);

        self.density_prev.assign(&self.grid.density);
        advect(&mut self.grid.density, &self.density_prev, &self.grid.u, &self.grid.v, dt);
    }
}

impl Fluid for StableFluid2D {
    type Params = StableFluid2DParams;

    /// Advances the fields by one frame. The order is fixed: velocity is diffused, projected,
    /// self-advected and projected again, then density is diffused and carried along the new
    /// velocity.
    fn step(&mut self, dt: f32, params: &Self::Params) {
        self.velocity_step(dt, params);
        self.density_step(dt, params);
    }

    #[inline]
    fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    #[inline]
    fn grid_mut(&mut self) -> &mut FieldGrid {
        &mut self.grid
    }
}
