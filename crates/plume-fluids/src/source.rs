use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

use crate::{check_non_negative, grid::FieldGrid, FluidError};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceParams {
    /// Velocity perturbations are drawn uniformly from `[-force, force]`.
    pub force: f32,
    /// Density added by a default injection.
    pub amount: f32,
}

impl Default for SourceParams {
    fn default() -> Self {
        Self {
            force: 500.0,
            amount: 50000.0,
        }
    }
}

impl SourceParams {
    pub fn validate(&self) -> Result<(), FluidError> {
        check_non_negative("force", self.force)?;
        check_non_negative("amount", self.amount)
    }
}

/// Adds density and random velocity impulses to single cells.
///
/// The random source is owned by the injector, so a seeded generator makes every injection
/// sequence reproducible.
#[derive(Debug, Clone)]
pub struct SourceInjector<R> {
    params: SourceParams,
    rng: R,
}

impl SourceInjector<StdRng> {
    pub fn seeded(params: SourceParams, seed: u64) -> Result<Self, FluidError> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SourceInjector<R> {
    pub fn new(params: SourceParams, rng: R) -> Result<Self, FluidError> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    #[inline]
    pub fn params(&self) -> &SourceParams {
        &self.params
    }

    /// Injects the configured amount at `(i, j)`.
    pub fn inject(&mut self, grid: &mut FieldGrid, i: usize, j: usize) -> Result<(), FluidError> {
        self.inject_amount(grid, i, j, self.params.amount)
    }

    /// Adds `amount` to the density at `(i, j)` and perturbs that cell's velocity.
    ///
    /// Out-of-range cells are rejected, never clamped, and leave the grid untouched.
    pub fn inject_amount(
        &mut self,
        grid: &mut FieldGrid,
        i: usize,
        j: usize,
        amount: f32,
    ) -> Result<(), FluidError> {
        grid.check(i, j)?;
        check_non_negative("amount", amount)?;

        let force = self.params.force;
        let du = self.rng.gen_range(-force..=force);
        let dv = self.rng.gen_range(-force..=force);

        grid.density[(i, j)] += amount;
        grid.u[(i, j)] += du;
        grid.v[(i, j)] += dv;

        Ok(())
    }
}
