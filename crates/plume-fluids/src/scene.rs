use rand::Rng;

use crate::{diagnostics, source::SourceInjector, Fluid, FluidError};

/// What the host loop talks to: a fluid, its parameters and the source injector.
///
/// A frame is `inject` for any pending input, then a single `step`, then reads through `fluid()`.
pub struct Scene<F: Fluid, R> {
    /// The fluid for this scene.
    pub fluid: F,
    /// The parameters for this scene's fluid.
    params: F::Params,
    /// Adds density and velocity impulses on behalf of the host.
    injector: SourceInjector<R>,
    /// Number of completed steps.
    frame: u64,
}

impl<F: Fluid, R> Scene<F, R> {
    #[inline(always)]
    pub fn new(fluid: F, params: F::Params, injector: SourceInjector<R>) -> Self {
        Self {
            fluid,
            params,
            injector,
            frame: 0,
        }
    }

    #[inline(always)]
    pub fn fluid(&self) -> &F {
        &self.fluid
    }

    #[inline(always)]
    pub fn params(&self) -> &F::Params {
        &self.params
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.fluid.grid().size()
    }

    #[inline(always)]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn step(&mut self, dt: f32) {
        self.fluid.step(dt, &self.params);
        self.frame += 1;

        if log::log_enabled!(log::Level::Trace) {
            let grid = self.fluid.grid();
            log::trace!(
                "frame {}: density={:.3} ke={:.5} max_div={:.3e}",
                self.frame,
                diagnostics::total_density(grid),
                diagnostics::kinetic_energy(grid),
                diagnostics::max_divergence(grid.velocities_x(), grid.velocities_y()),
            );
        }
    }
}

impl<F: Fluid, R: Rng> Scene<F, R> {
    /// Injects the configured source amount at `(i, j)`.
    pub fn inject(&mut self, i: usize, j: usize) -> Result<(), FluidError> {
        self.injector.inject(self.fluid.grid_mut(), i, j)
    }

    /// Injects `amount` of density at `(i, j)`.
    pub fn inject_amount(&mut self, i: usize, j: usize, amount: f32) -> Result<(), FluidError> {
        self.injector.inject_amount(self.fluid.grid_mut(), i, j, amount)
    }
}
