use glam::Vec2;
use ndarray::Array2;

use crate::FluidError;

/// Smallest resolution that still has an interior cell.
pub const MIN_RESOLUTION: usize = 3;

/// Dense N×N cell-centred fields, indexed as `[(i, j)]` with `i` along x and `j` along y.
///
/// Cells with `i` or `j` equal to `0` or `N - 1` form the boundary ring. None of the solver
/// passes write to it: boundary cells keep whatever value they last held, which amounts to a
/// no-op boundary condition rather than a reflective or periodic one. This is a known
/// simplification and is kept as is.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    /// Number of cells along each axis.
    n: usize,
    /// Transported scalar, e.g. dye concentration. Never negative.
    pub(crate) density: Array2<f32>,
    /// Velocity in the X direction.
    pub(crate) u: Array2<f32>,
    /// Velocity in the Y direction.
    pub(crate) v: Array2<f32>,
}

impl FieldGrid {
    /// Creates a zeroed grid with `n` cells per side.
    pub fn new(n: usize) -> Result<Self, FluidError> {
        if n < MIN_RESOLUTION {
            return Err(FluidError::GridTooSmall { n });
        }

        Ok(Self {
            n,
            density: Array2::zeros((n, n)),
            u: Array2::zeros((n, n)),
            v: Array2::zeros((n, n)),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns an error unless `(i, j)` addresses a cell of this grid.
    #[inline]
    pub fn check(&self, i: usize, j: usize) -> Result<(), FluidError> {
        if i < self.n && j < self.n {
            Ok(())
        } else {
            Err(FluidError::OutOfBounds { i, j, n: self.n })
        }
    }

    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.n - 1 || j == self.n - 1
    }

    /// Density at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn density(&self, i: usize, j: usize) -> f32 {
        self.density[(i, j)]
    }

    /// Velocity at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn velocity(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(self.u[(i, j)], self.v[(i, j)])
    }

    pub fn densities(&self) -> &Array2<f32> {
        &self.density
    }

    pub fn velocities_x(&self) -> &Array2<f32> {
        &self.u
    }

    pub fn velocities_y(&self) -> &Array2<f32> {
        &self.v
    }

    pub fn get_density(&self, i: usize, j: usize) -> Option<f32> {
        self.density.get((i, j)).copied()
    }

    pub fn get_velocity(&self, i: usize, j: usize) -> Option<Vec2> {
        Some(Vec2::new(*self.u.get((i, j))?, *self.v.get((i, j))?))
    }

    /// Overwrites the density at `(i, j)`.
    pub fn set_density(&mut self, i: usize, j: usize, value: f32) -> Result<(), FluidError> {
        self.check(i, j)?;
        crate::check_non_negative("density", value)?;
        self.density[(i, j)] = value;
        Ok(())
    }

    /// Overwrites the velocity at `(i, j)`.
    pub fn set_velocity(&mut self, i: usize, j: usize, value: Vec2) -> Result<(), FluidError> {
        self.check(i, j)?;
        self.u[(i, j)] = value.x;
        self.v[(i, j)] = value.y;
        Ok(())
    }

    /// Iterates over every cell of the boundary ring, each exactly once.
    pub fn boundary_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |i| (0..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.is_boundary(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let grid = FieldGrid::new(8).unwrap();
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.densities().dim(), (8, 8));
        assert!(grid.densities().iter().all(|&d| d == 0.0));
        assert!(grid.velocities_x().iter().all(|&u| u == 0.0));
        assert!(grid.velocities_y().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert_eq!(FieldGrid::new(2).unwrap_err(), FluidError::GridTooSmall { n: 2 });
        assert!(FieldGrid::new(MIN_RESOLUTION).is_ok());
    }

    #[test]
    fn test_check_bounds() {
        let grid = FieldGrid::new(5).unwrap();
        assert!(grid.check(0, 0).is_ok());
        assert!(grid.check(4, 4).is_ok());
        assert_eq!(grid.check(5, 0), Err(FluidError::OutOfBounds { i: 5, j: 0, n: 5 }));
        assert!(grid.get_density(0, 5).is_none());
        assert!(grid.get_velocity(5, 5).is_none());
    }

    #[test]
    fn test_boundary_ring() {
        let grid = FieldGrid::new(5).unwrap();
        assert!(grid.is_boundary(0, 2));
        assert!(grid.is_boundary(4, 2));
        assert!(grid.is_boundary(2, 4));
        assert!(!grid.is_boundary(1, 1));
        assert!(!grid.is_boundary(3, 3));
        // 5x5 grid minus its 3x3 interior
        assert_eq!(grid.boundary_cells().count(), 16);
    }

    #[test]
    fn test_set_and_read_back() {
        let mut grid = FieldGrid::new(4).unwrap();
        grid.set_density(1, 2, 3.5).unwrap();
        grid.set_velocity(2, 1, Vec2::new(-1.0, 2.0)).unwrap();

        assert_eq!(grid.density(1, 2), 3.5);
        assert_eq!(grid.velocity(2, 1), Vec2::new(-1.0, 2.0));
        assert_eq!(grid.get_density(1, 2), Some(3.5));
        assert!(grid.set_density(1, 1, -1.0).is_err());
        assert!(grid.set_velocity(4, 0, Vec2::ONE).is_err());
    }
}
