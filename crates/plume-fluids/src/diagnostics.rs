use ndarray::{s, Array2};

use crate::grid::FieldGrid;

/// Sum of the density over every cell, boundary included.
pub fn total_density(grid: &FieldGrid) -> f32 {
    grid.densities().sum()
}

/// Mean kinetic energy over interior cells: `0.5 * <u² + v²>`.
pub fn kinetic_energy(grid: &FieldGrid) -> f32 {
    let n = grid.size();
    let u = grid.velocities_x().slice(s![1..n - 1, 1..n - 1]);
    let v = grid.velocities_y().slice(s![1..n - 1, 1..n - 1]);

    let sum: f32 = u.iter().zip(v.iter()).map(|(&u, &v)| u * u + v * v).sum();
    let count = (n - 2) * (n - 2);

    0.5 * sum / count as f32
}

/// Largest absolute central-difference divergence over interior cells, on the same scale the
/// pressure projection uses.
pub fn max_divergence(u: &Array2<f32>, v: &Array2<f32>) -> f32 {
    let mut div = Array2::zeros(u.dim());
    crate::stable::divergence(u, v, &mut div);
    div.iter().fold(0.0f32, |acc, d| acc.max(d.abs()))
}
