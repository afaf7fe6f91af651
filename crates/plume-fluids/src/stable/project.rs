use ndarray::Array2;

use super::diffuse::lin_solve;

/// Central-difference divergence of `(u, v)` at interior cells, scaled by `-0.5 / N`.
///
/// Boundary cells of `div` are set to zero.
pub fn divergence(u: &Array2<f32>, v: &Array2<f32>, div: &mut Array2<f32>) {
    let n = u.nrows();
    let scale = -0.5 / n as f32;

    div.fill(0.0);
    for i in 1..n - 1 {
        for j in 1..n - 1 {
            div[(i, j)] = scale * ((u[(i + 1, j)] - u[(i - 1, j)]) + (v[(i, j + 1)] - v[(i, j - 1)]));
        }
    }
}

/// Pressure projection: removes the gradient part of `(u, v)` so the result is (approximately)
/// divergence free.
///
/// `p` and `div` are scratch buffers; both are reset on every call. Boundary velocities are
/// left untouched.
pub fn project(u: &mut Array2<f32>, v: &mut Array2<f32>, p: &mut Array2<f32>, div: &mut Array2<f32>, iterations: usize) {
    let n = u.nrows();
    let h = n as f32;

    divergence(u, v, div);

    p.fill(0.0);
    lin_solve(p, Some(&*div), 1.0, 4.0, iterations);

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            u[(i, j)] -= 0.5 * h * (p[(i + 1, j)] - p[(i - 1, j)]);
            v[(i, j)] -= 0.5 * h * (p[(i, j + 1)] - p[(i, j - 1)]);
        }
    }
}
