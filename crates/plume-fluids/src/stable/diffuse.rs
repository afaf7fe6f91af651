use ndarray::Array2;

/// Gauss-Seidel relaxation of `x[i,j] = (x0[i,j] + a * (neighbors)) / c` over interior cells.
///
/// Cells are updated in place, row by row, so each update already sees the new values of the
/// neighbors visited earlier in the same sweep. With `x0 == None` the source term is the cell's
/// own current value, which is what diffusing a field into itself amounts to.
pub(crate) fn lin_solve(x: &mut Array2<f32>, x0: Option<&Array2<f32>>, a: f32, c: f32, iterations: usize) {
    let (nx, ny) = x.dim();

    for _ in 0..iterations {
        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                let neighbors = x[(i - 1, j)] + x[(i + 1, j)] + x[(i, j - 1)] + x[(i, j + 1)];
                let source = match x0 {
                    Some(x0) => x0[(i, j)],
                    None => x[(i, j)],
                };

                x[(i, j)] = (source + a * neighbors) / c;
            }
        }
    }
}

#[inline]
fn coefficient(n: usize, rate: f32, dt: f32) -> f32 {
    let h = (n - 2) as f32;
    dt * rate * h * h
}

/// Diffuses `x0` into `x` with a fixed number of relaxation sweeps.
///
/// `x` is used as the initial guess, so its current contents matter. Boundary cells are not
/// written.
pub fn diffuse(x: &mut Array2<f32>, x0: &Array2<f32>, rate: f32, dt: f32, iterations: usize) {
    let a = coefficient(x.nrows(), rate, dt);
    lin_solve(x, Some(x0), a, 1.0 + 4.0 * a, iterations);
}

/// Diffuses `x` into itself.
pub fn diffuse_in_place(x: &mut Array2<f32>, rate: f32, dt: f32, iterations: usize) {
    let a = coefficient(x.nrows(), rate, dt);
    lin_solve(x, None, a, 1.0 + 4.0 * a, iterations);
}
