use glam::Vec2;
use ndarray::Array2;

/// Semi-Lagrangian advection: traces each interior cell backwards through `(u, v)` and
/// bilinearly samples `d0` at the departure point.
///
/// The departure point is clamped to `[0.5, N - 1.5]` on both axes, so the four-cell stencil
/// always stays inside the grid and every result is a convex combination of values in `d0`.
/// Boundary cells of `d` are not written.
pub fn advect(d: &mut Array2<f32>, d0: &Array2<f32>, u: &Array2<f32>, v: &Array2<f32>, dt: f32) {
    let (nx, ny) = d.dim();
    let min = Vec2::splat(0.5);
    let max = Vec2::new(nx as f32 - 1.5, ny as f32 - 1.5);

    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let vel = Vec2::new(u[(i, j)], v[(i, j)]);
            let p = (Vec2::new(i as f32, j as f32) - dt * vel).clamp(min, max);

            let p0 = p.floor();
            let st1 = p - p0;
            let st0 = 1.0 - st1;

            let p0 = p0.as_uvec2();
            let (i0, j0) = (p0.x as usize, p0.y as usize);
            let (i1, j1) = (i0 + 1, j0 + 1);

            d[(i, j)] = st0.x * (st0.y * d0[(i0, j0)] + st1.y * d0[(i0, j1)])
                + st1.x * (st0.y * d0[(i1, j0)] + st1.y * d0[(i1, j1)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    const N: usize = 16;

    #[test]
    fn test_advect_zero_velocity_preserves() {
        let d0 = Array2::from_shape_fn((N, N), |(i, _)| i as f32 / N as f32);
        let mut d = Array2::zeros((N, N));
        let vx = Array2::zeros((N, N));
        let vy = Array2::zeros((N, N));

        advect(&mut d, &d0, &vx, &vy, 0.1);

        for i in 1..N - 1 {
            for j in 1..N - 1 {
                let orig = d0[(i, j)];
                let advected = d[(i, j)];
                assert!(
                    (orig - advected).abs() < 1e-6,
                    "Zero velocity should preserve field at ({}, {}): {} vs {}",
                    i, j, orig, advected
                );
            }
        }
    }

    #[test]
    fn test_advect_uniform_field_unchanged() {
        let d0 = Array2::from_elem((N, N), 5.0);
        let mut d = Array2::zeros((N, N));
        let vx = Array2::from_elem((N, N), 0.7);
        let vy = Array2::from_elem((N, N), -0.3);

        advect(&mut d, &d0, &vx, &vy, 0.1);

        for i in 1..N - 1 {
            for j in 1..N - 1 {
                let val = d[(i, j)];
                assert!(
                    (val - 5.0).abs() < 1e-5,
                    "Uniform field should stay uniform: got {} at ({}, {})",
                    val, i, j
                );
            }
        }
    }

    #[test]
    fn test_advect_shifts_by_whole_cell() {
        // Unit velocity with dt = 1 moves the field exactly one cell along +x.
        let d0 = Array2::from_shape_fn((N, N), |(i, j)| (i * 3 + j) as f32);
        let mut d = Array2::zeros((N, N));
        let vx = Array2::from_elem((N, N), 1.0);
        let vy = Array2::zeros((N, N));

        advect(&mut d, &d0, &vx, &vy, 1.0);

        for i in 2..N - 1 {
            for j in 1..N - 1 {
                assert!((d[(i, j)] - d0[(i - 1, j)]).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_advect_half_cell_averages() {
        let mut d0 = Array2::zeros((N, N));
        d0[(4, 4)] = 2.0;
        let mut d = Array2::zeros((N, N));
        let vx = Array2::from_elem((N, N), 0.5);
        let vy = Array2::zeros((N, N));

        advect(&mut d, &d0, &vx, &vy, 1.0);

        assert!((d[(4, 4)] - 1.0).abs() < 1e-6);
        assert!((d[(5, 4)] - 1.0).abs() < 1e-6);
        assert_eq!(d[(6, 4)], 0.0);
    }

    #[test]
    fn test_advect_bounded_for_huge_dt() {
        let mut rng = StdRng::seed_from_u64(5);
        let d0 = Array2::from_shape_fn((N, N), |_| rng.gen_range(-2.0..3.0));
        let vx = Array2::from_shape_fn((N, N), |_| rng.gen_range(-50.0..50.0));
        let vy = Array2::from_shape_fn((N, N), |_| rng.gen_range(-50.0..50.0));
        let mut d = Array2::zeros((N, N));

        advect(&mut d, &d0, &vx, &vy, 1.0e3);

        for i in 1..N - 1 {
            for j in 1..N - 1 {
                let val = d[(i, j)];
                assert!(val >= -2.0 - 1e-5 && val <= 3.0 + 1e-5, "Advected value out of range at ({i}, {j}): {val}");
            }
        }
    }

    #[test]
    fn test_advect_skips_boundary() {
        let d0 = Array2::from_elem((N, N), 1.0);
        let mut d = Array2::from_elem((N, N), 9.0);
        let vx = Array2::from_elem((N, N), 3.0);
        let vy = Array2::from_elem((N, N), 3.0);

        advect(&mut d, &d0, &vx, &vy, 0.5);

        for k in 0..N {
            assert_eq!(d[(0, k)], 9.0);
            assert_eq!(d[(N - 1, k)], 9.0);
            assert_eq!(d[(k, 0)], 9.0);
            assert_eq!(d[(k, N - 1)], 9.0);
        }
        assert!((d[(5, 5)] - 1.0).abs() < 1e-6);
    }
}
