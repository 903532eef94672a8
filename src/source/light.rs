//! Depth-resolved light field with phytoplankton self-shading.
//!
//! Light decays with depth through background turbidity and through the
//! phytoplankton above (and including) each cell:
//!
//! ```text
//! I(z_i) = I_in · exp(-k · dz · Σ_{j ≤ i} P_j - Kbg · z_i)
//! ```
//!
//! The running sum starts at the surface (cell 0). Since it depends on the
//! evolving `P`, the light field is recomputed on every RHS evaluation.

use crate::grid::Grid;

/// Light intensity at every depth sample.
///
/// # Arguments
/// * `p` - Phytoplankton profile, surface first, one value per cell
/// * `i_in` - Incident surface light
/// * `k` - Self-shading coefficient
/// * `kbg` - Background turbidity
/// * `grid` - Depth grid (`p.len()` must equal `grid.n_cells()`)
///
/// ```
/// use pnd_column::grid::Grid;
/// use pnd_column::source::light_intensity;
///
/// let grid = Grid::new(100.0, 1.0).unwrap();
/// let p = vec![0.0; grid.n_cells()];
/// let light = light_intensity(&p, 200.0, 0.1, 0.0, &grid);
/// assert!(light.iter().all(|&i| (i - 200.0).abs() < 1e-12));
/// ```
pub fn light_intensity(p: &[f64], i_in: f64, k: f64, kbg: f64, grid: &Grid) -> Vec<f64> {
    let mut light = vec![0.0; p.len()];
    light_intensity_into(p, i_in, k, kbg, grid, &mut light);
    light
}

/// Allocation-free version of [`light_intensity`].
///
/// Writes into `out`, which must have the same length as `p`.
pub fn light_intensity_into(
    p: &[f64],
    i_in: f64,
    k: f64,
    kbg: f64,
    grid: &Grid,
    out: &mut [f64],
) {
    debug_assert_eq!(p.len(), grid.n_cells());
    debug_assert_eq!(out.len(), p.len());

    let dz = grid.dz();
    let mut cumulative = 0.0;
    for ((out_i, &p_i), &z_i) in out.iter_mut().zip(p).zip(grid.depths()) {
        cumulative += p_i;
        *out_i = i_in * (-k * cumulative * dz - kbg * z_i).exp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(300.0, 1.0).unwrap()
    }

    #[test]
    fn test_background_only() {
        let grid = grid();
        let p = vec![0.0; grid.n_cells()];
        let light = light_intensity(&p, 200.0, 6e-10, 0.045, &grid);

        assert_eq!(light[0], 200.0);
        for (i, &z) in grid.depths().iter().enumerate() {
            let expected = 200.0 * (-0.045 * z).exp();
            assert!((light[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_surface_limit() {
        // I(0) only sees the surface cell's own shading.
        let grid = grid();
        let p = vec![0.1; grid.n_cells()];
        let light = light_intensity(&p, 200.0, 0.5, 0.045, &grid);
        let expected = 200.0 * (-0.5 * 0.1 * 1.0_f64).exp();
        assert!((light[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_self_shading_uses_running_sum() {
        let grid = Grid::new(4.0, 1.0).unwrap();
        let p = [1.0, 2.0, 3.0, 4.0];
        let light = light_intensity(&p, 1.0, 0.1, 0.0, &grid);
        let sums: [f64; 4] = [1.0, 3.0, 6.0, 10.0];
        for (i, s) in sums.iter().enumerate() {
            assert!((light[i] - (-0.1 * s).exp()).abs() < 1e-14);
        }
    }

    #[test]
    fn test_monotone_non_increasing() {
        let grid = Grid::new(200.0, 2.0).unwrap();
        let p: Vec<f64> = (0..grid.n_cells())
            .map(|i| ((i as f64) * 0.37).sin().abs() * 3.0)
            .collect();
        for &(k, kbg) in &[(0.0, 0.0), (0.0, 0.05), (0.2, 0.0), (0.05, 0.04)] {
            let light = light_intensity(&p, 250.0, k, kbg, &grid);
            for w in light.windows(2) {
                assert!(w[1] <= w[0], "light increased with depth: {} -> {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn test_into_matches_allocating() {
        let grid = grid();
        let p = grid.profile_from_fn(|z| 0.1 + 0.001 * z);
        let a = light_intensity(&p, 180.0, 0.01, 0.04, &grid);
        let mut b = vec![0.0; p.len()];
        light_intensity_into(&p, 180.0, 0.01, 0.04, &grid, &mut b);
        assert_eq!(a, b);
    }
}
