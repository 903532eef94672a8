//! Storage for the P, N, D profiles.

use crate::error::ConfigurationError;
use crate::grid::Grid;

/// One of the three tracers carried by the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tracer {
    Phytoplankton,
    Nutrient,
    Detritus,
}

impl Tracer {
    /// All tracers in state-vector order.
    pub const ALL: [Tracer; 3] = [Tracer::Phytoplankton, Tracer::Nutrient, Tracer::Detritus];

    /// Position of the tracer block in the state vector.
    #[inline]
    pub fn block(self) -> usize {
        match self {
            Tracer::Phytoplankton => 0,
            Tracer::Nutrient => 1,
            Tracer::Detritus => 2,
        }
    }

    /// Short name.
    pub fn name(self) -> &'static str {
        match self {
            Tracer::Phytoplankton => "P",
            Tracer::Nutrient => "N",
            Tracer::Detritus => "D",
        }
    }
}

/// P, N, D profiles stored contiguously as `[P | N | D]`.
///
/// Concentrations may become negative during integration; nothing here
/// clamps them. Use [`ColumnState::min_value`] to detect it.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnState {
    /// Values, stored as data[block * n_cells + i]
    pub data: Vec<f64>,
    /// Number of grid cells
    pub n_cells: usize,
}

impl ColumnState {
    /// Zero state for `n_cells` cells.
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            data: vec![0.0; 3 * n_cells],
            n_cells,
        }
    }

    /// Wrap an existing flat vector.
    ///
    /// # Errors
    /// [`ConfigurationError::StateLength`] unless `data.len() == 3 * grid.n_cells()`.
    pub fn from_vec(data: Vec<f64>, grid: &Grid) -> Result<Self, ConfigurationError> {
        let n_cells = grid.n_cells();
        if data.len() != 3 * n_cells {
            return Err(ConfigurationError::StateLength {
                actual: data.len(),
                n_cells,
            });
        }
        Ok(Self { data, n_cells })
    }

    /// Concatenate three profiles.
    ///
    /// # Errors
    /// [`ConfigurationError::ProfileLength`] if a profile does not match the grid.
    pub fn from_profiles(
        p: &[f64],
        n: &[f64],
        d: &[f64],
        grid: &Grid,
    ) -> Result<Self, ConfigurationError> {
        let n_cells = grid.n_cells();
        for (tracer, profile) in Tracer::ALL.iter().zip([p, n, d]) {
            if profile.len() != n_cells {
                return Err(ConfigurationError::ProfileLength {
                    tracer: tracer.name(),
                    actual: profile.len(),
                    n_cells,
                });
            }
        }

        let mut data = Vec::with_capacity(3 * n_cells);
        data.extend_from_slice(p);
        data.extend_from_slice(n);
        data.extend_from_slice(d);
        Ok(Self { data, n_cells })
    }

    /// Build from a function of depth returning `(P, N, D)`.
    pub fn from_fn<F>(grid: &Grid, f: F) -> Self
    where
        F: Fn(f64) -> (f64, f64, f64),
    {
        let n_cells = grid.n_cells();
        let mut state = Self::zeros(n_cells);
        for (i, &z) in grid.depths().iter().enumerate() {
            let (p, n, d) = f(z);
            state.data[i] = p;
            state.data[n_cells + i] = n;
            state.data[2 * n_cells + i] = d;
        }
        state
    }

    /// Length of the flat vector, `3n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Profile of one tracer.
    #[inline]
    pub fn tracer(&self, tracer: Tracer) -> &[f64] {
        let start = tracer.block() * self.n_cells;
        &self.data[start..start + self.n_cells]
    }

    /// Mutable profile of one tracer.
    #[inline]
    pub fn tracer_mut(&mut self, tracer: Tracer) -> &mut [f64] {
        let start = tracer.block() * self.n_cells;
        &mut self.data[start..start + self.n_cells]
    }

    #[inline]
    pub fn phytoplankton(&self) -> &[f64] {
        self.tracer(Tracer::Phytoplankton)
    }

    #[inline]
    pub fn nutrient(&self) -> &[f64] {
        self.tracer(Tracer::Nutrient)
    }

    #[inline]
    pub fn detritus(&self) -> &[f64] {
        self.tracer(Tracer::Detritus)
    }

    /// Split into `(P, N, D)` views.
    #[inline]
    pub fn split(&self) -> (&[f64], &[f64], &[f64]) {
        split_blocks(&self.data, self.n_cells)
    }

    /// Depth integral of one tracer using the nominal spacing, `Σ X_i dz`.
    pub fn inventory(&self, tracer: Tracer, grid: &Grid) -> f64 {
        self.tracer(tracer).iter().sum::<f64>() * grid.dz()
    }

    /// Depth-integrated nitrogen in all three pools.
    pub fn total_nitrogen(&self, grid: &Grid) -> f64 {
        self.data.iter().sum::<f64>() * grid.dz()
    }

    /// Smallest value across all tracers.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &ColumnState) {
        assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Get maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }
}

/// Split a flat `[P | N | D]` slice into its three blocks.
#[inline]
pub(crate) fn split_blocks(data: &[f64], n_cells: usize) -> (&[f64], &[f64], &[f64]) {
    let (p, rest) = data.split_at(n_cells);
    let (n, d) = rest.split_at(n_cells);
    (p, n, &d[..n_cells])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10.0, 1.0).unwrap()
    }

    #[test]
    fn test_layout() {
        let grid = grid();
        let state = ColumnState::from_fn(&grid, |z| (1.0, 2.0 * z, 3.0));
        assert_eq!(state.len(), 30);
        assert_eq!(state.data[0], 1.0);
        assert_eq!(state.data[10], 0.0);
        assert_eq!(state.data[19], 20.0);
        assert_eq!(state.data[20], 3.0);

        let (p, n, d) = state.split();
        assert_eq!(p, state.phytoplankton());
        assert_eq!(n, state.nutrient());
        assert_eq!(d, state.detritus());
    }

    #[test]
    fn test_from_profiles() {
        let grid = grid();
        let p = vec![0.1; 10];
        let n = vec![5.0; 10];
        let d = vec![0.0; 10];
        let state = ColumnState::from_profiles(&p, &n, &d, &grid).unwrap();
        assert_eq!(state.nutrient(), &n[..]);

        let short = vec![0.0; 9];
        assert_eq!(
            ColumnState::from_profiles(&p, &short, &d, &grid),
            Err(ConfigurationError::ProfileLength {
                tracer: "N",
                actual: 9,
                n_cells: 10,
            })
        );
    }

    #[test]
    fn test_from_vec_checks_length() {
        let grid = grid();
        assert!(ColumnState::from_vec(vec![0.0; 30], &grid).is_ok());
        assert_eq!(
            ColumnState::from_vec(vec![0.0; 29], &grid),
            Err(ConfigurationError::StateLength {
                actual: 29,
                n_cells: 10,
            })
        );
    }

    #[test]
    fn test_inventory() {
        let grid = Grid::new(10.0, 0.5).unwrap();
        let state = ColumnState::from_fn(&grid, |_| (0.1, 2.0, 0.4));
        assert!((state.inventory(Tracer::Phytoplankton, &grid) - 0.1 * 20.0 * 0.5).abs() < 1e-12);
        assert!((state.total_nitrogen(&grid) - 2.5 * 20.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_min_and_finite() {
        let mut state = ColumnState::zeros(3);
        state.tracer_mut(Tracer::Detritus)[2] = -1e-3;
        assert_eq!(state.min_value(), -1e-3);
        assert!(state.is_finite());
        state.data[0] = f64::NAN;
        assert!(!state.is_finite());
    }

    #[test]
    fn test_axpy_scale() {
        let mut a = ColumnState::zeros(2);
        let mut b = ColumnState::zeros(2);
        for v in &mut b.data {
            *v = 1.0;
        }
        a.axpy(2.0, &b);
        a.scale(0.5);
        assert!(a.data.iter().all(|&v| (v - 1.0).abs() < 1e-15));
        assert_eq!(a.max_abs(), 1.0);
    }
}
