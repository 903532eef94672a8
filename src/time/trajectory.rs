//! Column states at the output times of a run.

use crate::state::{ColumnState, Tracer};

use super::integrator::OdeSolution;

/// States at the requested output times, shape `(len(times), 3n)`.
///
/// Row `j` is the state at `times[j]`, laid out as `[P | N | D]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    data: Vec<f64>,
    n_cells: usize,
}

impl Trajectory {
    /// Wrap an integrator solution of a column with `n_cells` cells.
    pub fn from_solution(solution: OdeSolution, n_cells: usize) -> Self {
        debug_assert_eq!(solution.ndim, 3 * n_cells);
        Self {
            times: solution.times,
            data: solution.data,
            n_cells,
        }
    }

    /// `(number of output times, 3n)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.times.len(), 3 * self.n_cells)
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Flat state at output `j`.
    #[inline]
    pub fn row(&self, j: usize) -> &[f64] {
        let width = 3 * self.n_cells;
        &self.data[j * width..(j + 1) * width]
    }

    /// Profile of one tracer at output `j`.
    #[inline]
    pub fn profile(&self, j: usize, tracer: Tracer) -> &[f64] {
        let start = tracer.block() * self.n_cells;
        &self.row(j)[start..start + self.n_cells]
    }

    /// State at output `j` as an owned [`ColumnState`].
    pub fn state(&self, j: usize) -> ColumnState {
        ColumnState {
            data: self.row(j).to_vec(),
            n_cells: self.n_cells,
        }
    }

    /// State at the last output time.
    pub fn final_state(&self) -> Option<ColumnState> {
        self.len().checked_sub(1).map(|j| self.state(j))
    }

    /// Value of one tracer in one cell over all output times.
    pub fn time_series(&self, tracer: Tracer, cell: usize) -> Vec<f64> {
        (0..self.len())
            .map(|j| self.profile(j, tracer)[cell])
            .collect()
    }

    /// Mean of one tracer over the column at every output time.
    pub fn depth_mean_series(&self, tracer: Tracer) -> Vec<f64> {
        (0..self.len())
            .map(|j| self.profile(j, tracer).iter().sum::<f64>() / self.n_cells as f64)
            .collect()
    }

    /// Iterate over `(time, row)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.times
            .iter()
            .copied()
            .zip(self.data.chunks_exact(3 * self.n_cells))
    }
}
