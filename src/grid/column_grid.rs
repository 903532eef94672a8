//! Uniform 1D depth grid.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Slack added to `zm / dz` before flooring, so that ratios which are whole
/// numbers in exact arithmetic (0.3 / 0.1) keep their last cell.
const CELL_COUNT_SLACK: f64 = 1e-9;

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 10_000_000;

/// Discretized depth axis of a water column.
///
/// Immutable once built. Changing `dz` means building a new grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridDef", into = "GridDef")]
pub struct Grid {
    /// Column depth (m)
    zm: f64,
    /// Nominal cell spacing used by flux and light formulas (m)
    dz: f64,
    /// Depth samples, `n_cells` points over `[0, zm]`
    z: Vec<f64>,
}

impl Grid {
    /// Build a grid over `[0, zm]` with nominal spacing `dz`.
    ///
    /// # Errors
    /// [`ConfigurationError`] if `dz` or `zm` is not finite and positive, or if
    /// fewer than two or more than [`MAX_CELLS`] cells result.
    pub fn new(zm: f64, dz: f64) -> Result<Self, ConfigurationError> {
        if !dz.is_finite() || dz <= 0.0 {
            return Err(ConfigurationError::InvalidSpacing(dz));
        }
        if !zm.is_finite() || zm <= 0.0 {
            return Err(ConfigurationError::InvalidDepth(zm));
        }

        let ratio = (zm / dz + CELL_COUNT_SLACK).floor();
        if !ratio.is_finite() || ratio > MAX_CELLS as f64 {
            return Err(ConfigurationError::TooManyCells {
                zm,
                dz,
                max: MAX_CELLS,
            });
        }
        let n = ratio as usize;
        if n < 2 {
            return Err(ConfigurationError::TooFewCells { zm, dz, n });
        }

        let step = zm / (n - 1) as f64;
        let mut z: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        // Pin the last sample so the axis ends exactly at zm.
        z[n - 1] = zm;

        Ok(Self { zm, dz, z })
    }

    /// Number of cells `n`.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.z.len()
    }

    /// Number of faces `n + 1`.
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.z.len() + 1
    }

    /// Column depth `zm`.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.zm
    }

    /// Nominal cell spacing `dz`.
    #[inline]
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Actual spacing between consecutive depth samples, `zm / (n - 1)`.
    #[inline]
    pub fn axis_spacing(&self) -> f64 {
        self.zm / (self.n_cells() - 1) as f64
    }

    /// Depth samples, surface first.
    #[inline]
    pub fn depths(&self) -> &[f64] {
        &self.z
    }

    /// Index of the depth sample closest to `depth`.
    pub fn nearest_cell(&self, depth: f64) -> usize {
        let i = (depth / self.axis_spacing()).round();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(self.n_cells() - 1)
        }
    }

    /// Evaluate `f(z)` at every depth sample.
    pub fn profile_from_fn<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.z.iter().map(|&z| f(z)).collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid(zm = {} m, dz = {} m, {} cells)",
            self.zm,
            self.dz,
            self.n_cells()
        )
    }
}

/// Serialized form of a grid: only the two defining values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct GridDef {
    zm: f64,
    dz: f64,
}

impl TryFrom<GridDef> for Grid {
    type Error = ConfigurationError;

    fn try_from(def: GridDef) -> Result<Self, Self::Error> {
        Grid::new(def.zm, def.dz)
    }
}

impl From<Grid> for GridDef {
    fn from(grid: Grid) -> Self {
        Self {
            zm: grid.zm,
            dz: grid.dz,
        }
    }
}
