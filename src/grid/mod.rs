//! Vertical grid for the water column.
//!
//! The column spans depths `[0, zm]` (positive downward, surface at 0) and is
//! split into `n = floor(zm / dz)` cells. Cell `0` is at the surface and cell
//! `n - 1` at the bottom.
//!
//! # Depth axis versus nominal spacing
//!
//! The depth samples `z` are `n` evenly spaced points over the closed interval
//! `[0, zm]`, so neighbouring samples are `zm / (n - 1)` apart. The flux and
//! light formulas use the nominal spacing `dz`. Both are exposed:
//!
//! ```
//! use pnd_column::grid::Grid;
//!
//! let grid = Grid::new(300.0, 1.0).unwrap();
//! assert_eq!(grid.n_cells(), 300);
//! assert_eq!(grid.dz(), 1.0);
//! assert!((grid.axis_spacing() - 300.0 / 299.0).abs() < 1e-12);
//! assert_eq!(grid.depths()[299], 300.0);
//! ```

mod column_grid;

pub use column_grid::{Grid, MAX_CELLS};
