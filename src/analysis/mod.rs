//! Diagnostics for column profiles and time series.
//!
//! - [`interpolate_profile`], [`max_abs_difference`]: compare profiles computed
//!   on different grids
//! - [`depth_average`], [`chlorophyll_maximum`]: vertical summaries
//! - [`peak_times`], [`mean_peak_spacing`], [`dominant_period`]: periodicity of
//!   a series under seasonal forcing
//!
//! # Example
//!
//! ```
//! use pnd_column::analysis::dominant_period;
//!
//! let times: Vec<f64> = (0..200).map(|i| i as f64).collect();
//! let values: Vec<f64> = times
//!     .iter()
//!     .map(|t| (2.0 * std::f64::consts::PI * t / 50.0).cos())
//!     .collect();
//!
//! let fit = dominant_period(&times, &values, &[25.0, 50.0, 100.0]).unwrap();
//! assert_eq!(fit.period, 50.0);
//! ```

mod periodicity;
mod profile;

pub use periodicity::{PeriodFit, dominant_period, mean_peak_spacing, peak_times};
pub use profile::{
    ProfileMaximum, chlorophyll_maximum, depth_average, interpolate_profile, max_abs_difference,
};
