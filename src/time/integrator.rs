//! Trait-based time integrator abstraction.
//!
//! Integrators see the model only through [`OdeSystem`], a pure
//! `dy/dt = f(t, y)` on flat slices. They advance an initial state through an
//! increasing sequence of output times and return the state at each of them.
//!
//! - [`OdeSystem`]: the right-hand side
//! - [`Integrable`]: vector-space operations for the stage-based steppers
//! - [`TimeIntegrator`]: integrate a system through output times
//! - [`StandardIntegrator`]: runtime selection between the built-in integrators
//!
//! # Example
//! ```
//! use pnd_column::time::{OdeSystem, SolverOptions, StandardIntegrator, TimeIntegrator};
//!
//! // dy/dt = -y
//! struct Decay;
//! impl OdeSystem for Decay {
//!     fn ndim(&self) -> usize { 1 }
//!     fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) { dydt[0] = -y[0]; }
//! }
//!
//! let solution = StandardIntegrator::Rk45
//!     .integrate(&Decay, &[1.0], &[0.0, 1.0], &SolverOptions::default())
//!     .unwrap();
//! assert!((solution.row(1)[0] - (-1.0f64).exp()).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::state::ColumnState;

use super::dopri::Rk45;
use super::options::SolverOptions;
use super::ssp_rk3::SspRk3;

// =============================================================================
// OdeSystem Trait
// =============================================================================

/// Right-hand side of an ODE system `dy/dt = f(t, y)`.
pub trait OdeSystem {
    /// Number of state variables.
    fn ndim(&self) -> usize;

    /// Evaluate `f(t, y)` and write into `dydt`.
    ///
    /// `y` and `dydt` have length `ndim()`.
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]);
}

// =============================================================================
// Integrable Trait
// =============================================================================

/// Solution types that can be advanced by the stage-based steppers.
///
/// - `scale`: x <- c * x
/// - `axpy`: x <- x + c * y
pub trait Integrable: Clone + Send + Sized {
    /// Scale the solution by a constant: self <- c * self
    fn scale(&mut self, c: f64);

    /// Add a scaled vector: self <- self + c * other
    fn axpy(&mut self, c: f64, other: &Self);
}

impl Integrable for Vec<f64> {
    fn scale(&mut self, c: f64) {
        for v in self.iter_mut() {
            *v *= c;
        }
    }

    fn axpy(&mut self, c: f64, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.iter_mut().zip(other) {
            *a += c * *b;
        }
    }
}

impl Integrable for ColumnState {
    fn scale(&mut self, c: f64) {
        self.scale(c);
    }

    fn axpy(&mut self, c: f64, other: &Self) {
        self.axpy(c, other);
    }
}

// =============================================================================
// Solution and statistics
// =============================================================================

/// Step counters collected during one integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepStatistics {
    /// Number of RHS evaluations
    pub rhs_evaluations: usize,
    /// Accepted steps
    pub accepted_steps: usize,
    /// Rejected steps (always zero for fixed-step integrators)
    pub rejected_steps: usize,
    /// Smallest accepted step
    pub min_step: f64,
    /// Largest accepted step
    pub max_step: f64,
}

impl Default for StepStatistics {
    fn default() -> Self {
        Self {
            rhs_evaluations: 0,
            accepted_steps: 0,
            rejected_steps: 0,
            min_step: f64::INFINITY,
            max_step: 0.0,
        }
    }
}

impl StepStatistics {
    #[inline]
    pub(crate) fn accept(&mut self, h: f64) {
        self.accepted_steps += 1;
        self.min_step = self.min_step.min(h);
        self.max_step = self.max_step.max(h);
    }

    /// Attempted steps, accepted or not.
    #[inline]
    pub fn attempted_steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// States at the requested output times.
#[derive(Clone, Debug, PartialEq)]
pub struct OdeSolution {
    /// Output times
    pub times: Vec<f64>,
    /// States, row-major: `data[j * ndim + k]` is component `k` at `times[j]`
    pub data: Vec<f64>,
    /// Length of one state
    pub ndim: usize,
    pub stats: StepStatistics,
}

impl OdeSolution {
    pub(crate) fn with_capacity(times: &[f64], ndim: usize) -> Self {
        Self {
            times: times.to_vec(),
            data: Vec::with_capacity(times.len() * ndim),
            ndim,
            stats: StepStatistics::default(),
        }
    }

    /// State at output `j`.
    #[inline]
    pub fn row(&self, j: usize) -> &[f64] {
        &self.data[j * self.ndim..(j + 1) * self.ndim]
    }

    /// Number of stored rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        if self.ndim == 0 { 0 } else { self.data.len() / self.ndim }
    }
}

// =============================================================================
// IntegratorInfo and TimeIntegrator Traits
// =============================================================================

/// Non-generic information about a time integrator.
pub trait IntegratorInfo: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Order of accuracy of the propagated solution.
    fn order(&self) -> usize;

    /// Whether the step size is chosen by error control.
    fn is_adaptive(&self) -> bool;
}

/// Integrate an [`OdeSystem`] through a sequence of output times.
///
/// The first output time is the initial time: row 0 of the result is `y0`.
/// Every later row is the state exactly at the requested time.
pub trait TimeIntegrator: IntegratorInfo {
    /// # Errors
    /// - [`ConfigurationError`] if `y0` does not match `sys.ndim()` or the
    ///   output times are empty, non-finite or not strictly increasing, and
    ///   for a fixed-step integrator whose step is not finite and positive.
    /// - [`crate::error::IntegrationError`] if the integration cannot reach
    ///   the last output time.
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        sys: &S,
        y0: &[f64],
        times: &[f64],
        opts: &SolverOptions,
    ) -> Result<OdeSolution>;
}

/// Check the initial state length and the output times.
pub(crate) fn check_inputs<S: OdeSystem + ?Sized>(
    sys: &S,
    y0: &[f64],
    times: &[f64],
) -> std::result::Result<(), ConfigurationError> {
    let ndim = sys.ndim();
    if y0.len() != ndim {
        return Err(ConfigurationError::StateLength {
            actual: y0.len(),
            n_cells: ndim / 3,
        });
    }
    validate_output_times(times)
}

/// Output times must be non-empty, finite and strictly increasing.
pub fn validate_output_times(times: &[f64]) -> std::result::Result<(), ConfigurationError> {
    if times.is_empty() {
        return Err(ConfigurationError::OutputTimes("no output times"));
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(ConfigurationError::OutputTimes("output times must be finite"));
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ConfigurationError::OutputTimes(
            "output times must be strictly increasing",
        ));
    }
    Ok(())
}

// =============================================================================
// Standard Integrator Enum
// =============================================================================

/// Built-in integrators, selectable at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardIntegrator {
    /// Adaptive Dormand-Prince 4(5)
    #[default]
    Rk45,
    /// Fixed-step SSP-RK3 with nominal step `dt`
    SspRk3 { dt: f64 },
}

impl IntegratorInfo for StandardIntegrator {
    fn name(&self) -> &'static str {
        match self {
            StandardIntegrator::Rk45 => Rk45.name(),
            StandardIntegrator::SspRk3 { dt } => SspRk3::new(*dt).name(),
        }
    }

    fn order(&self) -> usize {
        match self {
            StandardIntegrator::Rk45 => Rk45.order(),
            StandardIntegrator::SspRk3 { dt } => SspRk3::new(*dt).order(),
        }
    }

    fn is_adaptive(&self) -> bool {
        matches!(self, StandardIntegrator::Rk45)
    }
}

impl TimeIntegrator for StandardIntegrator {
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        sys: &S,
        y0: &[f64],
        times: &[f64],
        opts: &SolverOptions,
    ) -> Result<OdeSolution> {
        match self {
            StandardIntegrator::Rk45 => Rk45.integrate(sys, y0, times, opts),
            StandardIntegrator::SspRk3 { dt } => SspRk3::new(*dt).integrate(sys, y0, times, opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColumnError;

    struct Growth;

    impl OdeSystem for Growth {
        fn ndim(&self) -> usize {
            2
        }

        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
            dydt[0] = y[0];
            dydt[1] = -2.0 * y[1];
        }
    }

    #[test]
    fn test_output_time_validation() {
        assert!(validate_output_times(&[0.0]).is_ok());
        assert!(validate_output_times(&[0.0, 1.0, 2.5]).is_ok());
        assert!(validate_output_times(&[]).is_err());
        assert!(validate_output_times(&[0.0, 0.0]).is_err());
        assert!(validate_output_times(&[1.0, 0.5]).is_err());
        assert!(validate_output_times(&[0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_dispatch_agrees() {
        let times = [0.0, 0.5, 1.0];
        let opts = SolverOptions::default().with_tolerances(1e-10, 1e-12);
        let adaptive = StandardIntegrator::Rk45
            .integrate(&Growth, &[1.0, 1.0], &times, &opts)
            .unwrap();
        let fixed = StandardIntegrator::SspRk3 { dt: 1e-3 }
            .integrate(&Growth, &[1.0, 1.0], &times, &opts)
            .unwrap();

        assert_eq!(adaptive.n_rows(), 3);
        assert_eq!(fixed.n_rows(), 3);
        for j in 0..3 {
            let t = times[j];
            for (a, b) in adaptive.row(j).iter().zip(fixed.row(j)) {
                assert!((a - b).abs() < 1e-6, "t = {t}: {a} vs {b}");
            }
            assert!((adaptive.row(j)[0] - t.exp()).abs() < 1e-8);
            assert!((adaptive.row(j)[1] - (-2.0 * t).exp()).abs() < 1e-8);
        }
    }

    #[test]
    fn test_wrong_initial_length() {
        let result =
            StandardIntegrator::Rk45.integrate(&Growth, &[1.0], &[0.0, 1.0], &SolverOptions::default());
        assert!(matches!(
            result,
            Err(ColumnError::Configuration(ConfigurationError::StateLength { .. }))
        ));
    }

    #[test]
    fn test_integrator_info() {
        assert_eq!(StandardIntegrator::Rk45.name(), "dopri5");
        assert_eq!(StandardIntegrator::Rk45.order(), 5);
        assert!(StandardIntegrator::Rk45.is_adaptive());

        let fixed = StandardIntegrator::SspRk3 { dt: 0.1 };
        assert_eq!(fixed.name(), "ssp-rk3");
        assert_eq!(fixed.order(), 3);
        assert!(!fixed.is_adaptive());
    }

    #[test]
    fn test_vec_integrable() {
        let mut u = vec![1.0, 2.0];
        let v = u.clone();
        u.scale(2.0);
        u.axpy(0.5, &v);
        assert_eq!(u, vec![2.5, 5.0]);
    }
}
