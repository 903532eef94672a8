//! Error types for column construction and time integration.
//!
//! Two failure classes exist:
//! - [`ConfigurationError`]: invalid grid, parameters, initial state or output
//!   times, detected before any RHS evaluation.
//! - [`IntegrationError`]: the integrator could not advance the solution to the
//!   requested output times.
//!
//! Both convert into [`ColumnError`], which is what fallible public functions
//! return.

use thiserror::Error;

/// Invalid configuration detected at construction time.
///
/// Values are never clamped: a bad value is reported, not repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Cell spacing must be finite and positive.
    #[error("cell spacing dz must be finite and > 0, got {0}")]
    InvalidSpacing(f64),

    /// Column depth must be finite and positive.
    #[error("column depth zm must be finite and > 0, got {0}")]
    InvalidDepth(f64),

    /// The grid would contain fewer than two cells.
    #[error("grid needs at least 2 cells, zm = {zm} and dz = {dz} give {n}")]
    TooFewCells { zm: f64, dz: f64, n: usize },

    /// The grid would exceed the supported number of cells.
    #[error("zm = {zm} and dz = {dz} give more than {max} cells")]
    TooManyCells { zm: f64, dz: f64, max: usize },

    /// A parameter is out of its admissible range.
    #[error("parameter `{name}` = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A state vector does not match the grid layout.
    #[error("state length {actual} does not match 3 x {n_cells} cells")]
    StateLength { actual: usize, n_cells: usize },

    /// A single tracer profile does not match the grid.
    #[error("{tracer} profile has length {actual}, grid has {n_cells} cells")]
    ProfileLength {
        tracer: &'static str,
        actual: usize,
        n_cells: usize,
    },

    /// Output times must be a non-empty, finite, strictly increasing sequence.
    #[error("output times invalid: {0}")]
    OutputTimes(&'static str),

    /// Solver options are out of range.
    #[error("solver option `{name}` = {value} is invalid")]
    SolverOption { name: &'static str, value: f64 },
}

/// Failure reported by a time integrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// Step size fell below the configured minimum while trying to meet tolerance.
    #[error("step size {step:.3e} fell below minimum at t = {time:.6e}")]
    StepSizeUnderflow { time: f64, step: f64 },

    /// Step budget exhausted before reaching the target time.
    #[error("exceeded max_steps = {max_steps} at t = {time:.6e} before reaching t = {target:.6e}")]
    MaxStepsExceeded {
        max_steps: usize,
        time: f64,
        target: f64,
    },

    /// The state or its derivative became NaN or infinite.
    #[error("non-finite state encountered at t = {time:.6e}")]
    NonFinite { time: f64 },
}

/// Top-level error for column simulations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColumnError>;
