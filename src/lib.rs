//! # pnd-column
//!
//! A one-dimensional phytoplankton-nutrient-detritus (P-N-D) model of a
//! vertical water column, discretized by the method of lines.
//!
//! The column is split into `n` cells of nominal thickness `dz`. Each cell
//! carries three concentrations; their time derivatives combine local
//! biology with vertical transport:
//!
//! ```text
//! dP/dt = μmax σL σN P - ε P - γ P²        - ∂J_P/∂z
//! dN/dt = -μmax σL σN P            + τ D   - ∂J_N/∂z
//! dD/dt = ε P                      - τ D   - ∂J_D/∂z
//! ```
//!
//! This crate provides:
//! - The depth grid ([`grid`]) and state layout ([`state`])
//! - Light, growth limitation and reaction terms ([`source`])
//! - Face fluxes and their divergence ([`flux`])
//! - The assembled right-hand side ([`solver`])
//! - Adaptive and fixed-step integrators ([`time`])
//! - A simulation runner ([`simulation`]) driven by serde configuration ([`config`])
//! - Profile and periodicity diagnostics ([`analysis`])
//!
//! # Example
//!
//! ```
//! use pnd_column::{ColumnState, Grid, Parameters, Tracer, run_column};
//!
//! let grid = Grid::new(100.0, 2.0).unwrap();
//! let initial = ColumnState::from_fn(&grid, |z| (0.1, 30.0 * z / 100.0, 0.0));
//!
//! let trajectory = run_column(&initial, &[0.0, 5.0, 10.0], &Parameters::default(), &grid).unwrap();
//! assert_eq!(trajectory.shape(), (3, 150));
//! assert!(trajectory.profile(2, Tracer::Phytoplankton).iter().all(|p| p.is_finite()));
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod flux;
pub mod grid;
pub mod simulation;
pub mod solver;
pub mod source;
pub mod state;
pub mod time;

// Re-export main types for convenience
pub use config::{Parameters, ScenarioConfig};
pub use error::{ColumnError, ConfigurationError, IntegrationError, Result};
pub use flux::{BottomClosure, FaceFluxes, FluxAssembler, compute_face_fluxes, flux_divergence};
pub use grid::Grid;
pub use simulation::{RunStatistics, Simulation, SimulationResult, run_column, run_scenario};
pub use solver::{ColumnModel, compute_rhs};
pub use source::{
    IncidentLight, Reactions, light_intensity, light_limitation, nutrient_limitation,
};
pub use state::{ColumnState, Tracer};
pub use time::{SolverOptions, StandardIntegrator, Trajectory};
