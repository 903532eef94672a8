//! Simulation runner.
//!
//! Ties together:
//! - the column model (grid, parameters, RHS)
//! - a time integrator selected through [`crate::time::SolverOptions`]
//! - logging of run progress and run statistics
//!
//! # Example
//! ```
//! use pnd_column::config::ScenarioConfig;
//! use pnd_column::simulation::run_scenario;
//!
//! let scenario = ScenarioConfig::default()
//!     .with_grid(50.0, 1.0)
//!     .with_output_times(0.0, 5.0, 6);
//! let result = run_scenario(&scenario).unwrap();
//! assert_eq!(result.trajectory.shape(), (6, 150));
//! ```

mod runner;

pub use runner::{RunStatistics, Simulation, SimulationResult, run_column, run_scenario};
