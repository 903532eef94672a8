//! Simulation runner implementation.
//!
//! Provides a high-level interface for integrating a column from an initial
//! state through a sequence of output times.

use std::time::Instant;

use log::{info, warn};

use crate::config::{Parameters, ScenarioConfig};
use crate::error::{ConfigurationError, Result};
use crate::grid::Grid;
use crate::solver::ColumnModel;
use crate::state::ColumnState;
use crate::time::{
    IntegratorInfo, SolverOptions, StandardIntegrator, StepStatistics, TimeIntegrator, Trajectory,
};

// =============================================================================
// Run statistics
// =============================================================================

/// Cost and step-size record of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStatistics {
    /// Name of the integrator that produced the run
    pub integrator: &'static str,
    /// Number of RHS evaluations
    pub rhs_evaluations: usize,
    /// Accepted steps
    pub accepted_steps: usize,
    /// Rejected steps
    pub rejected_steps: usize,
    /// Smallest accepted step (days)
    pub min_step: f64,
    /// Largest accepted step (days)
    pub max_step: f64,
    /// Wall-clock time in seconds
    pub wall_time: f64,
}

impl RunStatistics {
    fn new(integrator: &'static str, steps: StepStatistics, wall_time: f64) -> Self {
        Self {
            integrator,
            rhs_evaluations: steps.rhs_evaluations,
            accepted_steps: steps.accepted_steps,
            rejected_steps: steps.rejected_steps,
            min_step: steps.min_step,
            max_step: steps.max_step,
            wall_time,
        }
    }
}

/// Trajectory plus statistics of one run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub trajectory: Trajectory,
    pub stats: RunStatistics,
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// High-level simulation runner.
///
/// Ties a [`ColumnModel`] to a time integrator.
///
/// # Example
/// ```
/// use pnd_column::config::Parameters;
/// use pnd_column::grid::Grid;
/// use pnd_column::simulation::Simulation;
/// use pnd_column::state::ColumnState;
///
/// let grid = Grid::new(60.0, 2.0).unwrap();
/// let initial = ColumnState::from_fn(&grid, |z| (0.1, 30.0 * z / 60.0, 0.0));
///
/// let result = Simulation::new(grid, Parameters::default())
///     .unwrap()
///     .with_tolerances(1e-5, 1e-8)
///     .run(&initial, &[0.0, 1.0, 2.0])
///     .unwrap();
/// assert_eq!(result.trajectory.shape(), (3, 90));
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    model: ColumnModel,
    options: SolverOptions,
}

impl Simulation {
    /// Create a simulation after validating the parameters.
    pub fn new(grid: Grid, params: Parameters) -> Result<Self> {
        Ok(Self::from_model(ColumnModel::new(grid, params)?))
    }

    /// Create a simulation for an existing model.
    pub fn from_model(model: ColumnModel) -> Self {
        Self {
            model,
            options: SolverOptions::default(),
        }
    }

    /// Replace all solver options.
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Select the integrator.
    pub fn with_integrator(mut self, method: StandardIntegrator) -> Self {
        self.options.method = method;
        self
    }

    /// Set relative and absolute tolerances.
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.options.rtol = rtol;
        self.options.atol = atol;
        self
    }

    /// Set the maximum number of attempted steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.options.max_steps = max_steps;
        self
    }

    #[inline]
    pub fn model(&self) -> &ColumnModel {
        &self.model
    }

    #[inline]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Integrate `initial` through `output_times`.
    ///
    /// `output_times[0]` is the time of `initial`, so row 0 of the trajectory
    /// is `initial` itself.
    ///
    /// # Errors
    /// - [`ConfigurationError`] for invalid solver options, an initial state
    ///   that does not match the grid, or invalid output times.
    /// - [`crate::error::IntegrationError`] if the integrator fails.
    pub fn run(&self, initial: &ColumnState, output_times: &[f64]) -> Result<SimulationResult> {
        self.options.validate()?;
        let grid = self.model.grid();
        if initial.len() != self.model.state_len() {
            return Err(ConfigurationError::StateLength {
                actual: initial.len(),
                n_cells: grid.n_cells(),
            }
            .into());
        }

        let method = self.options.method;
        if let (Some(t0), Some(t1)) = (output_times.first(), output_times.last()) {
            info!(
                "integrating {} on {} from t = {} to t = {} ({} outputs)",
                method.name(),
                grid,
                t0,
                t1,
                output_times.len()
            );
        }

        let start_wall = Instant::now();
        let solution = method.integrate(&self.model, initial.as_slice(), output_times, &self.options)?;
        let wall_time = start_wall.elapsed().as_secs_f64();

        let stats = RunStatistics::new(method.name(), solution.stats, wall_time);
        info!(
            "finished in {:.2}s: {} RHS evaluations, {} accepted / {} rejected steps, step range [{:.2e}, {:.2e}]",
            wall_time,
            stats.rhs_evaluations,
            stats.accepted_steps,
            stats.rejected_steps,
            stats.min_step,
            stats.max_step
        );

        let trajectory = Trajectory::from_solution(solution, grid.n_cells());
        if let Some(last) = trajectory.final_state() {
            let min = last.min_value();
            if min < -self.options.atol {
                warn!(
                    "final state has negative concentrations (min {min:.3e}); values are not clamped"
                );
            }
        }

        Ok(SimulationResult { trajectory, stats })
    }
}

/// Integrate `initial_state` through `output_times` with default solver options.
///
/// # Errors
/// See [`Simulation::run`]; invalid parameters are reported as
/// [`ConfigurationError`].
pub fn run_column(
    initial_state: &ColumnState,
    output_times: &[f64],
    params: &Parameters,
    grid: &Grid,
) -> Result<Trajectory> {
    let result = Simulation::new(grid.clone(), params.clone())?.run(initial_state, output_times)?;
    Ok(result.trajectory)
}

/// Validate and run a complete scenario.
pub fn run_scenario(scenario: &ScenarioConfig) -> Result<SimulationResult> {
    scenario.validate()?;
    let grid = scenario.grid.build()?;
    let initial = scenario.initial.build(&grid);
    Simulation::new(grid, scenario.parameters.clone())?
        .with_options(scenario.solver)
        .run(&initial, &scenario.output_times())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ColumnError, IntegrationError};
    use crate::state::Tracer;

    fn grid() -> Grid {
        Grid::new(30.0, 1.0).unwrap()
    }

    fn initial(grid: &Grid) -> ColumnState {
        ColumnState::from_fn(grid, |z| (0.1, z, 0.0))
    }

    #[test]
    fn test_run_shape_and_first_row() {
        let grid = grid();
        let state = initial(&grid);
        let times = [0.0, 0.5, 1.0, 2.0];
        let traj = run_column(&state, &times, &Parameters::default(), &grid).unwrap();

        assert_eq!(traj.shape(), (4, 90));
        assert_eq!(traj.times(), &times);
        assert_eq!(traj.row(0), state.as_slice());
        assert!(traj.iter().all(|(_, row)| row.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_inert_column_stays_put() {
        let grid = grid();
        let state = initial(&grid);
        let traj = run_column(&state, &[0.0, 10.0], &Parameters::inert(), &grid).unwrap();
        let last = traj.final_state().unwrap();
        for (a, b) in last.data.iter().zip(&state.data) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_statistics_recorded() {
        let grid = grid();
        let result = Simulation::new(grid.clone(), Parameters::default())
            .unwrap()
            .run(&initial(&grid), &[0.0, 1.0])
            .unwrap();
        let stats = &result.stats;
        assert_eq!(stats.integrator, "dopri5");
        assert!(stats.accepted_steps > 0);
        assert!(stats.rhs_evaluations > 6 * stats.accepted_steps);
        assert!(stats.wall_time >= 0.0);
    }

    #[test]
    fn test_integrators_agree() {
        let grid = grid();
        let state = initial(&grid);
        let times = [0.0, 1.0];
        let sim = Simulation::new(grid.clone(), Parameters::default())
            .unwrap()
            .with_tolerances(1e-9, 1e-12);
        let adaptive = sim.run(&state, &times).unwrap();
        let fixed = sim
            .clone()
            .with_integrator(StandardIntegrator::SspRk3 { dt: 0.01 })
            .run(&state, &times)
            .unwrap();

        assert_eq!(fixed.stats.integrator, "ssp-rk3");
        let a = adaptive.trajectory.profile(1, Tracer::Phytoplankton);
        let b = fixed.trajectory.profile(1, Tracer::Phytoplankton);
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }

    #[test]
    fn test_wrong_initial_length() {
        let grid = grid();
        let sim = Simulation::new(grid, Parameters::default()).unwrap();
        let result = sim.run(&ColumnState::zeros(5), &[0.0, 1.0]);
        assert!(matches!(
            result,
            Err(ColumnError::Configuration(ConfigurationError::StateLength { actual: 15, n_cells: 30 }))
        ));
    }

    #[test]
    fn test_bad_output_times() {
        let grid = grid();
        let state = initial(&grid);
        for times in [&[][..], &[1.0, 0.5][..], &[0.0, 0.0][..]] {
            let result = run_column(&state, times, &Parameters::default(), &grid);
            assert!(matches!(
                result,
                Err(ColumnError::Configuration(ConfigurationError::OutputTimes(_)))
            ));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let grid = grid();
        let params = Parameters::default().with_nutrient_half_saturation(0.0);
        let result = run_column(&initial(&grid), &[0.0, 1.0], &params, &grid);
        assert!(matches!(
            result,
            Err(ColumnError::Configuration(ConfigurationError::InvalidParameter {
                name: "nutrient_half_saturation",
                ..
            }))
        ));
    }

    #[test]
    fn test_step_budget_propagates() {
        let grid = grid();
        let result = Simulation::new(grid.clone(), Parameters::default())
            .unwrap()
            .with_max_steps(2)
            .run(&initial(&grid), &[0.0, 50.0]);
        assert!(matches!(
            result,
            Err(ColumnError::Integration(IntegrationError::MaxStepsExceeded { .. }))
        ));
    }

    #[test]
    fn test_run_scenario() {
        let scenario = ScenarioConfig::default()
            .with_grid(40.0, 2.0)
            .with_output_times(0.0, 2.0, 5);
        let result = run_scenario(&scenario).unwrap();
        assert_eq!(result.trajectory.shape(), (5, 60));
        assert_eq!(result.trajectory.times()[4], 2.0);
    }
}
