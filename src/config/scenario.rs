//! Grid, initial-condition and run settings for one scenario.

use serde::{Deserialize, Serialize};

use crate::config::Parameters;
use crate::config::parameters::non_negative;
use crate::error::ConfigurationError;
use crate::grid::Grid;
use crate::state::ColumnState;
use crate::time::SolverOptions;

/// Column depth and nominal cell spacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Column depth `zm` (m)
    pub zm: f64,
    /// Nominal cell spacing `dz` (m)
    pub dz: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { zm: 300.0, dz: 1.0 }
    }
}

impl GridSpec {
    pub fn new(zm: f64, dz: f64) -> Self {
        Self { zm, dz }
    }

    /// Build the grid.
    pub fn build(&self) -> Result<Grid, ConfigurationError> {
        Grid::new(self.zm, self.dz)
    }
}

/// Initial profiles: uniform P and D, nutrient linear in depth.
///
/// The reference run starts from `P = 0.1`, `N = 30 z / zm`, `D = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialProfile {
    /// Uniform phytoplankton concentration
    pub phytoplankton: f64,
    /// Nutrient at the surface (z = 0)
    pub nutrient_surface: f64,
    /// Nutrient at the bottom (z = zm)
    pub nutrient_bottom: f64,
    /// Uniform detritus concentration
    pub detritus: f64,
}

impl Default for InitialProfile {
    fn default() -> Self {
        Self {
            phytoplankton: 0.1,
            nutrient_surface: 0.0,
            nutrient_bottom: 30.0,
            detritus: 0.0,
        }
    }
}

impl InitialProfile {
    /// Sample the profiles on `grid`.
    pub fn build(&self, grid: &Grid) -> ColumnState {
        let zm = grid.depth();
        let (n0, n1) = (self.nutrient_surface, self.nutrient_bottom);
        ColumnState::from_fn(grid, |z| {
            (self.phytoplankton, n0 + (n1 - n0) * z / zm, self.detritus)
        })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("initial_phytoplankton", self.phytoplankton)?;
        non_negative("initial_nutrient_surface", self.nutrient_surface)?;
        non_negative("initial_nutrient_bottom", self.nutrient_bottom)?;
        non_negative("initial_detritus", self.detritus)
    }
}

/// Everything needed for a single column run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub grid: GridSpec,
    pub parameters: Parameters,
    pub initial: InitialProfile,
    /// First output time (days)
    pub start_time: f64,
    /// Last output time (days)
    pub end_time: f64,
    /// Number of evenly spaced output times, including both ends
    pub n_outputs: usize,
    pub solver: SolverOptions,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            parameters: Parameters::default(),
            initial: InitialProfile::default(),
            start_time: 0.0,
            end_time: 100.0,
            n_outputs: 100,
            solver: SolverOptions::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn with_grid(mut self, zm: f64, dz: f64) -> Self {
        self.grid = GridSpec::new(zm, dz);
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_initial(mut self, initial: InitialProfile) -> Self {
        self.initial = initial;
        self
    }

    /// Output `n_outputs` evenly spaced times over `[start_time, end_time]`.
    pub fn with_output_times(mut self, start_time: f64, end_time: f64, n_outputs: usize) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self.n_outputs = n_outputs;
        self
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    /// The output times, `n_outputs` points evenly spaced over
    /// `[start_time, end_time]` inclusive.
    pub fn output_times(&self) -> Vec<f64> {
        evenly_spaced(self.start_time, self.end_time, self.n_outputs)
    }

    /// Validate every part of the scenario.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.grid.build()?;
        self.parameters.validate()?;
        self.initial.validate()?;
        self.solver.validate()?;

        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(ConfigurationError::OutputTimes("start and end must be finite"));
        }
        if self.n_outputs == 0 {
            return Err(ConfigurationError::OutputTimes("need at least one output time"));
        }
        if self.n_outputs > 1 && self.end_time <= self.start_time {
            return Err(ConfigurationError::OutputTimes("end_time must exceed start_time"));
        }
        Ok(())
    }
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
pub(crate) fn evenly_spaced(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}
