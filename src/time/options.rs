//! Integrator selection and step-control settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

use super::integrator::StandardIntegrator;

/// Options shared by the time integrators.
///
/// Tolerances and step bounds only apply to the adaptive integrator; the
/// fixed-step integrator reads its step from [`StandardIntegrator::SspRk3`]
/// and honours only `max_steps`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Which integrator to run
    pub method: StandardIntegrator,
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Initial step; `None` picks one from the output span
    pub h0: Option<f64>,
    /// Smallest step the adaptive integrator may take before giving up
    pub h_min: f64,
    /// Largest step; `None` for unbounded
    pub h_max: Option<f64>,
    /// Budget of attempted steps over the whole run
    pub max_steps: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            method: StandardIntegrator::default(),
            rtol: 1e-6,
            atol: 1e-9,
            h0: None,
            h_min: 1e-12,
            h_max: None,
            max_steps: 1_000_000,
        }
    }
}

impl SolverOptions {
    pub fn with_method(mut self, method: StandardIntegrator) -> Self {
        self.method = method;
        self
    }

    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    pub fn with_initial_step(mut self, h0: f64) -> Self {
        self.h0 = Some(h0);
        self
    }

    pub fn with_step_bounds(mut self, h_min: f64, h_max: Option<f64>) -> Self {
        self.h_min = h_min;
        self.h_max = h_max;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Upper step bound as a number.
    #[inline]
    pub fn max_step(&self) -> f64 {
        self.h_max.unwrap_or(f64::INFINITY)
    }

    /// First step for an integration spanning `span`.
    pub(crate) fn initial_step(&self, span: f64) -> f64 {
        let h = self.h0.unwrap_or(span * 1e-3);
        h.max(self.h_min).min(self.max_step()).min(span)
    }

    /// Check tolerances, step bounds and the step budget.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive_option("rtol", self.rtol)?;
        positive_option("atol", self.atol)?;
        if let Some(h0) = self.h0 {
            positive_option("h0", h0)?;
        }
        if !self.h_min.is_finite() || self.h_min < 0.0 {
            return Err(ConfigurationError::SolverOption {
                name: "h_min",
                value: self.h_min,
            });
        }
        if let Some(h_max) = self.h_max {
            positive_option("h_max", h_max)?;
            if h_max < self.h_min {
                return Err(ConfigurationError::SolverOption {
                    name: "h_max",
                    value: h_max,
                });
            }
        }
        if self.max_steps == 0 {
            return Err(ConfigurationError::SolverOption {
                name: "max_steps",
                value: 0.0,
            });
        }
        if let StandardIntegrator::SspRk3 { dt } = self.method {
            positive_option("dt", dt)?;
        }
        Ok(())
    }
}

fn positive_option(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::SolverOption { name, value })
    }
}
