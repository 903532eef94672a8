//! Time integration methods.
//!
//! The column model is integrated by the method of lines: the spatial
//! discretization yields an [`OdeSystem`], and an integrator advances it
//! through the requested output times.
//!
//! - [`Rk45`]: adaptive Dormand-Prince 4(5), the default
//! - [`SspRk3`]: fixed-step SSP-RK3 (Shu-Osher form)
//! - [`Trajectory`]: column states at the output times

mod dopri;
mod integrator;
mod options;
mod ssp_rk3;
mod trajectory;

pub use dopri::Rk45;
pub use integrator::{
    Integrable, IntegratorInfo, OdeSolution, OdeSystem, StandardIntegrator, StepStatistics,
    TimeIntegrator, validate_output_times,
};
pub use options::SolverOptions;
pub use ssp_rk3::{SspRk3, ssp_rk3_step_timed};
pub use trajectory::Trajectory;
