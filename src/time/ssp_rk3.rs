//! Strong Stability Preserving Runge-Kutta time integration.
//!
//! SSP-RK3 (Shu-Osher form) with a fixed nominal step. Each output interval
//! is split into the smallest number of equal substeps not exceeding the
//! nominal step, so every output time is hit exactly.

use log::debug;

use crate::error::{ConfigurationError, IntegrationError, Result};

use super::integrator::{
    Integrable, IntegratorInfo, OdeSolution, OdeSystem, TimeIntegrator, check_inputs,
};
use super::options::SolverOptions;

/// Perform one step of SSP-RK3 with time-dependent RHS.
///
/// ```text
/// u1    = u + dt * L(u, t)
/// u2    = 3/4 * u + 1/4 * u1 + 1/4 * dt * L(u1, t + dt)
/// u_new = 1/3 * u + 2/3 * u2 + 2/3 * dt * L(u2, t + dt/2)
/// ```
///
/// # Arguments
/// * `u` - Solution to update (modified in place)
/// * `rhs_fn` - Function that computes RHS given solution and time
/// * `t` - Current time
/// * `dt` - Time step
pub fn ssp_rk3_step_timed<S, F>(u: &mut S, rhs_fn: F, t: f64, dt: f64)
where
    S: Integrable,
    F: Fn(&S, f64) -> S,
{
    // Stage 1: u1 = u + dt * L(u, t)
    let l_u = rhs_fn(u, t);
    let mut u1 = u.clone();
    u1.axpy(dt, &l_u);

    // Stage 2: u2 = 3/4 * u + 1/4 * u1 + 1/4 * dt * L(u1, t + dt)
    let l_u1 = rhs_fn(&u1, t + dt);
    let mut u2 = u.clone();
    u2.scale(0.75);
    u2.axpy(0.25, &u1);
    u2.axpy(0.25 * dt, &l_u1);

    // Stage 3: u_new = 1/3 * u + 2/3 * u2 + 2/3 * dt * L(u2, t + dt/2)
    let l_u2 = rhs_fn(&u2, t + 0.5 * dt);
    u.scale(1.0 / 3.0);
    u.axpy(2.0 / 3.0, &u2);
    u.axpy(2.0 / 3.0 * dt, &l_u2);
}

/// Fixed-step SSP-RK3 integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SspRk3 {
    dt: f64,
}

impl SspRk3 {
    /// Integrator with nominal step `dt`.
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of equal substeps covering `span` with steps no larger than `dt`.
    fn substeps(&self, span: f64) -> usize {
        ((span / self.dt) - 1e-9).ceil().max(1.0) as usize
    }
}

impl IntegratorInfo for SspRk3 {
    fn name(&self) -> &'static str {
        "ssp-rk3"
    }

    fn order(&self) -> usize {
        3
    }

    fn is_adaptive(&self) -> bool {
        false
    }
}

impl TimeIntegrator for SspRk3 {
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        sys: &S,
        y0: &[f64],
        times: &[f64],
        opts: &SolverOptions,
    ) -> Result<OdeSolution> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigurationError::SolverOption {
                name: "dt",
                value: self.dt,
            }
            .into());
        }
        check_inputs(sys, y0, times)?;

        let ndim = sys.ndim();
        let mut solution = OdeSolution::with_capacity(times, ndim);
        let stats = &mut solution.stats;
        let evaluations = std::cell::Cell::new(0usize);

        let rhs = |y: &Vec<f64>, t: f64| {
            let mut dydt = vec![0.0; ndim];
            sys.rhs(t, y, &mut dydt);
            evaluations.set(evaluations.get() + 1);
            dydt
        };

        let mut y = y0.to_vec();
        let mut t = times[0];
        if y.iter().any(|v| !v.is_finite()) {
            return Err(IntegrationError::NonFinite { time: t }.into());
        }
        solution.data.extend_from_slice(&y);

        for &target in &times[1..] {
            let n_sub = self.substeps(target - t);
            if stats.accepted_steps + n_sub > opts.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: opts.max_steps,
                    time: t,
                    target: times[times.len() - 1],
                }
                .into());
            }

            let h = (target - t) / n_sub as f64;
            let start = t;
            for k in 0..n_sub {
                ssp_rk3_step_timed(&mut y, &rhs, t, h);
                stats.accept(h);
                t = start + (k + 1) as f64 * h;

                if y.iter().any(|v| !v.is_finite()) {
                    return Err(IntegrationError::NonFinite { time: t }.into());
                }
            }
            t = target;
            solution.data.extend_from_slice(&y);
            debug!("reached t = {target:.4} in {n_sub} steps of {h:.3e}");
        }

        stats.rhs_evaluations = evaluations.get();
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColumnError;

    struct Linear {
        rate: f64,
    }

    impl OdeSystem for Linear {
        fn ndim(&self) -> usize {
            1
        }

        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
            dydt[0] = self.rate * y[0];
        }
    }

    /// dy/dt = -y + cos(t), y(0) = 0
    struct Forced;

    impl Forced {
        fn exact(t: f64) -> f64 {
            0.5 * (t.cos() + t.sin()) - 0.5 * (-t).exp()
        }
    }

    impl OdeSystem for Forced {
        fn ndim(&self) -> usize {
            1
        }

        fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
            dydt[0] = -y[0] + t.cos();
        }
    }

    #[test]
    fn test_ssp_rk3_linear_rhs() {
        // Exact: u(t) = u_0 * exp(c * t)
        let mut u = vec![1.0; 3];
        let c = 1.0;
        let dt = 0.01;
        let n_steps = 10;

        for i in 0..n_steps {
            let t = dt * i as f64;
            ssp_rk3_step_timed(
                &mut u,
                |u_: &Vec<f64>, _t| {
                    let mut rhs = u_.clone();
                    rhs.scale(c);
                    rhs
                },
                t,
                dt,
            );
        }

        let expected = (c * dt * n_steps as f64).exp();
        for &v in &u {
            let error = (v - expected).abs();
            assert!(
                error < 1e-4,
                "Expected {}, got {} (error {})",
                expected,
                v,
                error
            );
        }
    }

    #[test]
    fn test_third_order_convergence() {
        let times = [0.0, 2.0];
        let opts = SolverOptions::default();
        let error = |dt: f64| {
            let sol = SspRk3::new(dt).integrate(&Forced, &[0.0], &times, &opts).unwrap();
            (sol.row(1)[0] - Forced::exact(2.0)).abs()
        };

        let e1 = error(0.1);
        let e2 = error(0.05);
        let rate = (e1 / e2).log2();
        assert!(rate > 2.7 && rate < 3.3, "observed order {rate}");
    }

    #[test]
    fn test_hits_output_times() {
        let times = [0.0, 0.3, 1.0, 1.05];
        let sol = SspRk3::new(0.1)
            .integrate(&Linear { rate: -1.0 }, &[1.0], &times, &SolverOptions::default())
            .unwrap();

        assert_eq!(sol.times, times.to_vec());
        assert_eq!(sol.n_rows(), 4);
        for (j, &t) in times.iter().enumerate() {
            assert!((sol.row(j)[0] - (-t).exp()).abs() < 1e-4);
        }
        // 3 + 7 + 1 substeps, three stages each
        assert_eq!(sol.stats.accepted_steps, 11);
        assert_eq!(sol.stats.rhs_evaluations, 33);
        assert_eq!(sol.stats.rejected_steps, 0);
    }

    #[test]
    fn test_max_steps() {
        let opts = SolverOptions::default().with_max_steps(5);
        let result = SspRk3::new(0.1).integrate(&Linear { rate: -1.0 }, &[1.0], &[0.0, 1.0], &opts);
        assert!(matches!(
            result,
            Err(ColumnError::Integration(IntegrationError::MaxStepsExceeded { max_steps: 5, .. }))
        ));
    }

    #[test]
    fn test_rejects_invalid_step() {
        use crate::time::StandardIntegrator;

        let opts = SolverOptions::default();
        for dt in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let direct = SspRk3::new(dt).integrate(&Linear { rate: -1.0 }, &[1.0], &[0.0, 10.0], &opts);
            assert!(
                matches!(
                    direct,
                    Err(ColumnError::Configuration(ConfigurationError::SolverOption { name: "dt", .. }))
                ),
                "dt = {dt}: {direct:?}"
            );

            let dispatched = StandardIntegrator::SspRk3 { dt }.integrate(
                &Linear { rate: -1.0 },
                &[1.0],
                &[0.0, 10.0],
                &opts,
            );
            assert!(
                matches!(
                    dispatched,
                    Err(ColumnError::Configuration(ConfigurationError::SolverOption { name: "dt", .. }))
                ),
                "dt = {dt}: {dispatched:?}"
            );
        }
    }

    #[test]
    fn test_blow_up_is_reported() {
        // Far beyond the stability limit of the explicit scheme.
        let result = SspRk3::new(1.0).integrate(
            &Linear { rate: -1e3 },
            &[1.0],
            &[0.0, 1e3],
            &SolverOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ColumnError::Integration(IntegrationError::NonFinite { .. }))
        ));
    }
}
