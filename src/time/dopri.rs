//! Adaptive Dormand-Prince 4(5) integrator.
//!
//! Explicit embedded pair with local extrapolation (the 5th-order solution is
//! propagated) and first-same-as-last reuse of the final stage. The step is
//! chosen from an RMS error norm scaled by `atol + rtol * |y|` and clamped so
//! that every output time is reached exactly.

use log::{debug, trace};

use crate::error::{IntegrationError, Result};

use super::integrator::{IntegratorInfo, OdeSolution, OdeSystem, TimeIntegrator, check_inputs};
use super::options::SolverOptions;

// Dormand-Prince coefficients
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (propagated solution)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between the 5th- and 4th-order weights
const E1: f64 = B1 - 5179.0 / 57600.0;
const E3: f64 = B3 - 7571.0 / 16695.0;
const E4: f64 = B4 - 393.0 / 640.0;
const E5: f64 = B5 + 92097.0 / 339200.0;
const E6: f64 = B6 - 187.0 / 2100.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Dormand-Prince 4(5) with adaptive step size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rk45;

impl IntegratorInfo for Rk45 {
    fn name(&self) -> &'static str {
        "dopri5"
    }

    fn order(&self) -> usize {
        5
    }

    fn is_adaptive(&self) -> bool {
        true
    }
}

/// Stage buffers, allocated once per integration.
struct Stages {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    k5: Vec<f64>,
    k6: Vec<f64>,
    k7: Vec<f64>,
    y_tmp: Vec<f64>,
    y_new: Vec<f64>,
}

impl Stages {
    fn new(n: usize) -> Self {
        Self {
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            k4: vec![0.0; n],
            k5: vec![0.0; n],
            k6: vec![0.0; n],
            k7: vec![0.0; n],
            y_tmp: vec![0.0; n],
            y_new: vec![0.0; n],
        }
    }

    /// Attempt one step of size `h` from `(t, y)`, with `k1 = f(t, y)` already
    /// in place. Leaves the candidate in `y_new`, its derivative in `k7`, and
    /// returns the scaled error norm.
    fn attempt<S: OdeSystem + ?Sized>(
        &mut self,
        sys: &S,
        t: f64,
        y: &[f64],
        h: f64,
        opts: &SolverOptions,
    ) -> f64 {
        let Stages {
            k1,
            k2,
            k3,
            k4,
            k5,
            k6,
            k7,
            y_tmp,
            y_new,
        } = self;
        let n = y.len();

        for i in 0..n {
            y_tmp[i] = y[i] + h * A21 * k1[i];
        }
        sys.rhs(t + C2 * h, y_tmp, k2);

        for i in 0..n {
            y_tmp[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        sys.rhs(t + C3 * h, y_tmp, k3);

        for i in 0..n {
            y_tmp[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        sys.rhs(t + C4 * h, y_tmp, k4);

        for i in 0..n {
            y_tmp[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        sys.rhs(t + C5 * h, y_tmp, k5);

        for i in 0..n {
            y_tmp[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        sys.rhs(t + h, y_tmp, k6);

        for i in 0..n {
            y_new[i] =
                y[i] + h * (B1 * k1[i] + B3 * k3[i] + B4 * k4[i] + B5 * k5[i] + B6 * k6[i]);
        }
        sys.rhs(t + h, y_new, k7);

        let mut err_norm = 0.0;
        for i in 0..n {
            let ei =
                h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
            let sc = opts.atol + opts.rtol * y[i].abs().max(y_new[i].abs());
            err_norm += (ei / sc) * (ei / sc);
        }
        (err_norm / n.max(1) as f64).sqrt()
    }
}

impl TimeIntegrator for Rk45 {
    fn integrate<S: OdeSystem + ?Sized>(
        &self,
        sys: &S,
        y0: &[f64],
        times: &[f64],
        opts: &SolverOptions,
    ) -> Result<OdeSolution> {
        check_inputs(sys, y0, times)?;

        let n = sys.ndim();
        let t_end = times[times.len() - 1];
        let h_max = opts.max_step();
        let mut solution = OdeSolution::with_capacity(times, n);
        let stats = &mut solution.stats;

        let mut t = times[0];
        let mut y = y0.to_vec();
        let mut stages = Stages::new(n);

        sys.rhs(t, &y, &mut stages.k1);
        stats.rhs_evaluations += 1;
        if y.iter().chain(&stages.k1).any(|v| !v.is_finite()) {
            return Err(IntegrationError::NonFinite { time: t }.into());
        }
        solution.data.extend_from_slice(&y);

        let mut h_next = opts.initial_step(t_end - t);
        let mut last_rejection_non_finite = false;

        for &target in &times[1..] {
            while t < target {
                if stats.attempted_steps() >= opts.max_steps {
                    return Err(IntegrationError::MaxStepsExceeded {
                        max_steps: opts.max_steps,
                        time: t,
                        target: t_end,
                    }
                    .into());
                }

                let remaining = target - t;
                let lands = h_next >= remaining;
                let h = if lands { remaining } else { h_next };

                let err_norm = stages.attempt(sys, t, &y, h, opts);
                stats.rhs_evaluations += 6;

                if err_norm <= 1.0 {
                    t = if lands { target } else { t + h };
                    std::mem::swap(&mut y, &mut stages.y_new);
                    std::mem::swap(&mut stages.k1, &mut stages.k7);
                    stats.accept(h);
                    last_rejection_non_finite = false;

                    let factor = if err_norm == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                    };
                    // A step shortened to land on an output time says little
                    // about the step the solution allows.
                    let proposed = (h * factor).min(h_max);
                    h_next = if lands { proposed.max(h_next.min(h_max)) } else { proposed };
                } else {
                    stats.rejected_steps += 1;
                    last_rejection_non_finite = !err_norm.is_finite();

                    let factor = if err_norm.is_finite() {
                        (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, 1.0)
                    } else {
                        MIN_FACTOR
                    };
                    h_next = h * factor;
                    trace!("rejected step h = {h:.3e} at t = {t:.6e}, error {err_norm:.3e}");

                    if h_next < opts.h_min {
                        if last_rejection_non_finite {
                            return Err(IntegrationError::NonFinite { time: t }.into());
                        }
                        return Err(IntegrationError::StepSizeUnderflow { time: t, step: h_next }.into());
                    }
                }
            }
            solution.data.extend_from_slice(&y);
            debug!(
                "reached t = {target:.4} after {} accepted and {} rejected steps",
                stats.accepted_steps, stats.rejected_steps
            );
        }

        Ok(solution)
    }
}
