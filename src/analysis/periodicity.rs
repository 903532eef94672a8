//! Periodicity of model time series.
//!
//! Under seasonal forcing the column settles onto an annual cycle. Two
//! diagnostics check this:
//!
//! - peak spacing: mean time between local maxima of a series
//! - period scan: for each trial period `T` fit
//!
//! ```text
//! y(t) = c₀ + c₁ (t - t̄) + A cos(ωt) + B sin(ωt),   ω = 2π/T
//! ```
//!
//! by least squares and report the period that leaves the smallest residual,
//! along with its amplitude `√(A² + B²)`. The linear term absorbs slow drift
//! left over from spin-up.

use std::f64::consts::PI;

use faer::{Mat, linalg::solvers::Solve};

/// Number of unknowns in the per-period fit: offset, trend, cosine, sine.
const N_UNKNOWNS: usize = 4;

/// Times of the interior local maxima of `values`.
///
/// A sample is a peak when it is strictly above its left neighbour and not
/// below its right one, so a flat top counts once at its leading edge.
///
/// # Panics
///
/// Panics if `times` and `values` differ in length.
pub fn peak_times(times: &[f64], values: &[f64]) -> Vec<f64> {
    assert_eq!(
        times.len(),
        values.len(),
        "times and values must have the same length"
    );
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] >= w[2])
        .map(|(i, _)| times[i + 1])
        .collect()
}

/// Mean spacing between peaks occurring after time `after`.
///
/// Returns `None` when fewer than two such peaks exist.
pub fn mean_peak_spacing(times: &[f64], values: &[f64], after: f64) -> Option<f64> {
    let peaks: Vec<f64> = peak_times(times, values)
        .into_iter()
        .filter(|&t| t > after)
        .collect();
    if peaks.len() < 2 {
        return None;
    }
    Some((peaks[peaks.len() - 1] - peaks[0]) / (peaks.len() - 1) as f64)
}

/// Best-fitting period of a period scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodFit {
    /// Trial period with the smallest residual
    pub period: f64,
    /// Harmonic amplitude `√(A² + B²)` at that period
    pub amplitude: f64,
    /// Phase `atan2(-B, A)` in `[0, 2π)`
    pub phase: f64,
    /// Fraction of variance explained by the fit
    pub r_squared: f64,
}

/// Scan `periods` and return the one whose harmonic best explains `values`.
///
/// Returns `None` if the series has fewer points than unknowns, if no
/// trial period is positive and finite, or if every fit is singular.
///
/// # Panics
///
/// Panics if `times` and `values` differ in length.
pub fn dominant_period(times: &[f64], values: &[f64], periods: &[f64]) -> Option<PeriodFit> {
    assert_eq!(
        times.len(),
        values.len(),
        "times and values must have the same length"
    );
    let n_data = times.len();
    if n_data < N_UNKNOWNS {
        return None;
    }

    let t_mean = times.iter().sum::<f64>() / n_data as f64;
    let y_mean = values.iter().sum::<f64>() / n_data as f64;
    let ss_tot: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();

    let mut best: Option<PeriodFit> = None;
    for &period in periods.iter().filter(|p| p.is_finite() && **p > 0.0) {
        let Some(fit) = fit_period(times, values, period, t_mean, ss_tot) else {
            continue;
        };
        if best.is_none_or(|b| fit.r_squared > b.r_squared) {
            best = Some(fit);
        }
    }
    best
}

/// Least-squares fit of offset, trend and one harmonic of `period`.
fn fit_period(
    times: &[f64],
    values: &[f64],
    period: f64,
    t_mean: f64,
    ss_tot: f64,
) -> Option<PeriodFit> {
    let n_data = times.len();
    let omega = 2.0 * PI / period;

    // Design matrix A = [1, t - t̄, cos(ωt), sin(ωt)]
    let mut a = Mat::<f64>::zeros(n_data, N_UNKNOWNS);
    for (i, &t) in times.iter().enumerate() {
        a[(i, 0)] = 1.0;
        a[(i, 1)] = t - t_mean;
        a[(i, 2)] = (omega * t).cos();
        a[(i, 3)] = (omega * t).sin();
    }

    // Normal equations (A'A) x = A'y
    let mut ata = Mat::<f64>::zeros(N_UNKNOWNS, N_UNKNOWNS);
    for i in 0..N_UNKNOWNS {
        for j in 0..N_UNKNOWNS {
            let mut sum = 0.0;
            for k in 0..n_data {
                sum += a[(k, i)] * a[(k, j)];
            }
            ata[(i, j)] = sum;
        }
    }

    let mut aty = Mat::<f64>::zeros(N_UNKNOWNS, 1);
    for i in 0..N_UNKNOWNS {
        let mut sum = 0.0;
        for k in 0..n_data {
            sum += a[(k, i)] * values[k];
        }
        aty[(i, 0)] = sum;
    }

    let lu = ata.as_ref().full_piv_lu();
    let x = lu.solve(&aty);
    let coef: Vec<f64> = (0..N_UNKNOWNS).map(|i| x[(i, 0)]).collect();
    if coef.iter().any(|c| !c.is_finite()) {
        return None;
    }

    let ss_res: f64 = (0..n_data)
        .map(|k| {
            let fitted: f64 = (0..N_UNKNOWNS).map(|j| a[(k, j)] * coef[j]).sum();
            (values[k] - fitted).powi(2)
        })
        .sum();
    let r_squared = if ss_tot > 1e-30 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    let (cos_coef, sin_coef) = (coef[2], coef[3]);
    let mut phase = (-sin_coef).atan2(cos_coef);
    if phase < 0.0 {
        phase += 2.0 * PI;
    }

    Some(PeriodFit {
        period,
        amplitude: cos_coef.hypot(sin_coef),
        phase,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampled<F: Fn(f64) -> f64>(t_end: f64, dt: f64, f: F) -> (Vec<f64>, Vec<f64>) {
        let n = (t_end / dt).round() as usize;
        let times: Vec<f64> = (0..=n).map(|i| i as f64 * dt).collect();
        let values = times.iter().map(|&t| f(t)).collect();
        (times, values)
    }

    #[test]
    fn test_peak_times_sine() {
        let (t, y) = sampled(100.0, 0.5, |t| (2.0 * PI * t / 20.0).sin());
        let peaks = peak_times(&t, &y);
        assert_eq!(peaks, vec![5.0, 25.0, 45.0, 65.0, 85.0]);
    }

    #[test]
    fn test_peak_times_flat_top_counts_once() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(peak_times(&t, &y), vec![1.0]);
    }

    #[test]
    fn test_mean_peak_spacing() {
        let (t, y) = sampled(100.0, 0.5, |t| (2.0 * PI * t / 20.0).sin());
        let spacing = mean_peak_spacing(&t, &y, 10.0).unwrap();
        assert!((spacing - 20.0).abs() < 1e-12, "spacing = {spacing}");

        // Only one peak after t = 80
        assert!(mean_peak_spacing(&t, &y, 80.0).is_none());
    }

    #[test]
    fn test_dominant_period_recovers_harmonic() {
        let amplitude = 0.7;
        let (t, y) = sampled(1460.0, 5.0, |t| {
            2.0 + 0.001 * t + amplitude * (2.0 * PI * t / 365.0 + 0.4).cos()
        });
        let periods: Vec<f64> = (20..=140).map(|k| 5.0 * k as f64).collect();
        let fit = dominant_period(&t, &y, &periods).unwrap();

        assert_eq!(fit.period, 365.0);
        assert!((fit.amplitude - amplitude).abs() < 1e-6, "amp = {}", fit.amplitude);
        assert!((fit.phase - 0.4).abs() < 1e-6, "phase = {}", fit.phase);
        assert!(fit.r_squared > 1.0 - 1e-9);
    }

    #[test]
    fn test_dominant_period_short_series() {
        assert!(dominant_period(&[0.0, 1.0, 2.0], &[1.0, 2.0, 1.0], &[2.0]).is_none());
    }

    #[test]
    fn test_dominant_period_skips_invalid_periods() {
        let (t, y) = sampled(100.0, 1.0, |t| (2.0 * PI * t / 25.0).sin());
        assert!(dominant_period(&t, &y, &[0.0, -3.0, f64::NAN]).is_none());
        let fit = dominant_period(&t, &y, &[0.0, 25.0]).unwrap();
        assert_eq!(fit.period, 25.0);
    }
}
