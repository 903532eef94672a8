//! Seasonal light forcing drives an annual cycle.
//!
//! With `I_in(t) = L0 (1 + A sin(2πt/365))` the depth-mean phytoplankton
//! settles onto a 365-day cycle after the first year of spin-up.

use pnd_column::analysis::{dominant_period, mean_peak_spacing};
use pnd_column::{Parameters, ScenarioConfig, Tracer, run_scenario};

const YEAR: f64 = 365.0;
const N_YEARS: f64 = 4.0;

/// Depth-mean P every 5 days over four years, after dropping the first year.
fn depth_mean_phytoplankton(params: Parameters) -> (Vec<f64>, Vec<f64>) {
    let t_end = N_YEARS * YEAR;
    let scenario = ScenarioConfig::default()
        .with_grid(300.0, 5.0)
        .with_parameters(params)
        .with_output_times(0.0, t_end, (t_end / 5.0) as usize + 1);
    let result = run_scenario(&scenario).unwrap();
    let traj = result.trajectory;

    let series = traj.depth_mean_series(Tracer::Phytoplankton);
    traj.times()
        .iter()
        .zip(series)
        .filter(|(t, _)| **t >= YEAR)
        .map(|(&t, p)| (t, p))
        .unzip()
}

fn trial_periods() -> Vec<f64> {
    (20..=140).map(|k| 5.0 * k as f64).collect()
}

#[test]
fn test_seasonal_forcing_has_annual_period() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (times, p_mean) = depth_mean_phytoplankton(Parameters::seasonal(200.0, 0.5));
    assert!(p_mean.iter().all(|p| p.is_finite()));

    let fit = dominant_period(&times, &p_mean, &trial_periods()).unwrap();
    assert!(
        (fit.period - YEAR).abs() <= 10.0,
        "dominant period {} days",
        fit.period
    );

    let spacing = mean_peak_spacing(&times, &p_mean, YEAR).unwrap();
    assert!(
        (spacing - YEAR).abs() < 20.0,
        "mean peak spacing {spacing} days"
    );
}

#[test]
fn test_constant_light_has_no_annual_cycle() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (t_const, p_const) = depth_mean_phytoplankton(Parameters::default());
    let (t_seas, p_seas) = depth_mean_phytoplankton(Parameters::seasonal(200.0, 0.5));

    let annual = [YEAR];
    let constant = dominant_period(&t_const, &p_const, &annual).unwrap();
    let seasonal = dominant_period(&t_seas, &p_seas, &annual).unwrap();
    assert!(
        seasonal.amplitude > 10.0 * constant.amplitude,
        "annual amplitude {} (seasonal) vs {} (constant)",
        seasonal.amplitude,
        constant.amplitude
    );
}
