//! Incident surface light forcing.
//!
//! Two variants:
//! - constant light `I_in`
//! - seasonal light `I_in(t) = L0 (1 + A sin(2π t / 365))`
//!
//! The seasonal variant makes the RHS explicitly time dependent with an annual
//! period. Time is in days.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::parameters::non_negative;
use crate::error::ConfigurationError;

/// Length of the forcing year (days).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Surface light forcing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentLight {
    /// Constant incident light `I_in`
    Constant(f64),
    /// Annual cycle around a mean
    Seasonal {
        /// Mean light `L0`
        mean: f64,
        /// Relative amplitude `L_amplitude`
        amplitude: f64,
    },
}

impl Default for IncidentLight {
    fn default() -> Self {
        IncidentLight::Constant(200.0)
    }
}

impl IncidentLight {
    /// Seasonal light with mean `mean` and relative amplitude `amplitude`.
    pub fn seasonal(mean: f64, amplitude: f64) -> Self {
        IncidentLight::Seasonal { mean, amplitude }
    }

    /// Surface light at time `t` (days).
    ///
    /// ```
    /// use pnd_column::source::IncidentLight;
    ///
    /// let light = IncidentLight::seasonal(200.0, 0.5);
    /// assert!((light.at(0.0) - 200.0).abs() < 1e-12);
    /// assert!((light.at(365.0 / 4.0) - 300.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            IncidentLight::Constant(i_in) => i_in,
            IncidentLight::Seasonal { mean, amplitude } => {
                mean * (1.0 + amplitude * (2.0 * PI * t / DAYS_PER_YEAR).sin())
            }
        }
    }

    /// Whether the light depends on time.
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, IncidentLight::Seasonal { amplitude, .. } if *amplitude != 0.0)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            IncidentLight::Constant(i_in) => non_negative("incident_light", i_in),
            IncidentLight::Seasonal { mean, amplitude } => {
                non_negative("seasonal_mean_light", mean)?;
                if !amplitude.is_finite() {
                    return Err(ConfigurationError::InvalidParameter {
                        name: "seasonal_amplitude",
                        value: amplitude,
                        reason: "must be finite",
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_ignores_time() {
        let light = IncidentLight::Constant(150.0);
        assert_eq!(light.at(0.0), 150.0);
        assert_eq!(light.at(123.4), 150.0);
        assert!(!light.is_time_dependent());
    }

    #[test]
    fn test_seasonal_period() {
        let light = IncidentLight::seasonal(200.0, 0.3);
        assert!(light.is_time_dependent());
        for &t in &[0.0, 17.0, 100.0, 250.5] {
            let a = light.at(t);
            let b = light.at(t + DAYS_PER_YEAR);
            assert!((a - b).abs() < 1e-9, "light not annual at t = {t}");
        }
    }

    #[test]
    fn test_seasonal_extremes() {
        let light = IncidentLight::seasonal(200.0, 0.5);
        assert!((light.at(0.25 * DAYS_PER_YEAR) - 300.0).abs() < 1e-9);
        assert!((light.at(0.75 * DAYS_PER_YEAR) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_amplitude_is_constant() {
        let light = IncidentLight::seasonal(200.0, 0.0);
        assert!(!light.is_time_dependent());
        assert_eq!(light.at(42.0), 200.0);
    }

    #[test]
    fn test_validate() {
        assert!(IncidentLight::Constant(-1.0).validate().is_err());
        assert!(IncidentLight::seasonal(-5.0, 0.1).validate().is_err());
        assert!(IncidentLight::seasonal(200.0, f64::INFINITY).validate().is_err());
        assert!(IncidentLight::seasonal(200.0, 0.5).validate().is_ok());
    }

    #[test]
    fn test_serde_forms() {
        let c: IncidentLight = serde_json::from_str(r#"{ "constant": 180.0 }"#).unwrap();
        assert_eq!(c, IncidentLight::Constant(180.0));
        let s: IncidentLight =
            serde_json::from_str(r#"{ "seasonal": { "mean": 200.0, "amplitude": 0.4 } }"#)
                .unwrap();
        assert_eq!(s, IncidentLight::seasonal(200.0, 0.4));
    }
}
