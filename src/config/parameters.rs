//! Biological and physical parameter bundle.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::source::forcing::IncidentLight;

/// Immutable parameter bundle for one scenario.
///
/// Units: days, metres, mmol N/m³, light in µmol photons/m²/s.
/// Sweeps over a parameter build a new bundle per value with the `with_*`
/// methods; nothing is mutated during integration.
///
/// ```
/// use pnd_column::config::Parameters;
///
/// let base = Parameters::default();
/// let richer = base.clone().with_bottom_nutrient(60.0);
/// assert_eq!(base.bottom_nutrient, 30.0);
/// assert_eq!(richer.bottom_nutrient, 60.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Incident surface light, constant or seasonal
    pub incident_light: IncidentLight,
    /// Background turbidity `Kbg` (1/m)
    pub background_turbidity: f64,
    /// Phytoplankton self-shading coefficient `k` (m²/mmol N)
    pub self_shading: f64,
    /// Maximum growth rate `umax` (1/day)
    pub max_growth_rate: f64,
    /// Initial slope of the PI curve `beta`
    pub pi_slope: f64,
    /// Nutrient half-saturation `HN` (mmol N/m³)
    pub nutrient_half_saturation: f64,
    /// Recycling (mortality to detritus) rate `epsilon` (1/day)
    pub recycling_rate: f64,
    /// Quadratic grazing coefficient `gamma` (m³/mmol N/day)
    pub grazing: f64,
    /// Remineralization rate `tau` (1/day)
    pub remineralization_rate: f64,
    /// Vertical diffusivity `Av` (m²/day)
    pub diffusivity: f64,
    /// Detritus sinking velocity `v` (m/day)
    pub sinking_velocity: f64,
    /// Nutrient concentration of the deep reservoir `NB` (mmol N/m³)
    pub bottom_nutrient: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            incident_light: IncidentLight::Constant(200.0),
            background_turbidity: 0.045,
            self_shading: 6e-10,
            max_growth_rate: 0.5,
            pi_slope: 0.1,
            nutrient_half_saturation: 0.3,
            recycling_rate: 0.05,
            grazing: 0.5,
            remineralization_rate: 0.1,
            diffusivity: 5.0,
            sinking_velocity: 5.0,
            bottom_nutrient: 30.0,
        }
    }
}

impl Parameters {
    /// Default parameters with seasonal light `L0 (1 + A sin(2πt/365))`.
    pub fn seasonal(mean_light: f64, amplitude: f64) -> Self {
        Self::default().with_incident_light(IncidentLight::seasonal(mean_light, amplitude))
    }

    /// Parameters with every rate and transport coefficient set to zero.
    ///
    /// Light settings keep their defaults. Useful as a starting point for
    /// isolating individual processes.
    pub fn inert() -> Self {
        Self {
            max_growth_rate: 0.0,
            recycling_rate: 0.0,
            grazing: 0.0,
            remineralization_rate: 0.0,
            diffusivity: 0.0,
            sinking_velocity: 0.0,
            ..Self::default()
        }
    }

    pub fn with_incident_light(mut self, light: IncidentLight) -> Self {
        self.incident_light = light;
        self
    }

    pub fn with_background_turbidity(mut self, kbg: f64) -> Self {
        self.background_turbidity = kbg;
        self
    }

    pub fn with_self_shading(mut self, k: f64) -> Self {
        self.self_shading = k;
        self
    }

    pub fn with_max_growth_rate(mut self, umax: f64) -> Self {
        self.max_growth_rate = umax;
        self
    }

    pub fn with_pi_slope(mut self, beta: f64) -> Self {
        self.pi_slope = beta;
        self
    }

    pub fn with_nutrient_half_saturation(mut self, hn: f64) -> Self {
        self.nutrient_half_saturation = hn;
        self
    }

    pub fn with_recycling_rate(mut self, epsilon: f64) -> Self {
        self.recycling_rate = epsilon;
        self
    }

    pub fn with_grazing(mut self, gamma: f64) -> Self {
        self.grazing = gamma;
        self
    }

    pub fn with_remineralization_rate(mut self, tau: f64) -> Self {
        self.remineralization_rate = tau;
        self
    }

    pub fn with_diffusivity(mut self, av: f64) -> Self {
        self.diffusivity = av;
        self
    }

    pub fn with_sinking_velocity(mut self, v: f64) -> Self {
        self.sinking_velocity = v;
        self
    }

    pub fn with_bottom_nutrient(mut self, nb: f64) -> Self {
        self.bottom_nutrient = nb;
        self
    }

    /// Check every value against its admissible range.
    ///
    /// # Errors
    /// The first offending parameter, as [`ConfigurationError::InvalidParameter`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.incident_light.validate()?;

        non_negative("background_turbidity", self.background_turbidity)?;
        non_negative("self_shading", self.self_shading)?;
        non_negative("max_growth_rate", self.max_growth_rate)?;
        non_negative("pi_slope", self.pi_slope)?;
        positive("nutrient_half_saturation", self.nutrient_half_saturation)?;
        non_negative("recycling_rate", self.recycling_rate)?;
        non_negative("grazing", self.grazing)?;
        non_negative("remineralization_rate", self.remineralization_rate)?;
        non_negative("diffusivity", self.diffusivity)?;
        non_negative("sinking_velocity", self.sinking_velocity)?;
        non_negative("bottom_nutrient", self.bottom_nutrient)
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(ConfigurationError::InvalidParameter {
            name,
            value,
            reason: "must be >= 0",
        });
    }
    Ok(())
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    non_negative(name, value)?;
    if value == 0.0 {
        return Err(ConfigurationError::InvalidParameter {
            name,
            value,
            reason: "must be > 0",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
        assert!(Parameters::seasonal(200.0, 0.5).validate().is_ok());
    }

    #[test]
    fn test_negative_diffusivity_rejected() {
        let p = Parameters::default().with_diffusivity(-1.0);
        assert_eq!(
            p.validate(),
            Err(ConfigurationError::InvalidParameter {
                name: "diffusivity",
                value: -1.0,
                reason: "must be >= 0",
            })
        );
    }

    #[test]
    fn test_negative_sinking_rejected() {
        let p = Parameters::default().with_sinking_velocity(-0.1);
        assert!(matches!(
            p.validate(),
            Err(ConfigurationError::InvalidParameter {
                name: "sinking_velocity",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_rates_rejected() {
        for p in [
            Parameters::default().with_recycling_rate(-0.01),
            Parameters::default().with_grazing(-0.01),
            Parameters::default().with_remineralization_rate(-0.01),
            Parameters::default().with_max_growth_rate(-0.01),
        ] {
            assert!(p.validate().is_err());
        }
    }

    #[test]
    fn test_zero_half_saturation_rejected() {
        let p = Parameters::default().with_nutrient_half_saturation(0.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = Parameters::default().with_background_turbidity(f64::NAN);
        assert!(matches!(
            p.validate(),
            Err(ConfigurationError::InvalidParameter {
                reason: "must be finite",
                ..
            })
        ));
    }

    #[test]
    fn test_inert_is_valid() {
        let p = Parameters::inert();
        assert!(p.validate().is_ok());
        assert_eq!(p.diffusivity, 0.0);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{ "bottom_nutrient": 12.5, "max_growth_rate": 1.0 }"#;
        let p: Parameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.bottom_nutrient, 12.5);
        assert_eq!(p.max_growth_rate, 1.0);
        assert_eq!(p.diffusivity, 5.0);
        assert_eq!(p.incident_light, IncidentLight::Constant(200.0));
    }
}
