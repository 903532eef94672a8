//! Local (per-cell) biological reaction terms.
//!
//! ```text
//! dP/dt|bio =  umax σL σN P - ε P - γ P²
//! dN/dt|bio = -umax σL σN P + τ D
//! dD/dt|bio =  ε P - τ D
//! ```
//!
//! Grazing `γP²` leaves the system; everything else moves nitrogen between
//! the three pools.

use crate::config::Parameters;

/// Reaction tendencies of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReactionRates {
    pub phytoplankton: f64,
    pub nutrient: f64,
    pub detritus: f64,
}

impl ReactionRates {
    /// Net nitrogen tendency of the cell, which equals `-γP²`.
    #[inline]
    pub fn total(&self) -> f64 {
        self.phytoplankton + self.nutrient + self.detritus
    }
}

/// Rate constants of the P-N-D reactions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reactions {
    umax: f64,
    epsilon: f64,
    gamma: f64,
    tau: f64,
}

impl Reactions {
    /// Extract the rate constants from a parameter bundle.
    pub fn new(params: &Parameters) -> Self {
        Self {
            umax: params.max_growth_rate,
            epsilon: params.recycling_rate,
            gamma: params.grazing,
            tau: params.remineralization_rate,
        }
    }

    /// Primary production `umax σL σN P`.
    #[inline]
    pub fn production(&self, p: f64, sigma_l: f64, sigma_n: f64) -> f64 {
        self.umax * sigma_l * sigma_n * p
    }

    /// Reaction tendencies for one cell.
    ///
    /// # Arguments
    /// * `p`, `d` - Phytoplankton and detritus concentrations
    /// * `sigma_l` - Light limitation factor
    /// * `sigma_n` - Nutrient limitation factor (carries the nutrient dependence)
    #[inline]
    pub fn evaluate(&self, p: f64, d: f64, sigma_l: f64, sigma_n: f64) -> ReactionRates {
        let growth = self.production(p, sigma_l, sigma_n);
        let recycling = self.epsilon * p;
        let remineralization = self.tau * d;

        ReactionRates {
            phytoplankton: growth - recycling - self.gamma * p * p,
            nutrient: -growth + remineralization,
            detritus: recycling - remineralization,
        }
    }
}
