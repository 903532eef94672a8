//! Local source terms of the P-N-D system.
//!
//! Everything here is evaluated cell by cell and carries no transport:
//! - [`forcing`]: incident surface light (constant or seasonal)
//! - [`light`]: depth-resolved light with self-shading
//! - [`growth`]: nutrient and light limitation factors
//! - [`reactions`]: growth, recycling, grazing and remineralization tendencies
//!
//! # Submodules
//!
//! Light feeds the light limiter, both limiters feed the reactions:
//!
//! ```text
//! P ──> light ──> σL ──┐
//! N ────────────> σN ──┴──> reactions(P, D, σL, σN)
//! ```

pub mod forcing;
pub mod growth;
pub mod light;
pub mod reactions;

pub use forcing::{DAYS_PER_YEAR, IncidentLight};
pub use growth::{
    light_limitation, light_limitation_into, nutrient_limitation, nutrient_limitation_into,
};
pub use light::{light_intensity, light_intensity_into};
pub use reactions::{ReactionRates, Reactions};
