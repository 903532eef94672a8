//! Scenario configuration.
//!
//! All configuration types derive `serde::{Serialize, Deserialize}` and fill
//! missing fields from their `Default` impl, so a caller can describe a
//! scenario in any serde format and only spell out what differs from the
//! reference run.
//!
//! - [`Parameters`]: biological and physical constants
//! - [`GridSpec`]: column depth and nominal cell spacing
//! - [`InitialProfile`]: initial P, N, D profiles
//! - [`ScenarioConfig`]: everything needed for one run
//!
//! # Example
//!
//! ```
//! use pnd_column::config::ScenarioConfig;
//!
//! let scenario: ScenarioConfig = serde_json::from_str(
//!     r#"{ "parameters": { "bottom_nutrient": 15.0 }, "end_time": 50.0 }"#,
//! )
//! .unwrap();
//! assert_eq!(scenario.parameters.bottom_nutrient, 15.0);
//! assert_eq!(scenario.grid.dz, 1.0);
//! assert!(scenario.validate().is_ok());
//! ```

pub(crate) mod parameters;
mod scenario;

pub use parameters::Parameters;
pub use scenario::{GridSpec, InitialProfile, ScenarioConfig};
