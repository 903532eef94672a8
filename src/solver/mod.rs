//! Method-of-lines solver components.
//!
//! # Submodules
//!
//! - [`rhs`]: state derivative of the discretized column
//!
//! [`ColumnModel`] couples the grid, the parameter bundle, the local source
//! terms of [`crate::source`] and the face fluxes of [`crate::flux`]. It
//! implements [`crate::time::OdeSystem`], which is all an integrator needs.

pub mod rhs;

pub use rhs::{ColumnModel, RhsWorkspace, compute_rhs};
