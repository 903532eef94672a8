//! Vertical transport fluxes at cell faces.
//!
//! The column has `n + 1` faces. The surface face is closed for every tracer;
//! the bottom face uses a per-tracer [`BottomClosure`]. Interior faces carry
//! diffusion and, for detritus, an advective term.
//!
//! - [`FluxAssembler`]: transport of all three tracers under one parameter set
//! - [`TracerTransport`]: coefficients and closure of a single tracer
//! - [`flux_divergence`]: `(J[i+1] - J[i]) / dz` per cell
//!
//! Sign convention: a positive flux points toward increasing depth.

mod closure;
mod face;

pub use closure::BottomClosure;
pub use face::{
    FaceFluxes, FluxAssembler, TracerTransport, compute_face_fluxes, compute_face_fluxes_into,
    divergence_into, flux_divergence,
};
