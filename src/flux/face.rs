//! Face flux assembly and flux divergence.
//!
//! Face `i` separates cell `i-1` (above) from cell `i` (below). Faces `0` and
//! `n` are the surface and the bottom. Fluxes are positive toward increasing
//! depth, and the cell tendency is `-(J[i+1] - J[i]) / dz`.
//!
//! Interior faces (`i = 1..n-1`):
//!
//! ```text
//! J_P[i] = -Av (P[i] - P[i-1]) / dz
//! J_N[i] = -Av (N[i] - N[i-1]) / dz
//! J_D[i] = -v D[i] - Av (D[i] - D[i-1]) / dz
//! ```
//!
//! The advective term uses the value of the cell below the face, `D[i]`. With
//! the sign convention above it moves detritus toward the surface; the bottom
//! closure `J_D[n] = -v D[n-1]` is the matching inflow through the bottom face.

use super::closure::BottomClosure;
use crate::config::Parameters;
use crate::grid::Grid;
use crate::state::ColumnState;

/// Transport coefficients and bottom closure of one tracer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerTransport {
    /// Diffusivity `Av`
    pub diffusivity: f64,
    /// Velocity of the advective term `-v X[i]`; zero for pure diffusion
    pub velocity: f64,
    /// Closure at the bottom face
    pub bottom: BottomClosure,
}

impl TracerTransport {
    /// Pure diffusion with the given bottom closure.
    pub fn diffusive(diffusivity: f64, bottom: BottomClosure) -> Self {
        Self {
            diffusivity,
            velocity: 0.0,
            bottom,
        }
    }

    /// Diffusion plus the advective term, with the advective bottom closure.
    pub fn advective(diffusivity: f64, velocity: f64) -> Self {
        Self {
            diffusivity,
            velocity,
            bottom: BottomClosure::Advective,
        }
    }

    /// Face fluxes of profile `x` into `out` (length `x.len() + 1`).
    pub fn face_fluxes_into(&self, x: &[f64], dz: f64, out: &mut [f64]) {
        let n = x.len();
        debug_assert_eq!(out.len(), n + 1);

        let av = self.diffusivity;
        let v = self.velocity;
        let interior = out[1..n].iter_mut().zip(x.windows(2));

        if v == 0.0 {
            for (j, w) in interior {
                *j = -av * (w[1] - w[0]) / dz;
            }
        } else {
            for (j, w) in interior {
                *j = -v * w[1] - av * (w[1] - w[0]) / dz;
            }
        }

        out[0] = 0.0;
        out[n] = self.bottom.flux(x[n - 1], av, v, dz);
    }

    /// Allocating version of [`TracerTransport::face_fluxes_into`].
    pub fn face_fluxes(&self, x: &[f64], dz: f64) -> Vec<f64> {
        let mut out = vec![0.0; x.len() + 1];
        self.face_fluxes_into(x, dz, &mut out);
        out
    }
}

/// Face fluxes of the three tracers, each of length `n + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceFluxes {
    pub phytoplankton: Vec<f64>,
    pub nutrient: Vec<f64>,
    pub detritus: Vec<f64>,
}

impl FaceFluxes {
    /// Zero fluxes for `n_cells` cells.
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            phytoplankton: vec![0.0; n_cells + 1],
            nutrient: vec![0.0; n_cells + 1],
            detritus: vec![0.0; n_cells + 1],
        }
    }
}

/// Transport of P, N and D with the column's boundary closures.
///
/// - P: closed at both ends
/// - N: closed at the surface, relaxed toward `NB` at the bottom
/// - D: closed at the surface, advective at the bottom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluxAssembler {
    pub phytoplankton: TracerTransport,
    pub nutrient: TracerTransport,
    pub detritus: TracerTransport,
}

impl FluxAssembler {
    pub fn new(params: &Parameters) -> Self {
        let av = params.diffusivity;
        Self {
            phytoplankton: TracerTransport::diffusive(av, BottomClosure::ZeroFlux),
            nutrient: TracerTransport::diffusive(
                av,
                BottomClosure::Reservoir {
                    concentration: params.bottom_nutrient,
                },
            ),
            detritus: TracerTransport::advective(av, params.sinking_velocity),
        }
    }

    /// Face fluxes of `(p, n, d)` into preallocated buffers.
    pub fn assemble_into(&self, p: &[f64], n: &[f64], d: &[f64], dz: f64, out: &mut FaceFluxes) {
        self.phytoplankton
            .face_fluxes_into(p, dz, &mut out.phytoplankton);
        self.nutrient.face_fluxes_into(n, dz, &mut out.nutrient);
        self.detritus.face_fluxes_into(d, dz, &mut out.detritus);
    }

    /// Face fluxes of a full state.
    pub fn assemble(&self, state: &ColumnState, dz: f64) -> FaceFluxes {
        let mut out = FaceFluxes::zeros(state.n_cells);
        let (p, n, d) = state.split();
        self.assemble_into(p, n, d, dz, &mut out);
        out
    }
}

/// Face fluxes of `state` under `params`.
///
/// ```
/// use pnd_column::config::Parameters;
/// use pnd_column::flux::compute_face_fluxes;
/// use pnd_column::grid::Grid;
/// use pnd_column::state::ColumnState;
///
/// let grid = Grid::new(10.0, 1.0).unwrap();
/// let state = ColumnState::from_fn(&grid, |_| (0.1, 30.0, 0.0));
/// let fluxes = compute_face_fluxes(&state, &Parameters::default(), &grid);
///
/// assert_eq!(fluxes.nutrient.len(), 11);
/// // Uniform profiles at the reservoir value carry no flux anywhere.
/// assert!(fluxes.nutrient.iter().all(|&j| j == 0.0));
/// ```
pub fn compute_face_fluxes(state: &ColumnState, params: &Parameters, grid: &Grid) -> FaceFluxes {
    FluxAssembler::new(params).assemble(state, grid.dz())
}

/// Allocation-free version of [`compute_face_fluxes`].
pub fn compute_face_fluxes_into(
    state: &ColumnState,
    params: &Parameters,
    grid: &Grid,
    out: &mut FaceFluxes,
) {
    let (p, n, d) = state.split();
    FluxAssembler::new(params).assemble_into(p, n, d, grid.dz(), out);
}

/// Flux divergence `(J[i+1] - J[i]) / dz` into `out` (length `j.len() - 1`).
#[inline]
pub fn divergence_into(j: &[f64], dz: f64, out: &mut [f64]) {
    debug_assert_eq!(out.len() + 1, j.len());
    for (o, w) in out.iter_mut().zip(j.windows(2)) {
        *o = (w[1] - w[0]) / dz;
    }
}

/// Allocating version of [`divergence_into`].
pub fn flux_divergence(j: &[f64], dz: f64) -> Vec<f64> {
    let mut out = vec![0.0; j.len().saturating_sub(1)];
    divergence_into(j, dz, &mut out);
    out
}
