//! Right-hand side of the semi-discrete P-N-D column.
//!
//! For every cell `i`:
//!
//! ```text
//! dP/dt =  umax σL σN P - ε P - γ P² - (J_P[i+1] - J_P[i]) / dz
//! dN/dt = -umax σL σN P + τ D       - (J_N[i+1] - J_N[i]) / dz
//! dD/dt =  ε P - τ D                - (J_D[i+1] - J_D[i]) / dz
//! ```
//!
//! with `σL` from the light field of the current `P` and incident light at
//! time `t`, and `σN` from the current `N`. The evaluation is a pure function
//! of `(t, state)`.

use crate::config::Parameters;
use crate::error::ConfigurationError;
use crate::flux::{FaceFluxes, FluxAssembler, divergence_into};
use crate::grid::Grid;
use crate::source::{
    Reactions, light_intensity, light_intensity_into, light_limitation_into,
    nutrient_limitation_into,
};
use crate::state::{ColumnState, split_blocks};
use crate::time::{OdeSystem, ssp_rk3_step_timed};

/// Scratch buffers for one RHS evaluation.
#[derive(Clone, Debug)]
pub struct RhsWorkspace {
    light: Vec<f64>,
    sigma_l: Vec<f64>,
    sigma_n: Vec<f64>,
    fluxes: FaceFluxes,
}

impl RhsWorkspace {
    pub fn new(n_cells: usize) -> Self {
        Self {
            light: vec![0.0; n_cells],
            sigma_l: vec![0.0; n_cells],
            sigma_n: vec![0.0; n_cells],
            fluxes: FaceFluxes::zeros(n_cells),
        }
    }

    /// Light profile of the last evaluation.
    pub fn light(&self) -> &[f64] {
        &self.light
    }

    /// Face fluxes of the last evaluation.
    pub fn fluxes(&self) -> &FaceFluxes {
        &self.fluxes
    }
}

/// The P-N-D column on a fixed grid with a fixed parameter bundle.
///
/// Cheap to share: evaluation takes `&self` and the model is `Send + Sync`.
///
/// ```
/// use pnd_column::config::Parameters;
/// use pnd_column::grid::Grid;
/// use pnd_column::solver::ColumnModel;
/// use pnd_column::state::ColumnState;
///
/// let grid = Grid::new(50.0, 1.0).unwrap();
/// let model = ColumnModel::new(grid.clone(), Parameters::default()).unwrap();
/// let state = ColumnState::from_fn(&grid, |z| (0.1, 30.0 * z / 50.0, 0.0));
///
/// let dydt = model.rhs(&state, 0.0).unwrap();
/// assert_eq!(dydt.len(), 3 * grid.n_cells());
///
/// let other = ColumnState::zeros(10);
/// assert!(model.rhs(&other, 0.0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ColumnModel {
    grid: Grid,
    params: Parameters,
    reactions: Reactions,
    transport: FluxAssembler,
}

impl ColumnModel {
    /// Build the model after validating the parameters.
    pub fn new(grid: Grid, params: Parameters) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self::new_unchecked(grid, params))
    }

    fn new_unchecked(grid: Grid, params: Parameters) -> Self {
        let reactions = Reactions::new(&params);
        let transport = FluxAssembler::new(&params);
        Self {
            grid,
            params,
            reactions,
            transport,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Length of the state vector, `3n`.
    #[inline]
    pub fn state_len(&self) -> usize {
        3 * self.grid.n_cells()
    }

    /// Evaluate the RHS into `dydt` using caller-provided scratch space.
    ///
    /// `y` and `dydt` must have length `3n`.
    pub fn rhs_with(&self, t: f64, y: &[f64], dydt: &mut [f64], ws: &mut RhsWorkspace) {
        let n = self.grid.n_cells();
        let dz = self.grid.dz();
        let params = &self.params;
        debug_assert_eq!(y.len(), 3 * n);
        debug_assert_eq!(dydt.len(), 3 * n);

        let (p, nut, d) = split_blocks(y, n);

        light_intensity_into(
            p,
            params.incident_light.at(t),
            params.self_shading,
            params.background_turbidity,
            &self.grid,
            &mut ws.light,
        );
        light_limitation_into(
            params.pi_slope,
            &ws.light,
            params.max_growth_rate,
            &mut ws.sigma_l,
        );
        nutrient_limitation_into(nut, params.nutrient_half_saturation, &mut ws.sigma_n);
        self.transport.assemble_into(p, nut, d, dz, &mut ws.fluxes);

        let (dp, rest) = dydt.split_at_mut(n);
        let (dn, dd) = rest.split_at_mut(n);
        divergence_into(&ws.fluxes.phytoplankton, dz, dp);
        divergence_into(&ws.fluxes.nutrient, dz, dn);
        divergence_into(&ws.fluxes.detritus, dz, dd);

        for i in 0..n {
            let r = self
                .reactions
                .evaluate(p[i], d[i], ws.sigma_l[i], ws.sigma_n[i]);
            dp[i] = r.phytoplankton - dp[i];
            dn[i] = r.nutrient - dn[i];
            dd[i] = r.detritus - dd[i];
        }
    }

    /// Evaluate the RHS into `dydt`.
    pub fn rhs_into(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        let mut ws = RhsWorkspace::new(self.grid.n_cells());
        self.rhs_with(t, y, dydt, &mut ws);
    }

    /// Time derivative of `state` at time `t`.
    ///
    /// # Errors
    /// [`ConfigurationError::StateLength`] if `state` was built for a
    /// different number of cells.
    pub fn rhs(&self, state: &ColumnState, t: f64) -> Result<ColumnState, ConfigurationError> {
        check_state(state, &self.grid)?;
        Ok(self.rhs_state(state, t))
    }

    fn rhs_state(&self, state: &ColumnState, t: f64) -> ColumnState {
        let mut dydt = ColumnState::zeros(self.grid.n_cells());
        self.rhs_into(t, state.as_slice(), dydt.as_mut_slice());
        dydt
    }

    /// Light profile for `state` at time `t`.
    pub fn light_profile(&self, state: &ColumnState, t: f64) -> Vec<f64> {
        let params = &self.params;
        light_intensity(
            state.phytoplankton(),
            params.incident_light.at(t),
            params.self_shading,
            params.background_turbidity,
            &self.grid,
        )
    }

    /// Advance `state` by one SSP-RK3 step from `t` to `t + dt`.
    ///
    /// # Errors
    /// [`ConfigurationError::StateLength`] if `state` does not match the grid.
    /// The state is left untouched in that case.
    pub fn step_ssp_rk3(
        &self,
        state: &mut ColumnState,
        t: f64,
        dt: f64,
    ) -> Result<(), ConfigurationError> {
        check_state(state, &self.grid)?;
        ssp_rk3_step_timed(state, |u: &ColumnState, time| self.rhs_state(u, time), t, dt);
        Ok(())
    }
}

impl OdeSystem for ColumnModel {
    fn ndim(&self) -> usize {
        self.state_len()
    }

    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        self.rhs_into(t, y, dydt);
    }
}

fn check_state(state: &ColumnState, grid: &Grid) -> Result<(), ConfigurationError> {
    if state.len() != 3 * grid.n_cells() {
        return Err(ConfigurationError::StateLength {
            actual: state.len(),
            n_cells: grid.n_cells(),
        });
    }
    Ok(())
}

/// Time derivative of `state` under `params` on `grid`.
///
/// Parameters are used as given, without range checks.
///
/// # Errors
/// [`ConfigurationError::StateLength`] if `state` does not match `grid`.
pub fn compute_rhs(
    state: &ColumnState,
    t: f64,
    params: &Parameters,
    grid: &Grid,
) -> Result<ColumnState, ConfigurationError> {
    check_state(state, grid)?;
    Ok(ColumnModel::new_unchecked(grid.clone(), params.clone()).rhs_state(state, t))
}
