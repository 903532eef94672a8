//! Growth limitation factors.
//!
//! - Nutrient: Michaelis-Menten `N / (HN + N)`
//! - Light: smooth saturating PI curve `βI / sqrt(umax² + (βI)²)`
//!
//! The light form avoids the kink of `min(βI, umax) / umax` while having the
//! same limits: 0 at `I = 0` and 1 as `I → ∞`.

/// Nutrient limitation `N / (HN + N)`, in `[0, 1)` for `N ≥ 0`, `HN > 0`.
#[inline]
pub fn nutrient_limitation(n: f64, hn: f64) -> f64 {
    n / (hn + n)
}

/// Light limitation `βI / sqrt(umax² + (βI)²)`, in `(-1, 1)`.
///
/// Returns `0` when both `umax` and `βI` vanish, the limit along `I → 0`.
///
/// ```
/// use pnd_column::source::light_limitation;
///
/// assert_eq!(light_limitation(0.1, 0.0, 0.5), 0.0);
/// assert!(light_limitation(0.1, 1e6, 0.5) > 0.999);
/// ```
#[inline]
pub fn light_limitation(beta: f64, i: f64, umax: f64) -> f64 {
    let bi = beta * i;
    let denom = (umax * umax + bi * bi).sqrt();
    if denom == 0.0 { 0.0 } else { bi / denom }
}

/// Apply [`nutrient_limitation`] to a profile.
pub fn nutrient_limitation_into(n: &[f64], hn: f64, out: &mut [f64]) {
    debug_assert_eq!(n.len(), out.len());
    for (o, &n_i) in out.iter_mut().zip(n) {
        *o = nutrient_limitation(n_i, hn);
    }
}

/// Apply [`light_limitation`] to a light profile.
pub fn light_limitation_into(beta: f64, light: &[f64], umax: f64, out: &mut [f64]) {
    debug_assert_eq!(light.len(), out.len());
    for (o, &i) in out.iter_mut().zip(light) {
        *o = light_limitation(beta, i, umax);
    }
}
