//! Profile diagnostics: interpolation between grids and vertical summaries.

/// Linearly interpolate a profile sampled at `z_src` onto `z_query`.
///
/// Depths outside `[z_src[0], z_src[last]]` take the nearest end value.
///
/// # Panics
///
/// Panics if `z_src` and `values` differ in length or are empty.
pub fn interpolate_profile(z_src: &[f64], values: &[f64], z_query: &[f64]) -> Vec<f64> {
    assert_eq!(
        z_src.len(),
        values.len(),
        "depth axis and profile must have the same length"
    );
    assert!(!z_src.is_empty(), "cannot interpolate an empty profile");

    let last = z_src.len() - 1;
    z_query
        .iter()
        .map(|&z| {
            if z <= z_src[0] {
                return values[0];
            }
            if z >= z_src[last] {
                return values[last];
            }
            // First sample strictly deeper than z; z_src is sorted
            let hi = z_src.partition_point(|&s| s <= z);
            let lo = hi - 1;
            let w = (z - z_src[lo]) / (z_src[hi] - z_src[lo]);
            values[lo] + w * (values[hi] - values[lo])
        })
        .collect()
}

/// Largest pointwise `|a - b|`.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "profiles must have the same length");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Trapezoidal depth average of a profile over its own axis.
///
/// Returns `None` for fewer than two samples or a zero-length axis.
pub fn depth_average(z: &[f64], values: &[f64]) -> Option<f64> {
    if z.len() < 2 || z.len() != values.len() {
        return None;
    }
    let span = z[z.len() - 1] - z[0];
    if span <= 0.0 {
        return None;
    }
    let integral: f64 = z
        .windows(2)
        .zip(values.windows(2))
        .map(|(zw, vw)| 0.5 * (vw[0] + vw[1]) * (zw[1] - zw[0]))
        .sum();
    Some(integral / span)
}

/// Location and size of a subsurface maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileMaximum {
    /// Index of the maximum cell
    pub cell: usize,
    /// Depth of the maximum (m)
    pub depth: f64,
    /// Value at the maximum
    pub value: f64,
}

/// Depth and value of the largest entry of a profile.
///
/// Applied to phytoplankton this locates the deep chlorophyll maximum. Ties
/// resolve to the shallowest cell. Returns `None` for an empty profile or one
/// containing NaN.
pub fn chlorophyll_maximum(z: &[f64], values: &[f64]) -> Option<ProfileMaximum> {
    if values.is_empty() || z.len() != values.len() || values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    Some(ProfileMaximum {
        cell: best,
        depth: z[best],
        value: values[best],
    })
}
