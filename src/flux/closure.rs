//! Bottom boundary closures.
//!
//! The surface face (face 0) is closed for every tracer. The bottom face
//! (face n) takes one of three closures:
//!
//! | closure       | flux `J[n]`                 | used for |
//! |---------------|-----------------------------|----------|
//! | `ZeroFlux`    | `0`                         | P        |
//! | `Reservoir`   | `Av (X[n-1] - X_B) / dz`    | N        |
//! | `Advective`   | `-v X[n-1]`                 | D        |

use serde::{Deserialize, Serialize};

/// Closure at the bottom face of the column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum BottomClosure {
    /// No exchange through the bottom.
    ZeroFlux,
    /// Diffusive exchange with a deep reservoir held at `concentration`.
    Reservoir { concentration: f64 },
    /// Advective term `-v X[n-1]` only, no diffusive part.
    Advective,
}

impl BottomClosure {
    /// Flux through the bottom face.
    ///
    /// # Arguments
    /// * `last` - Value in the bottom cell `X[n-1]`
    /// * `diffusivity` - `Av`
    /// * `velocity` - `v` of the tracer's advective term
    /// * `dz` - Nominal cell spacing
    #[inline]
    pub fn flux(&self, last: f64, diffusivity: f64, velocity: f64, dz: f64) -> f64 {
        match *self {
            BottomClosure::ZeroFlux => 0.0,
            BottomClosure::Reservoir { concentration } => {
                diffusivity * (last - concentration) / dz
            }
            BottomClosure::Advective => -velocity * last,
        }
    }
}
