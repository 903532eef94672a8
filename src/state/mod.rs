//! State vector of the water column.
//!
//! The state is a flat vector of length `3n`:
//!
//! ```text
//! [ P_0 .. P_{n-1} | N_0 .. N_{n-1} | D_0 .. D_{n-1} ]
//!   0               n                 2n            3n
//! ```
//!
//! The same layout is used for time derivatives, so a derivative is also a
//! [`ColumnState`].

mod column;

pub(crate) use column::split_blocks;
pub use column::{ColumnState, Tracer};
