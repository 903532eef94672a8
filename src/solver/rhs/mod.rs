//! Right-hand side of the semi-discrete column equations.

mod column;

pub use column::{ColumnModel, RhsWorkspace, compute_rhs};
