//! Scalar precision, constants and grid extents.

mod extent;
mod real;

pub use extent::GridExtent;
pub use real::{EPSILON, GRAVITY, Real};
