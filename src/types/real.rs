//! Floating-point precision and physical constants.
//!
//! The scalar type is chosen once for the whole build: `f64` by default,
//! `f32` with the `f32` feature.

/// Scalar type used for every cell quantity.
#[cfg(not(feature = "f32"))]
pub type Real = f64;

/// Scalar type used for every cell quantity.
#[cfg(feature = "f32")]
pub type Real = f32;

/// Standard gravity (m/s²).
pub const GRAVITY: Real = 9.80665;

/// Machine epsilon of [`Real`].
pub const EPSILON: Real = Real::EPSILON;
