//! Wave propagation patches.
//!
//! # Submodules
//!
//! - [`state`]: Two-slot buffer arena for double-buffered fields
//! - [`diagnostics`]: Conservation totals and solution bounds
//!
//! # Patches
//!
//! Both patches implement [`WavePropagation`] and are generic over the
//! Riemann solver (default [`StandardSolver`](crate::flux::StandardSolver)):
//!
//! - [`WavePropagation1D`]: a line of cells, one sweep per step
//! - [`WavePropagation2D`]: a rectangle, x-sweep then y-sweep per step

pub mod diagnostics;
mod error;
pub mod state;
mod sweep;
mod traits;
mod wave_propagation_1d;
mod wave_propagation_2d;

pub use diagnostics::{Diagnostics, total_mass, total_momentum};
pub use error::GridError;
pub use state::{DoubleBuffer, Slot};
pub use traits::WavePropagation;
pub use wave_propagation_1d::WavePropagation1D;
pub use wave_propagation_2d::WavePropagation2D;
