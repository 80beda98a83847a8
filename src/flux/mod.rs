//! Approximate Riemann solvers for the 1D shallow water equations.
//!
//! Each solver takes the states on both sides of a cell interface and
//! returns the net updates attributed to each side:
//! - [`fwave_net_updates`]: F-Wave decomposition of the flux jump, including
//!   the bathymetry source term
//! - [`roe_net_updates`]: Roe decomposition of the state jump (flat bottom)
//!
//! The [`RiemannSolver`] trait abstracts over both; [`StandardSolver`]
//! selects one at runtime.

mod fwave;
mod roe;
mod state;
pub mod traits;

pub use fwave::{fwave_net_updates, roe_wave_speeds, wave_strengths};
pub use roe::roe_net_updates;
pub use state::{CellState, NetUpdate, NetUpdates};
pub use traits::{
    BoxedSolver, FWaveSolver, ParseSolverError, RiemannSolver, RoeSolver, StandardSolver,
    create_solver,
};
