//! Trait-based Riemann solver abstraction.
//!
//! Solvers are selected at runtime through [`StandardSolver`], which keeps
//! both the F-Wave and the Roe path reachable from one binary. Custom solvers
//! implement [`RiemannSolver`] and plug into the wave propagation patches
//! through their generic parameter.
//!
//! # Example
//! ```
//! use wave_rs::flux::{CellState, RiemannSolver, StandardSolver};
//!
//! let left = CellState::flat(10.0, 0.0);
//! let right = CellState::flat(8.0, 0.0);
//!
//! let solver = StandardSolver::Roe;
//! let updates = solver.net_updates(&left, &right);
//! assert!(updates.left.h > 0.0);
//!
//! let boxed: &dyn RiemannSolver = &StandardSolver::FWave;
//! assert_eq!(boxed.name(), "fwave");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::state::{CellState, NetUpdates};
use crate::types::GRAVITY;

// =============================================================================
// Riemann Solver Trait
// =============================================================================

/// Approximate Riemann solver producing net updates for one interface.
///
/// Implementations must be pure: the result depends only on the two states.
pub trait RiemannSolver: Send + Sync {
    /// Net updates for the left and right cell of an interface.
    fn net_updates(&self, left: &CellState, right: &CellState) -> NetUpdates;

    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Whether the bathymetry jump enters the update.
    fn uses_bathymetry(&self) -> bool;
}

/// F-Wave solver with bathymetry source term.
#[derive(Clone, Copy, Debug, Default)]
pub struct FWaveSolver;

impl RiemannSolver for FWaveSolver {
    #[inline]
    fn net_updates(&self, left: &CellState, right: &CellState) -> NetUpdates {
        super::fwave_net_updates(left, right, GRAVITY)
    }

    fn name(&self) -> &'static str {
        "fwave"
    }

    fn uses_bathymetry(&self) -> bool {
        true
    }
}

/// Roe solver for flat bottoms.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoeSolver;

impl RiemannSolver for RoeSolver {
    #[inline]
    fn net_updates(&self, left: &CellState, right: &CellState) -> NetUpdates {
        super::roe_net_updates(left, right, GRAVITY)
    }

    fn name(&self) -> &'static str {
        "roe"
    }

    fn uses_bathymetry(&self) -> bool {
        false
    }
}

// =============================================================================
// Runtime Selection
// =============================================================================

/// Runtime-selectable solver with enum dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StandardSolver {
    /// F-Wave solver (handles bathymetry)
    #[default]
    FWave,
    /// Roe solver (flat bottom)
    Roe,
}

impl RiemannSolver for StandardSolver {
    #[inline]
    fn net_updates(&self, left: &CellState, right: &CellState) -> NetUpdates {
        match self {
            StandardSolver::FWave => FWaveSolver.net_updates(left, right),
            StandardSolver::Roe => RoeSolver.net_updates(left, right),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StandardSolver::FWave => FWaveSolver.name(),
            StandardSolver::Roe => RoeSolver.name(),
        }
    }

    fn uses_bathymetry(&self) -> bool {
        matches!(self, StandardSolver::FWave)
    }
}

impl fmt::Display for StandardSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown solver name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown Riemann solver '{0}' (expected 'fwave' or 'roe')")]
pub struct ParseSolverError(pub String);

impl FromStr for StandardSolver {
    type Err = ParseSolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fwave" | "f-wave" => Ok(StandardSolver::FWave),
            "roe" => Ok(StandardSolver::Roe),
            _ => Err(ParseSolverError(s.to_string())),
        }
    }
}

/// Boxed solver for dynamic dispatch.
pub type BoxedSolver = Box<dyn RiemannSolver>;

/// Create a boxed solver from the enum.
pub fn create_solver(kind: StandardSolver) -> BoxedSolver {
    match kind {
        StandardSolver::FWave => Box::new(FWaveSolver),
        StandardSolver::Roe => Box::new(RoeSolver),
    }
}

// Forward through references and boxes so patches accept either.
impl<S: RiemannSolver + ?Sized> RiemannSolver for Box<S> {
    #[inline]
    fn net_updates(&self, left: &CellState, right: &CellState) -> NetUpdates {
        (**self).net_updates(left, right)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn uses_bathymetry(&self) -> bool {
        (**self).uses_bathymetry()
    }
}
