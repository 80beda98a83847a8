//! Initial-condition providers.
//!
//! A [`Setup`] answers five pure queries at physical coordinates. Patches
//! evaluate it once per cell at construction, at
//! `x = (index - 0.5) · scale` for ghost-inclusive indices, and store
//! `bathymetry + displacement` as the bathymetry.
//!
//! | Setup | Dimension | Description |
//! |-------|-----------|-------------|
//! | [`DamBreak1D`] | 1D | Two water levels split at a location |
//! | [`Discontinuity1D`] | 1D | Arbitrary left/right states (shock and rarefaction tests) |
//! | [`SubcriticalFlow1D`] | 1D | Steady flow over a hump, Froude < 1 |
//! | [`SupercriticalFlow1D`] | 1D | Steady flow over a hump, Froude > 1 at the crest |
//! | [`TsunamiEvent1D`] | 1D | Interpolated bathymetry profile with sine displacement |
//! | [`DamBreak2D`] | 2D | Circular dam |
//! | [`ArtificialTsunami2D`] | 2D | Analytic seafloor displacement in a flat basin |
//! | [`TsunamiEvent2D`] | 2D | Gridded bathymetry and displacement |
//! | [`CheckpointSetup`] | 2D | Lookup into stored ghost-padded arrays |

mod channel_flow;
mod checkpoint;
mod dam_break;
mod discontinuity;
mod gridded;
mod tsunami;

pub use channel_flow::{SubcriticalFlow1D, SupercriticalFlow1D};
pub use checkpoint::CheckpointSetup;
pub use dam_break::{DamBreak1D, DamBreak2D};
pub use discontinuity::Discontinuity1D;
pub use gridded::GriddedField;
pub use tsunami::{
    ArtificialTsunami2D, SHORE_CLIFF_HEIGHT, SineDisplacement, TsunamiEvent1D, TsunamiEvent2D,
};

use crate::types::Real;

/// Initial state of a scenario as functions of physical coordinates.
pub trait Setup: Send + Sync {
    /// Water height at (x, y).
    fn height(&self, x: Real, y: Real) -> Real;

    /// Momentum in x-direction at (x, y).
    fn momentum_x(&self, x: Real, y: Real) -> Real;

    /// Momentum in y-direction at (x, y).
    fn momentum_y(&self, x: Real, y: Real) -> Real;

    /// Bathymetry at (x, y); negative below sea level.
    fn bathymetry(&self, x: Real, y: Real) -> Real;

    /// Vertical seafloor displacement at (x, y).
    fn displacement(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    /// Name of this setup (for logs).
    fn name(&self) -> &'static str;
}

/// Boxed setup for configuration-driven selection.
pub type BoxedSetup = Box<dyn Setup>;

/// Physical coordinate of a ghost-inclusive cell index.
#[inline]
pub fn cell_coordinate(index: usize, scale: Real) -> Real {
    (index as Real - 0.5) * scale
}
