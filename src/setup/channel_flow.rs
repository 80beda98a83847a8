//! Steady channel flows over a parabolic hump.
//!
//! Both setups describe a 25 m channel with a hump centered at x = 10 m on
//! [8, 12]. The water surface starts flat at zero (`h = -b`) with a constant
//! discharge; the solution converges to a steady profile over the hump.

use super::Setup;
use crate::types::Real;

#[inline]
fn hump(x: Real, crest: Real, floor: Real) -> Real {
    if (8.0..=12.0).contains(&x) {
        crest - 0.05 * (x - 10.0) * (x - 10.0)
    } else {
        floor
    }
}

/// Subcritical flow: Froude number below one everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SubcriticalFlow1D;

impl Setup for SubcriticalFlow1D {
    fn height(&self, x: Real, y: Real) -> Real {
        -self.bathymetry(x, y)
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        4.42
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, x: Real, _y: Real) -> Real {
        hump(x, -1.8, -2.0)
    }

    fn name(&self) -> &'static str {
        "subcritical_flow_1d"
    }
}

/// Supercritical flow: the Froude number exceeds one at the crest.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SupercriticalFlow1D;

impl Setup for SupercriticalFlow1D {
    fn height(&self, x: Real, y: Real) -> Real {
        -self.bathymetry(x, y)
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.18
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, x: Real, _y: Real) -> Real {
        hump(x, -0.13, -0.33)
    }

    fn name(&self) -> &'static str {
        "supercritical_flow_1d"
    }
}
