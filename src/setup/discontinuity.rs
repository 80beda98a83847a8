//! General 1D discontinuity (Riemann problem) setup.

use super::Setup;
use crate::types::Real;

/// Left and right states of a Riemann problem split at `location`.
///
/// Covers shock-shock (`hu_L > 0 > hu_R`) and rare-rare
/// (`hu_L < 0 < hu_R`) configurations as well as dam breaks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Discontinuity1D {
    /// Height left of the discontinuity
    pub height_left: Real,
    /// Height right of the discontinuity
    pub height_right: Real,
    /// Momentum left of the discontinuity
    pub momentum_left: Real,
    /// Momentum right of the discontinuity
    pub momentum_right: Real,
    /// Position of the discontinuity
    pub location: Real,
    /// Bathymetry left of the discontinuity
    pub bathymetry_left: Real,
    /// Bathymetry right of the discontinuity
    pub bathymetry_right: Real,
}

impl Discontinuity1D {
    /// Create a discontinuity over a flat bottom.
    pub fn new(
        height_left: Real,
        height_right: Real,
        momentum_left: Real,
        momentum_right: Real,
        location: Real,
    ) -> Self {
        Self {
            height_left,
            height_right,
            momentum_left,
            momentum_right,
            location,
            bathymetry_left: 0.0,
            bathymetry_right: 0.0,
        }
    }

    /// Set the bathymetry on both sides.
    pub fn with_bathymetry(mut self, left: Real, right: Real) -> Self {
        self.bathymetry_left = left;
        self.bathymetry_right = right;
        self
    }

    #[inline]
    fn pick(&self, x: Real, left: Real, right: Real) -> Real {
        if x < self.location { left } else { right }
    }
}

impl Setup for Discontinuity1D {
    fn height(&self, x: Real, _y: Real) -> Real {
        self.pick(x, self.height_left, self.height_right)
    }

    fn momentum_x(&self, x: Real, _y: Real) -> Real {
        self.pick(x, self.momentum_left, self.momentum_right)
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, x: Real, _y: Real) -> Real {
        self.pick(x, self.bathymetry_left, self.bathymetry_right)
    }

    fn name(&self) -> &'static str {
        "discontinuity_1d"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shock_shock_states() {
        let setup = Discontinuity1D::new(10.0, 8.0, 5.0, -3.0, 3.0).with_bathymetry(-2.0, -1.0);

        assert_eq!(setup.height(0.0, 0.0), 10.0);
        assert_eq!(setup.height(3.0, 0.0), 8.0);
        assert_eq!(setup.momentum_x(2.5, 0.0), 5.0);
        assert_eq!(setup.momentum_x(3.5, 0.0), -3.0);
        assert_eq!(setup.momentum_y(3.5, 0.0), 0.0);
        assert_eq!(setup.bathymetry(1.0, 0.0), -2.0);
        assert_eq!(setup.bathymetry(5.0, 0.0), -1.0);
    }
}
