//! Dam break setups.

use super::Setup;
use crate::types::Real;

/// 1D dam break: two resting water columns separated at `location`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamBreak1D {
    /// Water height left of the dam
    pub height_left: Real,
    /// Water height right of the dam
    pub height_right: Real,
    /// Position of the dam (m)
    pub location: Real,
    /// Constant bathymetry
    pub bathymetry: Real,
}

impl DamBreak1D {
    /// Create a dam break over a flat bottom at b = 0.
    pub fn new(height_left: Real, height_right: Real, location: Real) -> Self {
        Self {
            height_left,
            height_right,
            location,
            bathymetry: 0.0,
        }
    }

    /// Set a constant bathymetry.
    pub fn with_bathymetry(mut self, bathymetry: Real) -> Self {
        self.bathymetry = bathymetry;
        self
    }
}

impl Setup for DamBreak1D {
    fn height(&self, x: Real, _y: Real) -> Real {
        if x < self.location {
            self.height_left
        } else {
            self.height_right
        }
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, _x: Real, _y: Real) -> Real {
        self.bathymetry
    }

    fn name(&self) -> &'static str {
        "dam_break_1d"
    }
}

/// 2D dam break: a circular water column inside a resting basin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamBreak2D {
    /// Height inside the dam
    pub height_inner: Real,
    /// Height outside the dam
    pub height_outer: Real,
    /// Center of the dam (x, y)
    pub center: (Real, Real),
    /// Dam radius
    pub radius: Real,
    /// Constant bathymetry
    pub bathymetry: Real,
}

impl DamBreak2D {
    /// Create a circular dam break over b = -20.
    pub fn new(height_inner: Real, height_outer: Real, center: (Real, Real), radius: Real) -> Self {
        Self {
            height_inner,
            height_outer,
            center,
            radius,
            bathymetry: -20.0,
        }
    }
}

impl Setup for DamBreak2D {
    fn height(&self, x: Real, y: Real) -> Real {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        if dx * dx + dy * dy < self.radius * self.radius {
            self.height_inner
        } else {
            self.height_outer
        }
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, _x: Real, _y: Real) -> Real {
        self.bathymetry
    }

    fn name(&self) -> &'static str {
        "dam_break_2d"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dam_break_1d() {
        let setup = DamBreak1D::new(10.0, 5.0, 3.0);

        assert_eq!(setup.height(2.0, 0.0), 10.0);
        assert_eq!(setup.height(2.999, 0.0), 10.0);
        assert_eq!(setup.height(3.0, 0.0), 5.0);
        assert_eq!(setup.height(4.0, 0.0), 5.0);
        assert_eq!(setup.momentum_x(2.0, 0.0), 0.0);
        assert_eq!(setup.bathymetry(2.0, 0.0), 0.0);
        assert_eq!(setup.with_bathymetry(-10.0).bathymetry(7.0, 1.0), -10.0);
    }

    #[test]
    fn test_dam_break_2d_circle() {
        let setup = DamBreak2D::new(10.0, 5.0, (50.0, 50.0), 10.0);

        assert_eq!(setup.height(50.0, 50.0), 10.0);
        assert_eq!(setup.height(55.0, 55.0), 10.0);
        assert_eq!(setup.height(60.0, 60.0), 5.0);
        assert_eq!(setup.height(0.0, 50.0), 5.0);
        assert_eq!(setup.bathymetry(0.0, 0.0), -20.0);
        assert_eq!(setup.displacement(50.0, 50.0), 0.0);
    }
}
