//! Tsunami setups: interpolated real-world bathymetry and an analytic test basin.
//!
//! Near the coastline, measured bathymetry is pushed away from sea level so that
//! every cell is either at least [`SHORE_CLIFF_HEIGHT`] deep or the same height
//! above water. This keeps thin wet layers out of the domain.

use std::f64::consts::PI;

use super::{GriddedField, Setup};
use crate::types::Real;

/// Minimum depth of wet cells and height of dry cells near the shore (m).
pub const SHORE_CLIFF_HEIGHT: Real = 20.0;

/// Water height over raw bathymetry `b`.
#[inline]
fn cliff_height(b: Real) -> Real {
    if b < 0.0 {
        (-b).max(SHORE_CLIFF_HEIGHT)
    } else {
        0.0
    }
}

/// Raw bathymetry pushed to ±[`SHORE_CLIFF_HEIGHT`] near sea level.
#[inline]
fn cliff_bathymetry(b: Real) -> Real {
    if b.abs() < SHORE_CLIFF_HEIGHT {
        if b < 0.0 {
            -SHORE_CLIFF_HEIGHT
        } else {
            SHORE_CLIFF_HEIGHT
        }
    } else {
        b
    }
}

/// Single-period sine uplift on the open interval `(start, end)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SineDisplacement {
    /// Left end of the uplift (m)
    pub start: Real,
    /// Right end of the uplift (m)
    pub end: Real,
    /// Peak displacement (m)
    pub amplitude: Real,
}

impl SineDisplacement {
    /// Create a displacement pulse.
    pub fn new(start: Real, end: Real, amplitude: Real) -> Self {
        Self {
            start,
            end,
            amplitude,
        }
    }

    /// Displacement at x.
    pub fn at(&self, x: Real) -> Real {
        if x > self.start && x < self.end {
            let phase = (x - self.start) / (self.end - self.start);
            self.amplitude * (phase * 2.0 * PI as Real).sin()
        } else {
            0.0
        }
    }
}

/// 1D tsunami over an interpolated bathymetry profile.
#[derive(Clone, Debug, PartialEq)]
pub struct TsunamiEvent1D {
    profile: GriddedField,
    displacement: SineDisplacement,
}

impl TsunamiEvent1D {
    /// Create the setup from bathymetry samples spaced `sample_spacing` apart,
    /// the first at x = 0.
    ///
    /// Returns `None` if there are no samples or the spacing is not positive.
    pub fn new(samples: Vec<Real>, sample_spacing: Real, displacement: SineDisplacement) -> Option<Self> {
        let profile = GriddedField::from_profile(samples, sample_spacing)?;
        Some(Self {
            profile,
            displacement,
        })
    }

    /// Create the setup from an existing profile.
    pub fn from_profile(profile: GriddedField, displacement: SineDisplacement) -> Self {
        Self {
            profile,
            displacement,
        }
    }

    /// Interpolated bathymetry before the cliff rule.
    pub fn raw_bathymetry(&self, x: Real) -> Real {
        self.profile.interpolate(x, 0.0)
    }

    /// The displacement pulse.
    pub fn pulse(&self) -> SineDisplacement {
        self.displacement
    }
}

impl Setup for TsunamiEvent1D {
    fn height(&self, x: Real, _y: Real) -> Real {
        cliff_height(self.raw_bathymetry(x))
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, x: Real, _y: Real) -> Real {
        cliff_bathymetry(self.raw_bathymetry(x))
    }

    fn displacement(&self, x: Real, _y: Real) -> Real {
        self.displacement.at(x)
    }

    fn name(&self) -> &'static str {
        "tsunami_event_1d"
    }
}

/// 2D tsunami from gridded bathymetry and seafloor displacement.
#[derive(Clone, Debug, PartialEq)]
pub struct TsunamiEvent2D {
    bathymetry: GriddedField,
    displacement: GriddedField,
}

impl TsunamiEvent2D {
    /// Create the setup. The two fields may use different resolutions and extents.
    pub fn new(bathymetry: GriddedField, displacement: GriddedField) -> Self {
        Self {
            bathymetry,
            displacement,
        }
    }

    /// Bathymetry input.
    pub fn bathymetry_field(&self) -> &GriddedField {
        &self.bathymetry
    }

    /// Displacement input.
    pub fn displacement_field(&self) -> &GriddedField {
        &self.displacement
    }
}

impl Setup for TsunamiEvent2D {
    fn height(&self, x: Real, y: Real) -> Real {
        cliff_height(self.bathymetry.interpolate(x, y))
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, x: Real, y: Real) -> Real {
        cliff_bathymetry(self.bathymetry.interpolate(x, y))
    }

    fn displacement(&self, x: Real, y: Real) -> Real {
        self.displacement.interpolate(x, y)
    }

    fn name(&self) -> &'static str {
        "tsunami_event_2d"
    }
}

/// Flat 100 m basin with an analytic seafloor uplift.
///
/// The uplift `5·(−sin(πx′))·(1 − y′²)` is defined on the square where
/// `x′ = (x − cx) / 500` and `y′ = (y − cy) / 500` lie in [−1, 1], and is
/// zero elsewhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArtificialTsunami2D {
    /// Center of the uplift (m)
    pub center: (Real, Real),
}

impl ArtificialTsunami2D {
    const DEPTH: Real = 100.0;
    const HALF_WIDTH: Real = 500.0;
    const AMPLITUDE: Real = 5.0;

    /// Uplift centered at (500, 500).
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the uplift center.
    pub fn with_center(mut self, x: Real, y: Real) -> Self {
        self.center = (x, y);
        self
    }
}

impl Default for ArtificialTsunami2D {
    fn default() -> Self {
        Self {
            center: (500.0, 500.0),
        }
    }
}

impl Setup for ArtificialTsunami2D {
    fn height(&self, _x: Real, _y: Real) -> Real {
        Self::DEPTH
    }

    fn momentum_x(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn momentum_y(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    fn bathymetry(&self, _x: Real, _y: Real) -> Real {
        -Self::DEPTH
    }

    fn displacement(&self, x: Real, y: Real) -> Real {
        let xn = (x - self.center.0) / Self::HALF_WIDTH;
        let yn = (y - self.center.1) / Self::HALF_WIDTH;
        if !(-1.0..=1.0).contains(&xn) || !(-1.0..=1.0).contains(&yn) {
            return 0.0;
        }
        Self::AMPLITUDE * -(xn * PI as Real).sin() * (1.0 - yn * yn)
    }

    fn name(&self) -> &'static str {
        "artificial_tsunami_2d"
    }
}
