//! Interface states and net-update vectors.

use std::ops::{Add, AddAssign, Mul, Neg};

use crate::types::Real;

/// One side of a cell interface: height, normal momentum and bathymetry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellState {
    /// Water height h
    pub h: Real,
    /// Momentum normal to the interface (hu or hv)
    pub hu: Real,
    /// Bathymetry b (negative below sea level)
    pub b: Real,
}

impl CellState {
    /// Create a new cell state.
    pub fn new(h: Real, hu: Real, b: Real) -> Self {
        Self { h, hu, b }
    }

    /// State over a flat bottom (b = 0).
    pub fn flat(h: Real, hu: Real) -> Self {
        Self { h, hu, b: 0.0 }
    }

    /// Particle velocity, zero for a dry column.
    #[inline]
    pub fn velocity(&self) -> Real {
        if self.h > 0.0 { self.hu / self.h } else { 0.0 }
    }
}

/// Change of (h, hu) attributed to one side of an interface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetUpdate {
    /// Height update
    pub h: Real,
    /// Momentum update
    pub hu: Real,
}

impl NetUpdate {
    /// Create a new update.
    pub fn new(h: Real, hu: Real) -> Self {
        Self { h, hu }
    }

    /// Zero update.
    pub fn zero() -> Self {
        Self { h: 0.0, hu: 0.0 }
    }

    /// Convert to array [h, hu].
    pub fn to_array(&self) -> [Real; 2] {
        [self.h, self.hu]
    }
}

impl Add for NetUpdate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.h + other.h, self.hu + other.hu)
    }
}

impl AddAssign for NetUpdate {
    fn add_assign(&mut self, other: Self) {
        self.h += other.h;
        self.hu += other.hu;
    }
}

impl Mul<Real> for NetUpdate {
    type Output = Self;

    fn mul(self, s: Real) -> Self {
        Self::new(self.h * s, self.hu * s)
    }
}

impl Neg for NetUpdate {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.h, -self.hu)
    }
}

/// Net updates for both sides of one interface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetUpdates {
    /// Update applied to the left cell
    pub left: NetUpdate,
    /// Update applied to the right cell
    pub right: NetUpdate,
}

impl NetUpdates {
    /// All-zero updates, returned for degenerate input.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Distribute a wave to the side its speed points to.
    ///
    /// Non-negative speeds go right; both waves may land on the same side.
    #[inline]
    pub(crate) fn add_wave(&mut self, speed: Real, wave: NetUpdate) {
        if speed < 0.0 {
            self.left += wave;
        } else {
            self.right += wave;
        }
    }
}
