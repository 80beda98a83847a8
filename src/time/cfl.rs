//! CFL-based time step control.
//!
//! The stable step for explicit wave propagation is
//!
//! dt = cfl · dx / λ_max,    λ_max = max(|u| + √(g h_worst))
//!
//! where `h_worst` is the largest height among a cell and its direct
//! neighbors, so waves that enter the cell during the step are accounted for.
//! Dry cells (h ≤ 0) are skipped.

use std::ops::Range;

use crate::types::{GRAVITY, GridExtent, Real};

/// Default CFL factor for 1D patches.
pub const CFL_1D: Real = 0.5;

/// Default CFL factor for 2D patches.
///
/// Smaller than 0.5 because the y-sweep starts from the provisional state
/// left by the x-sweep.
pub const CFL_2D: Real = 0.45;

/// CFL controller configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CflConfig {
    /// Safety factor applied to dx / λ_max
    pub factor: Real,
}

impl Default for CflConfig {
    fn default() -> Self {
        Self::one_d()
    }
}

impl CflConfig {
    /// Create with an explicit factor.
    pub fn new(factor: Real) -> Self {
        Self { factor }
    }

    /// Default for 1D patches (0.5).
    pub fn one_d() -> Self {
        Self { factor: CFL_1D }
    }

    /// Default for 2D patches (0.45).
    pub fn two_d() -> Self {
        Self { factor: CFL_2D }
    }

    /// Set the factor.
    pub fn with_factor(mut self, factor: Real) -> Self {
        self.factor = factor;
        self
    }

    /// Time step for a given maximum wave speed.
    #[inline]
    pub fn timestep(&self, cell_size: Real, max_speed: Real) -> Real {
        stable_timestep(self.factor, cell_size, max_speed)
    }
}

/// `factor · cell_size / max_speed`, or `+∞` without any wave.
#[inline]
pub fn stable_timestep(factor: Real, cell_size: Real, max_speed: Real) -> Real {
    if max_speed.is_nan() {
        return Real::NAN;
    }
    if max_speed <= 0.0 {
        return Real::INFINITY;
    }
    factor * cell_size / max_speed
}

/// Maximum that keeps NaN instead of discarding it.
#[inline]
fn nan_max(a: Real, b: Real) -> Real {
    if a.is_nan() || b.is_nan() { Real::NAN } else { a.max(b) }
}

/// Bound on the wave speed of one cell, `None` if the cell is dry.
#[inline]
fn cell_speed(h: Real, momentum: Real, h_worst: Real) -> Option<Real> {
    if h > 0.0 {
        Some(momentum.abs() / h + (GRAVITY * h_worst).sqrt())
    } else if h.is_nan() {
        Some(Real::NAN)
    } else {
        None
    }
}

/// Largest wave speed over `cells` of a ghost-padded line.
///
/// Every index in `cells` must have a neighbor on both sides.
pub fn max_wave_speed_1d(h: &[Real], hu: &[Real], cells: Range<usize>) -> Real {
    cells
        .filter_map(|i| {
            let h_worst = h[i].max(h[i - 1]).max(h[i + 1]);
            cell_speed(h[i], hu[i], h_worst)
        })
        .fold(0.0, nan_max)
}

/// Largest wave speed over the interior of a ghost-padded grid.
///
/// Rows are scanned concurrently with the `parallel` feature; the result may
/// then differ in the last bit between thread counts.
pub fn max_wave_speed_2d(extent: GridExtent, h: &[Real], hu: &[Real], hv: &[Real]) -> Real {
    let stride = extent.stride();
    let nx = extent.nx();

    let row_speed = |iy: usize| -> Real {
        let start = iy * stride + 1;
        (start..start + nx)
            .filter_map(|i| {
                let h_worst = h[i]
                    .max(h[i - 1])
                    .max(h[i + 1])
                    .max(h[i - stride])
                    .max(h[i + stride]);
                cell_speed(h[i], hu[i].abs().max(hv[i].abs()), h_worst)
            })
            .fold(0.0, nan_max)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (1..=extent.ny())
            .into_par_iter()
            .map(row_speed)
            .reduce(|| 0.0, nan_max)
    }

    #[cfg(not(feature = "parallel"))]
    {
        (1..=extent.ny()).map(row_speed).fold(0.0, nan_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resting_water_speed() {
        let h = vec![4.0; 5];
        let hu = vec![0.0; 5];
        let speed = max_wave_speed_1d(&h, &hu, 1..4);
        assert_relative_eq!(speed, (GRAVITY * 4.0).sqrt());
    }

    #[test]
    fn test_worst_case_height_from_neighbor() {
        let h = vec![1.0, 1.0, 9.0, 1.0];
        let hu = vec![0.0, 2.0, 0.0, 0.0];
        // Cell 1: |u| = 2, h_worst = 9
        let speed = max_wave_speed_1d(&h, &hu, 1..2);
        assert_relative_eq!(speed, 2.0 + (GRAVITY * 9.0).sqrt());
    }

    #[test]
    fn test_dry_cells_are_skipped() {
        let h = vec![0.0; 6];
        let hu = vec![5.0; 6];
        assert_eq!(max_wave_speed_1d(&h, &hu, 1..5), 0.0);
        assert_eq!(stable_timestep(0.5, 1.0, 0.0), Real::INFINITY);
    }

    #[test]
    fn test_nan_is_not_hidden() {
        let h = vec![1.0, 1.0, Real::NAN, 1.0, 1.0];
        let hu = vec![0.0; 5];
        let speed = max_wave_speed_1d(&h, &hu, 1..4);
        assert!(speed.is_nan());
        assert!(stable_timestep(0.5, 1.0, speed).is_nan());
    }

    #[test]
    fn test_2d_uses_larger_momentum_component() {
        let extent = GridExtent::new(1, 1);
        let mut h = vec![1.0; extent.len()];
        let mut hu = vec![0.0; extent.len()];
        let mut hv = vec![0.0; extent.len()];
        let c = extent.index(0, 0);
        h[c] = 2.0;
        hu[c] = 1.0;
        hv[c] = -3.0;

        let speed = max_wave_speed_2d(extent, &h, &hu, &hv);
        assert_relative_eq!(speed, 1.5 + (GRAVITY * 2.0).sqrt());
    }

    #[test]
    fn test_cfl_config_defaults() {
        assert_eq!(CflConfig::default().factor, 0.5);
        assert_eq!(CflConfig::two_d().factor, 0.45);
        assert_relative_eq!(CflConfig::new(0.4).timestep(2.0, 4.0), 0.2);
    }
}
