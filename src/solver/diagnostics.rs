//! Conservation and bounds diagnostics for wave propagation patches.
//!
//! All sums run over interior cells only and are weighted by the cell area
//! (`dx` in 1D, `dx²` in 2D), so totals are in m³ and m⁴/s for 2D patches.
//!
//! ```
//! use wave_rs::solver::{Diagnostics, WavePropagation, WavePropagation1D};
//!
//! let mut patch = WavePropagation1D::new(10);
//! for i in 0..10 {
//!     patch.set_height(i, 0, 2.0);
//! }
//! let diag = Diagnostics::compute(&patch, 5.0);
//! assert_eq!(diag.total_mass, 100.0);
//! ```

use super::WavePropagation;
use crate::types::Real;

/// Sum of `field` over the interior of `patch`.
fn interior_sum<P: WavePropagation + ?Sized>(patch: &P, field: &[Real]) -> Real {
    let mut sum = 0.0;
    for iy in 0..patch.ny() {
        for ix in 0..patch.nx() {
            sum += field[patch.cell_index(ix, iy)];
        }
    }
    sum
}

/// Sum of water heights over interior cells.
pub fn total_mass<P: WavePropagation + ?Sized>(patch: &P) -> Real {
    interior_sum(patch, patch.height())
}

/// Sum of momenta `(hu, hv)` over interior cells; `hv` is zero in 1D.
pub fn total_momentum<P: WavePropagation + ?Sized>(patch: &P) -> (Real, Real) {
    let x = interior_sum(patch, patch.momentum_x());
    let y = patch.momentum_y().map_or(0.0, |hv| interior_sum(patch, hv));
    (x, y)
}

/// Snapshot of conserved totals and solution bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    /// Water volume
    pub total_mass: Real,
    /// Total x-momentum
    pub momentum_x: Real,
    /// Total y-momentum
    pub momentum_y: Real,
    /// Smallest water height among wet cells
    pub min_height: Real,
    /// Largest water height
    pub max_height: Real,
    /// Largest particle speed |u|
    pub max_velocity: Real,
    /// Number of wet interior cells
    pub wet_cells: usize,
}

impl Diagnostics {
    /// Compute diagnostics for a patch with cells of `cell_size` meters.
    pub fn compute<P: WavePropagation + ?Sized>(patch: &P, cell_size: Real) -> Self {
        let area = if patch.momentum_y().is_some() {
            cell_size * cell_size
        } else {
            cell_size
        };

        let h = patch.height();
        let hu = patch.momentum_x();
        let hv = patch.momentum_y();

        let mut min_height = Real::INFINITY;
        let mut max_height: Real = 0.0;
        let mut max_velocity: Real = 0.0;
        let mut wet_cells = 0;

        for iy in 0..patch.ny() {
            for ix in 0..patch.nx() {
                let i = patch.cell_index(ix, iy);
                if h[i] <= 0.0 {
                    continue;
                }
                wet_cells += 1;
                min_height = min_height.min(h[i]);
                max_height = max_height.max(h[i]);

                let v = hv.map_or(0.0, |hv| hv[i]);
                let speed = (hu[i] * hu[i] + v * v).sqrt() / h[i];
                max_velocity = max_velocity.max(speed);
            }
        }

        let (momentum_x, momentum_y) = total_momentum(patch);
        Self {
            total_mass: total_mass(patch) * area,
            momentum_x: momentum_x * area,
            momentum_y: momentum_y * area,
            min_height: if wet_cells > 0 { min_height } else { 0.0 },
            max_height,
            max_velocity,
            wet_cells,
        }
    }

    /// Whether every quantity is finite.
    pub fn is_finite(&self) -> bool {
        self.total_mass.is_finite()
            && self.momentum_x.is_finite()
            && self.momentum_y.is_finite()
            && self.max_height.is_finite()
            && self.max_velocity.is_finite()
    }

    /// Relative change in mass against `initial`.
    pub fn mass_error(&self, initial: &Diagnostics) -> Real {
        if initial.total_mass.abs() > 1e-14 {
            (self.total_mass - initial.total_mass).abs() / initial.total_mass.abs()
        } else {
            (self.total_mass - initial.total_mass).abs()
        }
    }

    /// Format as a single-line summary.
    pub fn summary_line(&self) -> String {
        format!(
            "M={:.4e} P=({:.3e},{:.3e}) h=[{:.3},{:.3}] |u|_max={:.3} wet={}",
            self.total_mass,
            self.momentum_x,
            self.momentum_y,
            self.min_height,
            self.max_height,
            self.max_velocity,
            self.wet_cells
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::WavePropagation2D;
    use approx::assert_relative_eq;

    #[test]
    fn test_totals_skip_ghost_cells() {
        let mut patch = WavePropagation2D::new(3, 2);
        for iy in 0..2 {
            for ix in 0..3 {
                patch.set_height(ix, iy, 1.0 + ix as Real);
                patch.set_momentum_y(ix, iy, -1.0);
            }
        }
        patch.set_ghost_outflow();

        assert_relative_eq!(total_mass(&patch), 12.0);
        assert_eq!(total_momentum(&patch), (0.0, -6.0));
    }

    #[test]
    fn test_compute_bounds() {
        let mut patch = WavePropagation2D::new(2, 2);
        patch.set_height(0, 0, 4.0);
        patch.set_momentum_x(0, 0, 12.0);
        patch.set_momentum_y(0, 0, 16.0);
        patch.set_height(1, 1, 1.0);

        let diag = Diagnostics::compute(&patch, 10.0);
        assert_relative_eq!(diag.total_mass, 500.0);
        assert_relative_eq!(diag.max_velocity, 5.0);
        assert_eq!(diag.min_height, 1.0);
        assert_eq!(diag.max_height, 4.0);
        assert_eq!(diag.wet_cells, 2);
        assert!(diag.is_finite());
        assert_eq!(diag.mass_error(&diag), 0.0);
    }
}
