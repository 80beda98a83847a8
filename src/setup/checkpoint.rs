//! Setup backed by stored ghost-inclusive arrays.

use super::Setup;
use crate::types::{GridExtent, Real};

/// Replays stored cell arrays as an initial condition.
///
/// Coordinates map back to ghost-inclusive storage indices through
/// `round(x / cell_size + 0.5)`, the inverse of the cell-center placement
/// used by the patches, and are clamped to the stored range. Evaluating the
/// setup on a patch of the same extent and cell size reproduces the arrays
/// exactly, ghost cells included.
///
/// Restoring a checkpoint normally goes through `WavePropagation2D::from_raw`;
/// this setup exists for resampling onto a patch built by other means.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointSetup {
    extent: GridExtent,
    cell_size: Real,
    h: Vec<Real>,
    hu: Vec<Real>,
    hv: Vec<Real>,
    b: Vec<Real>,
}

impl CheckpointSetup {
    /// Wrap stored arrays. Returns `None` if any array length differs from `extent.len()`.
    pub fn new(
        extent: GridExtent,
        cell_size: Real,
        h: Vec<Real>,
        hu: Vec<Real>,
        hv: Vec<Real>,
        b: Vec<Real>,
    ) -> Option<Self> {
        let n = extent.len();
        if [h.len(), hu.len(), hv.len(), b.len()].iter().any(|&len| len != n) {
            return None;
        }
        Some(Self {
            extent,
            cell_size,
            h,
            hu,
            hv,
            b,
        })
    }

    /// Extent of the stored arrays.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    fn storage_index(&self, x: Real, y: Real) -> usize {
        let axis = |coord: Real, n: usize| -> usize {
            let idx = (coord / self.cell_size + 0.5).round();
            if idx.is_nan() || idx < 0.0 {
                0
            } else {
                (idx as usize).min(n - 1)
            }
        };
        let gx = axis(x, self.extent.stride());
        let gy = axis(y, self.extent.rows());
        self.extent.raw_index(gx, gy)
    }
}

impl Setup for CheckpointSetup {
    fn height(&self, x: Real, y: Real) -> Real {
        self.h[self.storage_index(x, y)]
    }

    fn momentum_x(&self, x: Real, y: Real) -> Real {
        self.hu[self.storage_index(x, y)]
    }

    fn momentum_y(&self, x: Real, y: Real) -> Real {
        self.hv[self.storage_index(x, y)]
    }

    fn bathymetry(&self, x: Real, y: Real) -> Real {
        self.b[self.storage_index(x, y)]
    }

    fn name(&self) -> &'static str {
        "checkpoint"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::cell_coordinate;

    fn numbered(extent: GridExtent) -> CheckpointSetup {
        let n = extent.len();
        let ramp: Vec<Real> = (0..n).map(|i| i as Real).collect();
        CheckpointSetup::new(
            extent,
            25.0,
            ramp.clone(),
            ramp.iter().map(|v| -v).collect(),
            ramp.iter().map(|v| 2.0 * v).collect(),
            vec![-1.0; n],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_reproduces_every_cell() {
        let extent = GridExtent::new(4, 3);
        let setup = numbered(extent);

        for gy in 0..extent.rows() {
            for gx in 0..extent.stride() {
                let x = cell_coordinate(gx, 25.0);
                let y = cell_coordinate(gy, 25.0);
                let k = extent.raw_index(gx, gy) as Real;
                assert_eq!(setup.height(x, y), k);
                assert_eq!(setup.momentum_x(x, y), -k);
                assert_eq!(setup.momentum_y(x, y), 2.0 * k);
                assert_eq!(setup.bathymetry(x, y), -1.0);
                assert_eq!(setup.displacement(x, y), 0.0);
            }
        }
    }

    #[test]
    fn test_lookup_clamps() {
        let extent = GridExtent::new(4, 3);
        let setup = numbered(extent);

        assert_eq!(setup.height(-1.0e5, -1.0e5), 0.0);
        assert_eq!(setup.height(1.0e5, 1.0e5), (extent.len() - 1) as Real);
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        let extent = GridExtent::new(2, 2);
        let ok = vec![0.0; extent.len()];
        assert!(CheckpointSetup::new(extent, 1.0, ok.clone(), ok.clone(), vec![0.0; 3], ok).is_none());
    }
}
