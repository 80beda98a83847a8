//! Outflow (zero-gradient) ghost cells.
//!
//! Every ghost cell receives the value of its nearest interior neighbor, so
//! waves leave the domain without a reflected flux from the boundary
//! interface.

use super::GhostCondition;
use crate::types::{GridExtent, Real};

/// Outflow boundary condition: ghost = nearest interior cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct Outflow;

impl GhostCondition for Outflow {
    fn fill_line(&self, field: &mut [Real]) {
        let n = field.len();
        if n < 3 {
            return;
        }
        field[0] = field[1];
        field[n - 1] = field[n - 2];
    }

    fn fill_grid(&self, extent: GridExtent, field: &mut [Real]) {
        let stride = extent.stride();
        let rows = extent.rows();

        // Left and right columns of interior rows
        for iy in 1..rows - 1 {
            let row = &mut field[iy * stride..(iy + 1) * stride];
            row[0] = row[1];
            row[stride - 1] = row[stride - 2];
        }

        // Bottom and top rows over the full width, corners included
        field.copy_within(stride..2 * stride, 0);
        field.copy_within((rows - 2) * stride..(rows - 1) * stride, (rows - 1) * stride);
    }

    fn name(&self) -> &'static str {
        "outflow"
    }
}
