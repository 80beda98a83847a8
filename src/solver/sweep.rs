//! Interface sweeps shared by the 1D and 2D patches.
//!
//! Every sweep reads the old slot of a [`DoubleBuffer`](super::state::DoubleBuffer)
//! and writes the new one. Interface `e` of a line separates cells `e` and
//! `e + 1`; its left update goes to cell `e`, its right update to cell `e + 1`.
//! Cells that are dry themselves are written as zero.

use std::ops::Range;

use crate::boundary::{is_dry, reflect_at_interface};
use crate::flux::{CellState, NetUpdate, NetUpdates, RiemannSolver};
use crate::types::Real;

/// Net updates of one interface with dry-wall reflection applied.
#[inline]
pub(crate) fn interface_updates<S: RiemannSolver + ?Sized>(
    solver: &S,
    mut left: CellState,
    mut right: CellState,
) -> NetUpdates {
    reflect_at_interface(&mut left, &mut right);
    solver.net_updates(&left, &right)
}

#[inline]
fn apply_update(
    h_new: &mut [Real],
    hu_new: &mut [Real],
    b: &[Real],
    cell: usize,
    update: NetUpdate,
    scaling: Real,
) {
    if is_dry(b[cell]) {
        h_new[cell] = 0.0;
        hu_new[cell] = 0.0;
    } else {
        h_new[cell] -= scaling * update.h;
        hu_new[cell] -= scaling * update.hu;
    }
}

/// Sweep the interfaces `edges` of one contiguous line of cells.
///
/// The new line starts as a copy of the old one, so cells no interface in
/// `edges` touches keep their old values.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sweep_line<S: RiemannSolver + ?Sized>(
    solver: &S,
    scaling: Real,
    h_old: &[Real],
    hu_old: &[Real],
    b: &[Real],
    h_new: &mut [Real],
    hu_new: &mut [Real],
    edges: Range<usize>,
) {
    h_new.copy_from_slice(h_old);
    hu_new.copy_from_slice(hu_old);

    for edge in edges {
        let (l, r) = (edge, edge + 1);
        let updates = interface_updates(
            solver,
            CellState::new(h_old[l], hu_old[l], b[l]),
            CellState::new(h_old[r], hu_old[r], b[r]),
        );
        apply_update(h_new, hu_new, b, l, updates.left, scaling);
        apply_update(h_new, hu_new, b, r, updates.right, scaling);
    }
}

/// Compute row `iy` of a y-sweep over a ghost-padded grid.
///
/// Each cell gathers the right update of the interface below and the left
/// update of the interface above it, so a task writes only its own row.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sweep_row_y<S: RiemannSolver + ?Sized>(
    solver: &S,
    scaling: Real,
    stride: usize,
    rows: usize,
    iy: usize,
    h_old: &[Real],
    hv_old: &[Real],
    b: &[Real],
    h_row: &mut [Real],
    hv_row: &mut [Real],
) {
    let state = |i: usize| CellState::new(h_old[i], hv_old[i], b[i]);

    for ix in 0..stride {
        let c = iy * stride + ix;
        if is_dry(b[c]) {
            h_row[ix] = 0.0;
            hv_row[ix] = 0.0;
            continue;
        }

        let mut h = h_old[c];
        let mut hv = hv_old[c];

        if iy > 0 {
            let below = interface_updates(solver, state(c - stride), state(c));
            h -= scaling * below.right.h;
            hv -= scaling * below.right.hu;
        }
        if iy + 1 < rows {
            let above = interface_updates(solver, state(c), state(c + stride));
            h -= scaling * above.left.h;
            hv -= scaling * above.left.hu;
        }

        h_row[ix] = h;
        hv_row[ix] = hv;
    }
}

/// Run `f(row, a_row, b_row)` for every row of two equally sized fields.
///
/// Rows are processed concurrently with the `parallel` feature.
pub(crate) fn for_each_row<F>(a: &mut [Real], b: &mut [Real], stride: usize, f: F)
where
    F: Fn(usize, &mut [Real], &mut [Real]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        a.par_chunks_mut(stride)
            .zip(b.par_chunks_mut(stride))
            .enumerate()
            .for_each(|(row, (a_row, b_row))| f(row, a_row, b_row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        a.chunks_mut(stride)
            .zip(b.chunks_mut(stride))
            .enumerate()
            .for_each(|(row, (a_row, b_row))| f(row, a_row, b_row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::StandardSolver;

    #[test]
    fn test_sweep_line_conserves_interior_mass() {
        let h_old = vec![5.0, 5.0, 4.0, 3.0, 2.0, 2.0];
        let hu_old = vec![0.0; 6];
        let b = vec![0.0; 6];
        let mut h_new = vec![0.0; 6];
        let mut hu_new = vec![0.0; 6];

        sweep_line(
            &StandardSolver::FWave,
            0.05,
            &h_old,
            &hu_old,
            &b,
            &mut h_new,
            &mut hu_new,
            0..5,
        );

        // Boundary interfaces see equal states, so mass only moves inside
        let before: Real = h_old[1..5].iter().sum();
        let after: Real = h_new[1..5].iter().sum();
        approx::assert_relative_eq!(before, after, max_relative = 1e-12);
    }

    #[test]
    fn test_sweep_line_zeroes_dry_cells() {
        let h_old = vec![10.0, 10.0, 3.0, 10.0];
        let hu_old = vec![1.0, 1.0, 1.0, 1.0];
        let b = vec![-10.0, -10.0, 5.0, -10.0];
        let mut h_new = vec![0.0; 4];
        let mut hu_new = vec![0.0; 4];

        sweep_line(
            &StandardSolver::FWave,
            0.01,
            &h_old,
            &hu_old,
            &b,
            &mut h_new,
            &mut hu_new,
            0..3,
        );

        assert_eq!(h_new[2], 0.0);
        assert_eq!(hu_new[2], 0.0);
        assert!(h_new[1] > 10.0, "water piles up in front of the wall");
    }

    #[test]
    fn test_sweep_line_outside_edges_untouched() {
        let h_old = vec![1.0, 9.0, 1.0, 9.0, 1.0];
        let hu_old = vec![0.0; 5];
        let b = vec![0.0; 5];
        let mut h_new = vec![-1.0; 5];
        let mut hu_new = vec![-1.0; 5];

        sweep_line(
            &StandardSolver::Roe,
            0.1,
            &h_old,
            &hu_old,
            &b,
            &mut h_new,
            &mut hu_new,
            1..2,
        );

        assert_eq!(h_new[0], 1.0);
        assert_eq!(h_new[3], 9.0);
        assert_eq!(h_new[4], 1.0);
        assert!(h_new[1] < 9.0);
        assert!(h_new[2] > 1.0);
    }
}
