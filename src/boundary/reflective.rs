//! Reflecting walls synthesized at interfaces next to dry cells.
//!
//! A cell whose bathymetry lies above sea level is an impermeable obstacle.
//! Instead of storing a wall state in the dry cell, every interface that
//! touches one substitutes a mirror of the wet neighbor:
//!
//! - h_wall = h_wet
//! - b_wall = b_wet
//! - hu_wall = -hu_wet
//!
//! This ensures zero normal mass flux through the wall.

use crate::flux::CellState;
use crate::types::Real;

/// Dry predicate: bathymetry strictly above sea level.
///
/// Cells exactly at `b = 0` are wet.
#[inline]
pub fn is_dry(b: Real) -> bool {
    b > 0.0
}

/// Replace the dry side of an interface by a mirror of the wet side.
///
/// If the right cell is dry it mirrors the left one; otherwise, if the left
/// cell is dry, it mirrors the right one.
#[inline]
pub fn reflect_at_interface(left: &mut CellState, right: &mut CellState) {
    if is_dry(right.b) {
        *right = CellState::new(left.h, -left.hu, left.b);
    } else if is_dry(left.b) {
        *left = CellState::new(right.h, -right.hu, right.b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{RiemannSolver, StandardSolver};

    #[test]
    fn test_dry_threshold() {
        assert!(is_dry(20.0));
        assert!(is_dry(1e-9));
        assert!(!is_dry(0.0));
        assert!(!is_dry(-5.0));
    }

    #[test]
    fn test_wall_on_right_mirrors_left() {
        let mut left = CellState::new(10.0, 5.0, -20.0);
        let mut right = CellState::new(0.0, 0.0, 20.0);
        reflect_at_interface(&mut left, &mut right);

        assert_eq!(left, CellState::new(10.0, 5.0, -20.0));
        assert_eq!(right, CellState::new(10.0, -5.0, -20.0));
    }

    #[test]
    fn test_wall_on_left_mirrors_right() {
        let mut left = CellState::new(0.0, 0.0, 5.0);
        let mut right = CellState::new(4.0, -2.0, -4.0);
        reflect_at_interface(&mut left, &mut right);

        assert_eq!(left, CellState::new(4.0, 2.0, -4.0));
    }

    #[test]
    fn test_wet_pair_untouched() {
        let mut left = CellState::new(3.0, 1.0, -3.0);
        let mut right = CellState::new(2.0, 1.0, 0.0);
        reflect_at_interface(&mut left, &mut right);

        assert_eq!(left, CellState::new(3.0, 1.0, -3.0));
        assert_eq!(right, CellState::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_wall_has_no_mass_flux() {
        // Resting water against a wall produces no height change
        let mut left = CellState::new(10.0, 0.0, -10.0);
        let mut right = CellState::new(0.0, 0.0, 10.0);
        reflect_at_interface(&mut left, &mut right);
        let updates = StandardSolver::FWave.net_updates(&left, &right);

        assert_eq!(updates.left.h, 0.0);
        assert_eq!(updates.left.hu, 0.0);
    }
}
