//! Roe approximate Riemann solver in net-update form.
//!
//! The Roe solver linearizes the Riemann problem at each interface using
//! Roe-averaged states and decomposes the jump in the conserved variables:
//!
//! Δq = Σ α_i r_i,    A⁻Δq = Σ_{λ_i<0} λ_i α_i r_i,    A⁺Δq = Σ_{λ_i≥0} λ_i α_i r_i
//!
//! Bathymetry is ignored; use it for flat-bottom problems and as a
//! regression baseline for the F-Wave solver.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use super::fwave::{has_fluid, roe_wave_speeds, wave_strengths};
use super::state::{CellState, NetUpdate, NetUpdates};
use crate::types::Real;

/// Roe net updates across one interface.
///
/// # Arguments
/// * `left` - Left state (bathymetry ignored)
/// * `right` - Right state (bathymetry ignored)
/// * `g` - Gravitational acceleration
pub fn roe_net_updates(left: &CellState, right: &CellState, g: Real) -> NetUpdates {
    if !has_fluid(left, right) {
        return NetUpdates::zero();
    }

    let (lambda_1, lambda_2) = roe_wave_speeds(left, right, g);

    let delta_q = [right.h - left.h, right.hu - left.hu];
    let (alpha_1, alpha_2) = wave_strengths(delta_q, lambda_1, lambda_2);

    let mut updates = NetUpdates::zero();
    let s1 = alpha_1 * lambda_1;
    let s2 = alpha_2 * lambda_2;
    updates.add_wave(lambda_1, NetUpdate::new(s1, s1 * lambda_1));
    updates.add_wave(lambda_2, NetUpdate::new(s2, s2 * lambda_2));
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRAVITY;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const G: Real = GRAVITY;
    const TOL: Real = 1e-5;

    #[test]
    fn test_roe_wave_speeds() {
        let left = CellState::flat(10.0, -30.0);
        let right = CellState::flat(9.0, 27.0);
        let (l1, l2) = roe_wave_speeds(&left, &right, G);

        assert_relative_eq!(l1, -9.7311093998375095, max_relative = TOL);
        assert_relative_eq!(l2, 9.5731051658991654, max_relative = TOL);
    }

    #[test]
    fn test_roe_wave_strengths() {
        let left = CellState::flat(10.0, -30.0);
        let right = CellState::flat(9.0, 27.0);
        let (l1, l2) = roe_wave_speeds(&left, &right, G);
        let (a1, a2) = wave_strengths([right.h - left.h, right.hu - left.hu], l1, l2);

        assert_relative_eq!(a1, -3.4486306054668869, max_relative = TOL);
        assert_relative_eq!(a2, 2.4486306054668869, max_relative = TOL);
    }

    #[test]
    fn test_roe_net_updates_supercritical_jump() {
        let updates = roe_net_updates(&CellState::flat(10.0, -30.0), &CellState::flat(9.0, 27.0), G);

        assert_relative_eq!(updates.left.h, 33.5590017014261447899292, max_relative = TOL);
        assert_relative_eq!(updates.left.hu, -326.56631690591093200508, max_relative = TOL);
        assert_relative_eq!(updates.right.h, 23.4409982985738561366777, max_relative = TOL);
        assert_relative_eq!(updates.right.hu, 224.403141905910928927533, max_relative = TOL);
    }

    #[test]
    fn test_roe_dam_break() {
        let updates = roe_net_updates(&CellState::flat(10.0, 0.0), &CellState::flat(8.0, 0.0), G);

        assert_relative_eq!(updates.left.h, 9.394671362, max_relative = TOL);
        assert_relative_eq!(updates.left.hu, -88.25985, max_relative = TOL);
        assert_relative_eq!(updates.right.h, -9.394671362, max_relative = TOL);
        assert_relative_eq!(updates.right.hu, -88.25985, max_relative = TOL);
    }

    #[test]
    fn test_roe_steady_state() {
        let q = CellState::flat(10.0, 0.0);
        let updates = roe_net_updates(&q, &q, G);

        assert_abs_diff_eq!(updates.left.h, 0.0);
        assert_abs_diff_eq!(updates.left.hu, 0.0);
        assert_abs_diff_eq!(updates.right.h, 0.0);
        assert_abs_diff_eq!(updates.right.hu, 0.0);
    }

    #[test]
    fn test_roe_swap_negates_updates() {
        let left = CellState::flat(10.0, 0.0);
        let right = CellState::flat(8.0, 0.0);
        let updates = roe_net_updates(&left, &right, G);
        let swapped = roe_net_updates(&right, &left, G);

        assert_relative_eq!(swapped.left.h, -updates.left.h, max_relative = 1e-12);
        assert_relative_eq!(swapped.left.hu, -updates.left.hu, max_relative = 1e-12);
        assert_relative_eq!(swapped.right.h, -updates.right.h, max_relative = 1e-12);
        assert_relative_eq!(swapped.right.hu, -updates.right.hu, max_relative = 1e-12);
    }

    #[test]
    fn test_roe_ignores_bathymetry() {
        let flat = roe_net_updates(&CellState::flat(10.0, 1.0), &CellState::flat(8.0, 0.0), G);
        let sloped = roe_net_updates(
            &CellState::new(10.0, 1.0, -10.0),
            &CellState::new(8.0, 0.0, -3.0),
            G,
        );
        assert_eq!(flat, sloped);
    }

    #[test]
    fn test_roe_agrees_with_fwave_on_flat_bottom() {
        // Both solvers coincide for a flat bottom without momentum
        let left = CellState::flat(10.0, 0.0);
        let right = CellState::flat(8.0, 0.0);
        let roe = roe_net_updates(&left, &right, G);
        let fwave = crate::flux::fwave_net_updates(&left, &right, G);

        assert_relative_eq!(roe.left.h, fwave.left.h, max_relative = 1e-10);
        assert_relative_eq!(roe.right.hu, fwave.right.hu, max_relative = 1e-10);
    }
}
