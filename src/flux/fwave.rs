//! F-Wave approximate Riemann solver for the 1D shallow water equations.
//!
//! The F-Wave method decomposes the jump in the physical flux, rather than
//! the jump in the state, onto the eigenvectors of the Roe-averaged Jacobian:
//!
//! Δf = Σ α_i r_i,    r_i = [1, λ_i]^T
//!
//! The bathymetry source term `g h̄ (b_R - b_L)` is folded into the momentum
//! component of Δf, which keeps lake-at-rest states exactly balanced.
//!
//! Reference: Bale, LeVeque, Mitran, Rossmanith, "A wave propagation method
//! for conservation laws and balance laws with spatially varying flux functions"

use super::state::{CellState, NetUpdate, NetUpdates};
use crate::types::Real;

/// True if the pair holds fluid that the solvers can process.
#[inline]
pub(crate) fn has_fluid(left: &CellState, right: &CellState) -> bool {
    left.h >= 0.0 && right.h >= 0.0 && left.h + right.h > 0.0
}

/// Roe-averaged eigenvalues (λ₁, λ₂) = ū ∓ √(g h̄).
///
/// The caller must ensure `h_L + h_R > 0`.
#[inline]
pub fn roe_wave_speeds(left: &CellState, right: &CellState, g: Real) -> (Real, Real) {
    let h_roe = 0.5 * (left.h + right.h);
    let sqrt_h_l = left.h.sqrt();
    let sqrt_h_r = right.h.sqrt();
    let u_roe = (left.velocity() * sqrt_h_l + right.velocity() * sqrt_h_r) / (sqrt_h_l + sqrt_h_r);
    let c = (g * h_roe).sqrt();
    (u_roe - c, u_roe + c)
}

/// Decompose a jump onto the eigenvectors [1, λ₁] and [1, λ₂].
///
/// Uses the closed-form inverse of the 2×2 eigenvector matrix:
///
/// ```text
/// R⁻¹ = 1/(λ₂ - λ₁) · |  λ₂  -1 |
///                      | -λ₁   1 |
/// ```
#[inline]
pub fn wave_strengths(jump: [Real; 2], lambda_1: Real, lambda_2: Real) -> (Real, Real) {
    let inv_det = 1.0 / (lambda_2 - lambda_1);
    let alpha_1 = inv_det * (lambda_2 * jump[0] - jump[1]);
    let alpha_2 = inv_det * (jump[1] - lambda_1 * jump[0]);
    (alpha_1, alpha_2)
}

/// F-Wave net updates across one interface.
///
/// # Arguments
/// * `left` - Left state (h, hu, b)
/// * `right` - Right state (h, hu, b)
/// * `g` - Gravitational acceleration
///
/// # Returns
/// Net updates for the left and right cell. Degenerate input (no fluid on
/// either side, or a negative height) yields zero updates.
pub fn fwave_net_updates(left: &CellState, right: &CellState, g: Real) -> NetUpdates {
    if !has_fluid(left, right) {
        return NetUpdates::zero();
    }

    let (lambda_1, lambda_2) = roe_wave_speeds(left, right, g);
    let h_roe = 0.5 * (left.h + right.h);

    let u_l = left.velocity();
    let u_r = right.velocity();

    // Flux jump with bathymetry source term
    let delta_f = [
        right.hu - left.hu,
        right.hu * u_r - left.hu * u_l
            + 0.5 * g * (right.h * right.h - left.h * left.h)
            + g * h_roe * (right.b - left.b),
    ];

    let (alpha_1, alpha_2) = wave_strengths(delta_f, lambda_1, lambda_2);

    let mut updates = NetUpdates::zero();
    updates.add_wave(lambda_1, NetUpdate::new(alpha_1, alpha_1 * lambda_1));
    updates.add_wave(lambda_2, NetUpdate::new(alpha_2, alpha_2 * lambda_2));
    updates
}
