//! Common interface of the 1D and 2D wave propagation patches.

use crate::types::Real;

use super::diagnostics;

/// A ghost-padded patch advanced by explicit finite-volume steps.
///
/// All field accessors return the whole active buffer, ghost cells included;
/// interior cell `(ix, iy)` lives at [`cell_index`](Self::cell_index). A
/// borrowed view stays valid until the next mutating call.
///
/// One step of a driver loop is:
///
/// ```
/// use wave_rs::solver::{WavePropagation, WavePropagation2D};
///
/// let mut patch = WavePropagation2D::new(8, 8);
/// for iy in 0..8 {
///     for ix in 0..8 {
///         patch.set_height(ix, iy, if ix < 4 { 10.0 } else { 8.0 });
///     }
/// }
///
/// let dt = patch.compute_max_timestep(1.0);
/// patch.set_ghost_outflow();
/// patch.time_step(dt / 1.0);
/// ```
pub trait WavePropagation: Send {
    /// Advance one step with `scaling = dt / dx`.
    ///
    /// Ghost cells are not refreshed; call
    /// [`set_ghost_outflow`](Self::set_ghost_outflow) first.
    fn time_step(&mut self, scaling: Real);

    /// Largest stable time step for cells of `cell_size` meters.
    ///
    /// Returns `+∞` when no wet cell exists and NaN if the state holds NaN.
    fn compute_max_timestep(&self, cell_size: Real) -> Real;

    /// Copy the boundary-adjacent interior cells into the ghost cells.
    fn set_ghost_outflow(&mut self);

    /// Interior cells in x-direction.
    fn nx(&self) -> usize;

    /// Interior cells in y-direction (1 for 1D patches).
    fn ny(&self) -> usize;

    /// Distance between vertically adjacent cells in storage.
    fn stride(&self) -> usize;

    /// Storage index of interior cell `(ix, iy)`.
    fn cell_index(&self, ix: usize, iy: usize) -> usize;

    /// Water heights of the active buffer.
    fn height(&self) -> &[Real];

    /// x-momenta of the active buffer.
    fn momentum_x(&self) -> &[Real];

    /// y-momenta of the active buffer; `None` for 1D patches.
    fn momentum_y(&self) -> Option<&[Real]>;

    /// Bathymetry (single buffer).
    fn bathymetry(&self) -> &[Real];

    /// Set the water height of interior cell `(ix, iy)`.
    fn set_height(&mut self, ix: usize, iy: usize, value: Real);

    /// Set the x-momentum of interior cell `(ix, iy)`.
    fn set_momentum_x(&mut self, ix: usize, iy: usize, value: Real);

    /// Set the y-momentum of interior cell `(ix, iy)`; ignored in 1D.
    fn set_momentum_y(&mut self, ix: usize, iy: usize, value: Real);

    /// Set the bathymetry of interior cell `(ix, iy)`.
    fn set_bathymetry(&mut self, ix: usize, iy: usize, value: Real);

    /// CFL safety factor used by [`compute_max_timestep`](Self::compute_max_timestep).
    fn cfl_factor(&self) -> Real;

    /// Name of the Riemann solver in use.
    fn solver_name(&self) -> &'static str;

    /// Sum of water heights over interior cells.
    fn total_mass(&self) -> Real {
        diagnostics::total_mass(self)
    }

    /// Sums of `(hu, hv)` over interior cells; `hv` is zero in 1D.
    fn total_momentum(&self) -> (Real, Real) {
        diagnostics::total_momentum(self)
    }
}
