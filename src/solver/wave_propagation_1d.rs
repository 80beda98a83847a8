//! One-dimensional wave propagation patch.

use crate::boundary::{GhostCondition, Outflow};
use crate::flux::{RiemannSolver, StandardSolver};
use crate::setup::{Setup, cell_coordinate};
use crate::time::{CflConfig, max_wave_speed_1d};
use crate::types::Real;

use super::WavePropagation;
use super::state::DoubleBuffer;
use super::sweep::sweep_line;

/// A line of `n` cells with one ghost cell on either side.
///
/// Cell `i` of the interior lives at storage index `i + 1`. Height and
/// momentum are double-buffered; bathymetry is a single array that only
/// setup and boundary code write.
#[derive(Clone, Debug)]
pub struct WavePropagation1D<S: RiemannSolver = StandardSolver> {
    n_cells: usize,
    h: DoubleBuffer,
    hu: DoubleBuffer,
    b: Vec<Real>,
    solver: S,
    cfl: CflConfig,
}

impl WavePropagation1D<StandardSolver> {
    /// Create a patch of `n_cells` with all fields zero, using the F-Wave solver.
    pub fn new(n_cells: usize) -> Self {
        Self::with_solver(n_cells, StandardSolver::default())
    }
}

impl<S: RiemannSolver> WavePropagation1D<S> {
    /// Create a zero-initialised patch with the given solver.
    ///
    /// # Panics
    ///
    /// Panics if `n_cells` is zero.
    pub fn with_solver(n_cells: usize, solver: S) -> Self {
        assert!(n_cells > 0, "n_cells must be positive");
        let len = n_cells + 2;
        Self {
            n_cells,
            h: DoubleBuffer::new(len, 0.0),
            hu: DoubleBuffer::new(len, 0.0),
            b: vec![0.0; len],
            solver,
            cfl: CflConfig::one_d(),
        }
    }

    /// Create a patch and evaluate `setup` at every cell, ghosts included.
    pub fn from_setup(n_cells: usize, setup: &dyn Setup, scale: Real, solver: S) -> Self {
        let mut patch = Self::with_solver(n_cells, solver);
        patch.init_with_setup(setup, scale);
        patch
    }

    /// Overwrite the state with `setup` evaluated at `x = (i − 0.5) · scale`.
    ///
    /// The stored bathymetry includes the setup's displacement.
    pub fn init_with_setup(&mut self, setup: &dyn Setup, scale: Real) {
        let h = self.h.current_mut();
        let hu = self.hu.current_mut();
        for (i, ((h, hu), b)) in h.iter_mut().zip(hu.iter_mut()).zip(self.b.iter_mut()).enumerate() {
            let x = cell_coordinate(i, scale);
            *h = setup.height(x, 0.0);
            *hu = setup.momentum_x(x, 0.0);
            *b = setup.bathymetry(x, 0.0) + setup.displacement(x, 0.0);
        }
    }

    /// Use a different CFL factor.
    pub fn with_cfl(mut self, cfl: CflConfig) -> Self {
        self.cfl = cfl;
        self
    }

    /// The Riemann solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Interfaces within `radius` of the center interface.
    fn radius_edges(&self, radius: usize) -> std::ops::Range<usize> {
        let mid = self.n_cells / 2 + 1;
        mid.saturating_sub(radius)..(mid + radius).min(self.n_cells + 1)
    }

    /// Advance one step, updating only interfaces within `radius` of the center.
    ///
    /// Cells outside the touched range keep their values. Used for initial
    /// waves that have not yet spread across the whole line.
    pub fn time_step_radius(&mut self, scaling: Real, radius: usize) {
        let edges = self.radius_edges(radius);
        self.sweep(scaling, edges);
    }

    /// Stable time step over the cells within `radius` of the center.
    pub fn compute_max_timestep_radius(&self, cell_size: Real, radius: usize) -> Real {
        let half = self.n_cells / 2;
        let cells = half.saturating_sub(radius) + 1..(half + radius).min(self.n_cells) + 1;
        let speed = max_wave_speed_1d(self.h.current(), self.hu.current(), cells);
        self.cfl.timestep(cell_size, speed)
    }

    fn sweep(&mut self, scaling: Real, edges: std::ops::Range<usize>) {
        let (h_old, h_new) = self.h.split();
        let (hu_old, hu_new) = self.hu.split();
        sweep_line(&self.solver, scaling, h_old, hu_old, &self.b, h_new, hu_new, edges);
        self.h.commit();
        self.hu.commit();
    }
}

impl<S: RiemannSolver> WavePropagation for WavePropagation1D<S> {
    fn time_step(&mut self, scaling: Real) {
        self.sweep(scaling, 0..self.n_cells + 1);
    }

    fn compute_max_timestep(&self, cell_size: Real) -> Real {
        let speed = max_wave_speed_1d(self.h.current(), self.hu.current(), 1..self.n_cells + 1);
        self.cfl.timestep(cell_size, speed)
    }

    fn set_ghost_outflow(&mut self) {
        Outflow.fill_line(self.h.current_mut());
        Outflow.fill_line(self.hu.current_mut());
        Outflow.fill_line(&mut self.b);
    }

    fn nx(&self) -> usize {
        self.n_cells
    }

    fn ny(&self) -> usize {
        1
    }

    fn stride(&self) -> usize {
        self.n_cells + 2
    }

    fn cell_index(&self, ix: usize, _iy: usize) -> usize {
        ix + 1
    }

    fn height(&self) -> &[Real] {
        self.h.current()
    }

    fn momentum_x(&self) -> &[Real] {
        self.hu.current()
    }

    fn momentum_y(&self) -> Option<&[Real]> {
        None
    }

    fn bathymetry(&self) -> &[Real] {
        &self.b
    }

    fn set_height(&mut self, ix: usize, _iy: usize, value: Real) {
        self.h.current_mut()[ix + 1] = value;
    }

    fn set_momentum_x(&mut self, ix: usize, _iy: usize, value: Real) {
        self.hu.current_mut()[ix + 1] = value;
    }

    fn set_momentum_y(&mut self, _ix: usize, _iy: usize, _value: Real) {}

    fn set_bathymetry(&mut self, ix: usize, _iy: usize, value: Real) {
        self.b[ix + 1] = value;
    }

    fn cfl_factor(&self) -> Real {
        self.cfl.factor
    }

    fn solver_name(&self) -> &'static str {
        self.solver.name()
    }
}
