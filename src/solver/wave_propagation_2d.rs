//! Two-dimensional wave propagation patch with dimensional splitting.
//!
//! A step runs an x-sweep over every row, commits, then a y-sweep over
//! every column that starts from the x-updated heights. Both sweeps cover
//! the ghost ring too; ghost values are only meaningful after
//! `set_ghost_outflow()`.

use crate::boundary::{GhostCondition, Outflow};
use crate::flux::{RiemannSolver, StandardSolver};
use crate::setup::{Setup, cell_coordinate};
use crate::time::{CflConfig, max_wave_speed_2d};
use crate::types::{GridExtent, Real};

use super::WavePropagation;
use super::error::{GridError, check_len};
use super::state::DoubleBuffer;
use super::sweep::{for_each_row, sweep_line, sweep_row_y};

/// Rectangular patch of `nx × ny` cells surrounded by one ghost layer.
#[derive(Clone, Debug)]
pub struct WavePropagation2D<S: RiemannSolver = StandardSolver> {
    extent: GridExtent,
    h: DoubleBuffer,
    hu: DoubleBuffer,
    hv: DoubleBuffer,
    b: Vec<Real>,
    solver: S,
    cfl: CflConfig,
}

impl WavePropagation2D<StandardSolver> {
    /// Create an `nx × ny` patch with all fields zero, using the F-Wave solver.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self::with_solver(nx, ny, StandardSolver::default())
    }
}

impl<S: RiemannSolver> WavePropagation2D<S> {
    /// Create a zero-initialised patch with the given solver.
    ///
    /// # Panics
    ///
    /// Panics if `nx` or `ny` is zero.
    pub fn with_solver(nx: usize, ny: usize, solver: S) -> Self {
        let extent = GridExtent::new(nx, ny);
        let len = extent.len();
        Self {
            extent,
            h: DoubleBuffer::new(len, 0.0),
            hu: DoubleBuffer::new(len, 0.0),
            hv: DoubleBuffer::new(len, 0.0),
            b: vec![0.0; len],
            solver,
            cfl: CflConfig::two_d(),
        }
    }

    /// Create a patch and evaluate `setup` at every cell, ghosts included.
    pub fn from_setup(
        nx: usize,
        ny: usize,
        setup: &dyn Setup,
        scale_x: Real,
        scale_y: Real,
        solver: S,
    ) -> Self {
        let mut patch = Self::with_solver(nx, ny, solver);
        patch.init_with_setup(setup, scale_x, scale_y);
        patch
    }

    /// Adopt ghost-inclusive arrays, e.g. from a checkpoint.
    ///
    /// Each array must hold `(nx + 2) · (ny + 2)` values.
    pub fn from_raw(
        extent: GridExtent,
        h: Vec<Real>,
        hu: Vec<Real>,
        hv: Vec<Real>,
        b: Vec<Real>,
        solver: S,
    ) -> Result<Self, GridError> {
        let len = extent.len();
        check_len("height", &h, len)?;
        check_len("momentum_x", &hu, len)?;
        check_len("momentum_y", &hv, len)?;
        check_len("bathymetry", &b, len)?;

        Ok(Self {
            extent,
            h: DoubleBuffer::from_vec(h),
            hu: DoubleBuffer::from_vec(hu),
            hv: DoubleBuffer::from_vec(hv),
            b,
            solver,
            cfl: CflConfig::two_d(),
        })
    }

    /// Overwrite the state with `setup` evaluated at cell centers
    /// `((gx − 0.5) · scale_x, (gy − 0.5) · scale_y)`.
    ///
    /// The stored bathymetry includes the setup's displacement.
    pub fn init_with_setup(&mut self, setup: &dyn Setup, scale_x: Real, scale_y: Real) {
        let stride = self.extent.stride();
        let h = self.h.current_mut();
        let hu = self.hu.current_mut();
        let hv = self.hv.current_mut();

        for gy in 0..self.extent.rows() {
            let y = cell_coordinate(gy, scale_y);
            for gx in 0..stride {
                let x = cell_coordinate(gx, scale_x);
                let i = gy * stride + gx;
                h[i] = setup.height(x, y);
                hu[i] = setup.momentum_x(x, y);
                hv[i] = setup.momentum_y(x, y);
                self.b[i] = setup.bathymetry(x, y) + setup.displacement(x, y);
            }
        }
    }

    /// Use a different CFL factor.
    pub fn with_cfl(mut self, cfl: CflConfig) -> Self {
        self.cfl = cfl;
        self
    }

    /// Extent of the patch.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// The Riemann solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    fn sweep_x(&mut self, scaling: Real) {
        let stride = self.extent.stride();
        let (h_old, h_new) = self.h.split();
        let (hu_old, hu_new) = self.hu.split();
        let b = self.b.as_slice();
        let solver = &self.solver;

        for_each_row(h_new, hu_new, stride, |row, h_row, hu_row| {
            let line = row * stride..(row + 1) * stride;
            sweep_line(
                solver,
                scaling,
                &h_old[line.clone()],
                &hu_old[line.clone()],
                &b[line],
                h_row,
                hu_row,
                0..stride - 1,
            );
        });

        self.h.commit();
        self.hu.commit();
    }

    fn sweep_y(&mut self, scaling: Real) {
        let stride = self.extent.stride();
        let rows = self.extent.rows();
        let (h_old, h_new) = self.h.split();
        let (hv_old, hv_new) = self.hv.split();
        let b = self.b.as_slice();
        let solver = &self.solver;

        for_each_row(h_new, hv_new, stride, |iy, h_row, hv_row| {
            sweep_row_y(solver, scaling, stride, rows, iy, h_old, hv_old, b, h_row, hv_row);
        });

        self.h.commit();
        self.hv.commit();
    }
}

impl<S: RiemannSolver> WavePropagation for WavePropagation2D<S> {
    fn time_step(&mut self, scaling: Real) {
        self.sweep_x(scaling);
        self.sweep_y(scaling);
    }

    fn compute_max_timestep(&self, cell_size: Real) -> Real {
        let speed = max_wave_speed_2d(
            self.extent,
            self.h.current(),
            self.hu.current(),
            self.hv.current(),
        );
        self.cfl.timestep(cell_size, speed)
    }

    fn set_ghost_outflow(&mut self) {
        let extent = self.extent;
        Outflow.fill_grid(extent, self.h.current_mut());
        Outflow.fill_grid(extent, self.hu.current_mut());
        Outflow.fill_grid(extent, self.hv.current_mut());
        Outflow.fill_grid(extent, &mut self.b);
    }

    fn nx(&self) -> usize {
        self.extent.nx()
    }

    fn ny(&self) -> usize {
        self.extent.ny()
    }

    fn stride(&self) -> usize {
        self.extent.stride()
    }

    fn cell_index(&self, ix: usize, iy: usize) -> usize {
        self.extent.index(ix, iy)
    }

    fn height(&self) -> &[Real] {
        self.h.current()
    }

    fn momentum_x(&self) -> &[Real] {
        self.hu.current()
    }

    fn momentum_y(&self) -> Option<&[Real]> {
        Some(self.hv.current())
    }

    fn bathymetry(&self) -> &[Real] {
        &self.b
    }

    fn set_height(&mut self, ix: usize, iy: usize, value: Real) {
        let i = self.extent.index(ix, iy);
        self.h.current_mut()[i] = value;
    }

    fn set_momentum_x(&mut self, ix: usize, iy: usize, value: Real) {
        let i = self.extent.index(ix, iy);
        self.hu.current_mut()[i] = value;
    }

    fn set_momentum_y(&mut self, ix: usize, iy: usize, value: Real) {
        let i = self.extent.index(ix, iy);
        self.hv.current_mut()[i] = value;
    }

    fn set_bathymetry(&mut self, ix: usize, iy: usize, value: Real) {
        let i = self.extent.index(ix, iy);
        self.b[i] = value;
    }

    fn cfl_factor(&self) -> Real {
        self.cfl.factor
    }

    fn solver_name(&self) -> &'static str {
        self.solver.name()
    }
}
