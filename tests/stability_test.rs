//! Property tests for CFL step control and ghost cells.
//!
//! States are drawn from a small deterministic generator so failures
//! reproduce exactly.

use wave_rs::flux::StandardSolver;
use wave_rs::solver::{WavePropagation, WavePropagation1D, WavePropagation2D};
use wave_rs::time::{CFL_1D, CFL_2D};
use wave_rs::types::Real;

/// Linear congruential generator (Knuth MMIX constants).
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> Real {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as Real / (1u64 << 53) as Real
    }

    fn range(&mut self, lo: Real, hi: Real) -> Real {
        lo + (hi - lo) * self.next_unit()
    }
}

fn random_line(rng: &mut Lcg, n: usize, solver: StandardSolver) -> WavePropagation1D {
    let mut patch = WavePropagation1D::with_solver(n, solver);
    for ix in 0..n {
        let h = rng.range(2.0, 10.0);
        patch.set_height(ix, 0, h);
        patch.set_momentum_x(ix, 0, h * rng.range(-1.0, 1.0));
    }
    patch
}

fn random_grid(rng: &mut Lcg, nx: usize, ny: usize) -> WavePropagation2D {
    let mut patch = WavePropagation2D::new(nx, ny);
    for iy in 0..ny {
        for ix in 0..nx {
            let h = rng.range(2.0, 10.0);
            patch.set_height(ix, iy, h);
            patch.set_momentum_x(ix, iy, h * rng.range(-1.0, 1.0));
            patch.set_momentum_y(ix, iy, h * rng.range(-1.0, 1.0));
        }
    }
    patch
}

fn interior_heights(patch: &dyn WavePropagation) -> Vec<Real> {
    let mut heights = Vec::with_capacity(patch.nx() * patch.ny());
    for iy in 0..patch.ny() {
        for ix in 0..patch.nx() {
            heights.push(patch.height()[patch.cell_index(ix, iy)]);
        }
    }
    heights
}

#[test]
fn test_cfl_step_keeps_1d_heights_positive() {
    let mut rng = Lcg(0x5eed);
    for trial in 0..50 {
        let solver = if trial % 2 == 0 {
            StandardSolver::FWave
        } else {
            StandardSolver::Roe
        };
        let mut patch = random_line(&mut rng, 64, solver);

        for step in 0..10 {
            let dt = patch.compute_max_timestep(1.0);
            assert!(dt.is_finite() && dt > 0.0, "trial {trial}: dt = {dt}");
            patch.set_ghost_outflow();
            patch.time_step(dt);

            let min = interior_heights(&patch).into_iter().fold(Real::INFINITY, Real::min);
            assert!(min > 0.0, "trial {trial}, step {step}: h_min = {min}");
        }
    }
}

#[test]
fn test_cfl_step_keeps_2d_heights_positive() {
    let mut rng = Lcg(42);
    for trial in 0..10 {
        let mut patch = random_grid(&mut rng, 24, 16);

        for step in 0..5 {
            let dt = patch.compute_max_timestep(2.0);
            assert!(dt.is_finite() && dt > 0.0, "trial {trial}: dt = {dt}");
            patch.set_ghost_outflow();
            patch.time_step(dt / 2.0);

            let min = interior_heights(&patch).into_iter().fold(Real::INFINITY, Real::min);
            assert!(min > 0.0, "trial {trial}, step {step}: h_min = {min}");
        }
    }
}

#[test]
fn test_timestep_scales_with_cell_size() {
    let mut rng = Lcg(7);
    let patch = random_line(&mut rng, 32, StandardSolver::FWave);

    let dt_1 = patch.compute_max_timestep(1.0);
    let dt_10 = patch.compute_max_timestep(10.0);
    assert!((dt_10 / dt_1 - 10.0).abs() < 1e-9);
}

#[test]
fn test_default_cfl_factors() {
    assert_eq!(WavePropagation1D::new(4).cfl_factor(), CFL_1D);
    assert_eq!(WavePropagation2D::new(4, 4).cfl_factor(), CFL_2D);
    assert!(CFL_2D < CFL_1D);
}

#[test]
fn test_nan_state_yields_nan_timestep() {
    let mut patch = WavePropagation2D::new(8, 8);
    for iy in 0..8 {
        for ix in 0..8 {
            patch.set_height(ix, iy, 1.0);
        }
    }
    patch.set_height(3, 5, Real::NAN);
    assert!(patch.compute_max_timestep(1.0).is_nan());
}

#[test]
fn test_ghost_outflow_is_idempotent() {
    let mut rng = Lcg(1234);

    let mut line = random_line(&mut rng, 16, StandardSolver::FWave);
    line.set_ghost_outflow();
    let once = (line.height().to_vec(), line.momentum_x().to_vec(), line.bathymetry().to_vec());
    line.set_ghost_outflow();
    assert_eq!(line.height(), once.0.as_slice());
    assert_eq!(line.momentum_x(), once.1.as_slice());
    assert_eq!(line.bathymetry(), once.2.as_slice());

    let mut grid = random_grid(&mut rng, 12, 9);
    grid.set_ghost_outflow();
    let h = grid.height().to_vec();
    let hu = grid.momentum_x().to_vec();
    let hv = grid.momentum_y().map(<[Real]>::to_vec);
    grid.set_ghost_outflow();
    assert_eq!(grid.height(), h.as_slice());
    assert_eq!(grid.momentum_x(), hu.as_slice());
    assert_eq!(grid.momentum_y().map(<[Real]>::to_vec), hv);
}

#[test]
fn test_ghost_outflow_copies_nearest_interior_cell() {
    let mut rng = Lcg(99);
    let mut grid = random_grid(&mut rng, 6, 4);
    grid.set_ghost_outflow();

    let stride = grid.stride();
    let h = grid.height();
    // west and east ghosts of interior rows
    for iy in 0..4 {
        assert_eq!(h[(iy + 1) * stride], h[grid.cell_index(0, iy)]);
        assert_eq!(h[(iy + 1) * stride + 7], h[grid.cell_index(5, iy)]);
    }
    // south and north ghosts of interior columns
    for ix in 0..6 {
        assert_eq!(h[ix + 1], h[grid.cell_index(ix, 0)]);
        assert_eq!(h[5 * stride + ix + 1], h[grid.cell_index(ix, 3)]);
    }
}
