//! Integration tests for snapshots, stations and bathymetry profiles.

use approx::assert_abs_diff_eq;
use wave_rs::flux::StandardSolver;
use wave_rs::io::{Station, read_csv_file, read_profile, write_patch};
use wave_rs::setup::{DamBreak1D, Setup, SineDisplacement, TsunamiEvent1D};
use wave_rs::solver::{WavePropagation, WavePropagation1D, WavePropagation2D};
use wave_rs::types::Real;

#[test]
fn test_snapshot_columns_2d() {
    let dir = tempfile::tempdir().unwrap();
    let mut patch = WavePropagation2D::new(4, 3);
    for iy in 0..3 {
        for ix in 0..4 {
            patch.set_height(ix, iy, (10 * iy + ix) as Real);
            patch.set_momentum_y(ix, iy, -1.0);
        }
    }

    let path = dir.path().join("solution_0.csv");
    write_patch(&path, &patch, 2.0, 1).unwrap();
    let table = read_csv_file(&path).unwrap();

    let names: Vec<_> = table.names().collect();
    assert_eq!(names, ["x", "y", "height", "momentum_x", "momentum_y", "bathymetry"]);
    assert_eq!(table.rows(), 12);

    let x = table.require("x").unwrap();
    let y = table.require("y").unwrap();
    let h = table.require("height").unwrap();
    // row-major, x fastest
    assert_eq!((x[0], y[0]), (1.0, 1.0));
    assert_eq!((x[5], y[5]), (3.0, 3.0));
    assert_eq!(h[5], 11.0);
    assert_eq!(h[11], 23.0);
    assert!(table.require("momentum_y").unwrap().iter().all(|&v| v == -1.0));
}

#[test]
fn test_snapshot_1d_has_no_momentum_y() {
    let dir = tempfile::tempdir().unwrap();
    let mut patch = WavePropagation1D::new(10);
    for ix in 0..10 {
        patch.set_height(ix, 0, ix as Real);
    }

    let path = dir.path().join("line.csv");
    write_patch(&path, &patch, 1.0, 3).unwrap();
    let table = read_csv_file(&path).unwrap();

    assert!(table.find_column("momentum_y").is_none());
    assert_eq!(table.require("height").unwrap(), &[0.0, 3.0, 6.0, 9.0]);
    assert!(table.require("y").unwrap().iter().all(|&y| y == 0.0));
}

#[test]
fn test_station_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let setup = DamBreak1D::new(10.0, 8.0, 5.0);
    let mut patch = WavePropagation1D::from_setup(10, &setup, 1.0, StandardSolver::FWave);

    let mut station = Station::new("gauge", 5, 0, 0.25);
    let mut time = 0.0;
    while station.records.len() < 4 {
        if station.needs_update(time) {
            station.record_state(&patch, time);
        }
        let dt = patch.compute_max_timestep(1.0);
        patch.set_ghost_outflow();
        patch.time_step(dt);
        time += dt;
    }

    let path = station.write_csv(dir.path(), true).unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("station_gauge.csv"));

    let restored = Station::read_csv(&path).unwrap();
    assert_eq!(restored.name, "gauge");
    assert_eq!((restored.ix, restored.iy), (5, 0));
    assert_eq!(restored.records.len(), 4);
    for (a, b) in restored.records.iter().zip(&station.records) {
        assert_abs_diff_eq!(a.time, b.time, epsilon = 1e-12);
        assert_abs_diff_eq!(a.height, b.height, epsilon = 1e-12);
        assert_abs_diff_eq!(a.momentum_x, b.momentum_x, epsilon = 1e-12);
    }
    let last = restored.records[3].time;
    assert!(restored.interval > 0.0);
    assert!(!restored.needs_update(last));
}

#[test]
fn test_profile_drives_tsunami_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    std::fs::write(
        &path,
        "# sampled every 100 m\ndistance,bathymetry\n0,-1000\n100,-500\n200,-100\n300,5\n",
    )
    .unwrap();

    let samples = read_profile(&path, "bathymetry").unwrap();
    assert_eq!(samples, [-1000.0, -500.0, -100.0, 5.0]);

    let setup = TsunamiEvent1D::new(samples, 100.0, SineDisplacement::new(0.0, 100.0, 10.0)).unwrap();
    assert_abs_diff_eq!(setup.height(50.0, 0.0), 750.0, epsilon = 1e-9);
    assert_abs_diff_eq!(setup.displacement(25.0, 0.0), 10.0, epsilon = 1e-9);
    // dry land rises to the shore cliff
    assert_eq!(setup.height(300.0, 0.0), 0.0);
    assert!(setup.bathymetry(300.0, 0.0) > 0.0);

    let patch = WavePropagation1D::from_setup(30, &setup, 10.0, StandardSolver::FWave);
    assert!(patch.height().iter().all(|h| *h >= 0.0));
}
