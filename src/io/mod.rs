//! I/O for snapshots, stations, NetCDF output and checkpoints.
//!
//! This module provides:
//! - **CSV snapshots**: one file per output frame, readable back into named columns
//! - **Stations**: time series of single cells, written as `station_<name>.csv`
//! - **NetCDF output**: one file per run with a frame per output step (requires `netcdf` feature)
//! - **Gridded input**: 2D bathymetry and displacement fields from NetCDF (requires `netcdf` feature)
//! - **Checkpoints**: ghost-inclusive state for resuming runs (storage requires `netcdf` feature)
//!
//! # Example
//!
//! ```no_run
//! use wave_rs::io::{Station, write_patch};
//! use wave_rs::solver::{WavePropagation, WavePropagation1D};
//!
//! let patch = WavePropagation1D::new(100);
//! write_patch("solution_0.csv", &patch, 1.0, 1).unwrap();
//!
//! let mut station = Station::new("center", 50, 0, 0.5);
//! station.record_state(&patch, 0.0);
//! station.write_csv(".", true).unwrap();
//! ```

mod checkpoint;
mod csv;
mod netcdf_io;
mod station;

pub use checkpoint::Checkpoint;
pub use csv::{
    CsvColumns, CsvError, SnapshotFields, SnapshotLayout, read_columns, read_csv_file,
    read_profile, write_patch, write_snapshot,
};
pub use netcdf_io::{NetCdfError, NetCdfWriterConfig, downsample, downsampled_len, load_2d_array};
#[cfg(feature = "netcdf")]
pub use netcdf_io::NetCdfWriter;
pub use station::{Station, StationError, StationRecord};
