//! Checkpoints: ghost-inclusive patch state plus run bookkeeping.
//!
//! A checkpoint always stores a 2D layout of `(nx + 2) × (ny + 2)` values per
//! field. 1D patches are captured as the middle row of a `nx × 1` extent with
//! both ghost rows copied from it and zero y-momentum.
//!
//! On disk (feature `netcdf`) the file holds the fields `height`,
//! `momentumX`, `momentumY` and `bathymetry` over the dimensions `y`, `x`,
//! the run state in `run`, and the stations in `station_*` / `record_*`
//! variables.

use std::path::Path;

use super::netcdf_io::NetCdfError;
use super::station::Station;
use crate::flux::RiemannSolver;
use crate::setup::CheckpointSetup;
use crate::solver::{GridError, WavePropagation, WavePropagation2D};
use crate::time::CflConfig;
use crate::types::{GridExtent, Real};

/// Snapshot of a run that can be resumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// Interior size of the patch
    pub extent: GridExtent,
    /// Cell size (m)
    pub cell_size: Real,
    /// CFL factor of the run
    pub cfl: Real,
    /// Simulation time (s)
    pub time: Real,
    /// Index of the next time step
    pub step: usize,
    /// Water height, ghost cells included
    pub h: Vec<Real>,
    /// Momentum in x-direction, ghost cells included
    pub hu: Vec<Real>,
    /// Momentum in y-direction, ghost cells included
    pub hv: Vec<Real>,
    /// Bathymetry, ghost cells included
    pub b: Vec<Real>,
    /// Stations with their records so far
    pub stations: Vec<Station>,
}

/// Spread a 1D line over three rows of a `n × 1` extent.
fn line_to_rows(line: &[Real]) -> Vec<Real> {
    let mut rows = Vec::with_capacity(line.len() * 3);
    for _ in 0..3 {
        rows.extend_from_slice(line);
    }
    rows
}

impl Checkpoint {
    /// Capture the state of `patch`.
    pub fn capture<P: WavePropagation + ?Sized>(
        patch: &P,
        cell_size: Real,
        time: Real,
        step: usize,
        stations: &[Station],
    ) -> Self {
        let extent = GridExtent::new(patch.nx(), patch.ny());
        let (h, hu, hv, b) = match patch.momentum_y() {
            Some(hv) => (
                patch.height().to_vec(),
                patch.momentum_x().to_vec(),
                hv.to_vec(),
                patch.bathymetry().to_vec(),
            ),
            None => (
                line_to_rows(patch.height()),
                line_to_rows(patch.momentum_x()),
                vec![0.0; extent.len()],
                line_to_rows(patch.bathymetry()),
            ),
        };

        Self {
            extent,
            cell_size,
            cfl: patch.cfl_factor(),
            time,
            step,
            h,
            hu,
            hv,
            b,
            stations: stations.to_vec(),
        }
    }

    /// Build a fresh 2D patch from the stored arrays.
    pub fn restore<S: RiemannSolver>(&self, solver: S) -> Result<WavePropagation2D<S>, GridError> {
        let patch = WavePropagation2D::from_raw(
            self.extent,
            self.h.clone(),
            self.hu.clone(),
            self.hv.clone(),
            self.b.clone(),
            solver,
        )?;
        Ok(patch.with_cfl(CflConfig::new(self.cfl)))
    }

    /// The stored arrays as a setup, evaluated with scale `cell_size`.
    pub fn setup(&self) -> Option<CheckpointSetup> {
        CheckpointSetup::new(
            self.extent,
            self.cell_size,
            self.h.clone(),
            self.hu.clone(),
            self.hv.clone(),
            self.b.clone(),
        )
    }
}

#[cfg(feature = "netcdf")]
mod store {
    use super::*;
    use crate::io::StationRecord;

    const RUN_LEN: usize = 9;

    fn to_f64(data: &[Real]) -> Vec<f64> {
        data.iter().map(|&v| v as f64).collect()
    }

    fn read(file: &netcdf::File, name: &str) -> Result<Vec<f64>, NetCdfError> {
        let variable = file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingVariable(name.to_string()))?;
        let data: Vec<f64> = variable.get_values(..)?;
        Ok(data)
    }

    fn read_real(file: &netcdf::File, name: &str, len: usize) -> Result<Vec<Real>, NetCdfError> {
        let data = read(file, name)?;
        if data.len() < len {
            return Err(NetCdfError::InvalidData(format!(
                "`{name}` has {} values, expected {len}",
                data.len()
            )));
        }
        Ok(data[..len].iter().map(|&v| v as Real).collect())
    }

    impl Checkpoint {
        /// Write the checkpoint to `path`, replacing any existing file.
        pub fn store(&self, path: impl AsRef<Path>) -> Result<(), NetCdfError> {
            let path = path.as_ref();
            let mut file = netcdf::create(path)?;

            let n_records: usize = self.stations.iter().map(|s| s.records.len()).sum();
            let names = self
                .stations
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join("\n");

            // Zero-length fixed dimensions are padded to one entry; `run` holds the real counts.
            file.add_dimension("x", self.extent.stride())?;
            file.add_dimension("y", self.extent.rows())?;
            file.add_dimension("run", RUN_LEN)?;
            file.add_dimension("station", self.stations.len().max(1))?;
            file.add_dimension("record", n_records.max(1))?;
            file.add_dimension("name_bytes", names.len().max(1))?;

            let run = [
                self.extent.nx() as f64,
                self.extent.ny() as f64,
                self.cell_size as f64,
                self.cfl as f64,
                self.time as f64,
                self.step as f64,
                self.stations.len() as f64,
                n_records as f64,
                names.len() as f64,
            ];
            file.add_variable::<f64>("run", &["run"])?.put_values(&run, ..)?;

            for (name, field) in [
                ("height", &self.h),
                ("momentumX", &self.hu),
                ("momentumY", &self.hv),
                ("bathymetry", &self.b),
            ] {
                file.add_variable::<f64>(name, &["y", "x"])?
                    .put_values(&to_f64(field), ..)?;
            }

            let pad = |mut v: Vec<f64>, len: usize| {
                v.resize(len.max(1), 0.0);
                v
            };
            let n_st = self.stations.len();
            let station_columns: [(&str, Vec<f64>); 5] = [
                ("station_ix", self.stations.iter().map(|s| s.ix as f64).collect()),
                ("station_iy", self.stations.iter().map(|s| s.iy as f64).collect()),
                ("station_interval", self.stations.iter().map(|s| s.interval as f64).collect()),
                ("station_next", self.stations.iter().map(|s| s.next_record_time as f64).collect()),
                ("station_records", self.stations.iter().map(|s| s.records.len() as f64).collect()),
            ];
            for (name, values) in station_columns {
                file.add_variable::<f64>(name, &["station"])?
                    .put_values(&pad(values, n_st), ..)?;
            }

            let records = self.stations.iter().flat_map(|s| s.records.iter());
            let record_columns: [(&str, Vec<f64>); 4] = [
                ("record_time", records.clone().map(|r| r.time as f64).collect()),
                ("record_height", records.clone().map(|r| r.height as f64).collect()),
                ("record_momentumX", records.clone().map(|r| r.momentum_x as f64).collect()),
                ("record_momentumY", records.map(|r| r.momentum_y as f64).collect()),
            ];
            for (name, values) in record_columns {
                file.add_variable::<f64>(name, &["record"])?
                    .put_values(&pad(values, n_records), ..)?;
            }

            let mut name_bytes = names.into_bytes();
            name_bytes.resize(name_bytes.len().max(1), 0);
            file.add_variable::<u8>("station_names", &["name_bytes"])?
                .put_values(&name_bytes, ..)?;

            tracing::info!(
                path = %path.display(),
                step = self.step,
                time = self.time as f64,
                stations = self.stations.len(),
                "stored checkpoint"
            );
            Ok(())
        }

        /// Read a checkpoint written by [`store`](Self::store).
        pub fn load(path: impl AsRef<Path>) -> Result<Self, NetCdfError> {
            let path = path.as_ref();
            let file = netcdf::open(path)?;

            let run = read(&file, "run")?;
            if run.len() < RUN_LEN {
                return Err(NetCdfError::InvalidData("truncated `run` variable".to_string()));
            }
            let (nx, ny) = (run[0] as usize, run[1] as usize);
            if nx == 0 || ny == 0 {
                return Err(NetCdfError::InvalidData(format!("invalid extent {nx}×{ny}")));
            }
            let extent = GridExtent::new(nx, ny);
            let (n_st, n_records, n_name_bytes) = (run[6] as usize, run[7] as usize, run[8] as usize);

            let len = extent.len();
            let h = read_real(&file, "height", len)?;
            let hu = read_real(&file, "momentumX", len)?;
            let hv = read_real(&file, "momentumY", len)?;
            let b = read_real(&file, "bathymetry", len)?;

            let ix = read_real(&file, "station_ix", n_st)?;
            let iy = read_real(&file, "station_iy", n_st)?;
            let interval = read_real(&file, "station_interval", n_st)?;
            let next = read_real(&file, "station_next", n_st)?;
            let counts = read_real(&file, "station_records", n_st)?;
            let time = read_real(&file, "record_time", n_records)?;
            let height = read_real(&file, "record_height", n_records)?;
            let momentum_x = read_real(&file, "record_momentumX", n_records)?;
            let momentum_y = read_real(&file, "record_momentumY", n_records)?;

            let name_var = file
                .variable("station_names")
                .ok_or_else(|| NetCdfError::MissingVariable("station_names".to_string()))?;
            let mut name_bytes: Vec<u8> = name_var.get_values(..)?;
            name_bytes.truncate(n_name_bytes);
            let names = String::from_utf8(name_bytes)
                .map_err(|e| NetCdfError::InvalidData(format!("station names: {e}")))?;
            let mut names = names.split('\n');

            let mut stations = Vec::with_capacity(n_st);
            let mut offset = 0;
            for k in 0..n_st {
                let name = names.next().unwrap_or_default();
                let mut station = Station::new(name, ix[k] as usize, iy[k] as usize, interval[k]);
                station.next_record_time = next[k];
                let count = counts[k] as usize;
                if offset + count > n_records {
                    return Err(NetCdfError::InvalidData(format!(
                        "station `{name}` claims {count} records past the end"
                    )));
                }
                station.records = (offset..offset + count)
                    .map(|r| StationRecord {
                        time: time[r],
                        height: height[r],
                        momentum_x: momentum_x[r],
                        momentum_y: momentum_y[r],
                    })
                    .collect();
                offset += count;
                stations.push(station);
            }

            tracing::info!(path = %path.display(), step = run[5] as usize, "loaded checkpoint");

            Ok(Self {
                extent,
                cell_size: run[2] as Real,
                cfl: run[3] as Real,
                time: run[4] as Real,
                step: run[5] as usize,
                h,
                hu,
                hv,
                b,
                stations,
            })
        }
    }
}

#[cfg(not(feature = "netcdf"))]
impl Checkpoint {
    /// Write the checkpoint to `path`; requires the `netcdf` feature.
    pub fn store(&self, _path: impl AsRef<Path>) -> Result<(), NetCdfError> {
        Err(NetCdfError::FeatureDisabled)
    }

    /// Read a checkpoint from `path`; requires the `netcdf` feature.
    pub fn load(_path: impl AsRef<Path>) -> Result<Self, NetCdfError> {
        Err(NetCdfError::FeatureDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::StandardSolver;
    use crate::io::StationRecord;
    use crate::solver::WavePropagation1D;
    use approx::assert_abs_diff_eq;

    fn dam_break_1d() -> WavePropagation1D {
        let mut patch = WavePropagation1D::new(100);
        for i in 0..100 {
            patch.set_height(i, 0, if i < 50 { 10.0 } else { 8.0 });
        }
        patch.set_ghost_outflow();
        patch.time_step(0.1);
        patch
    }

    fn stations() -> Vec<Station> {
        let mut bikini = Station::new("Bikini Bottom", 2, 5, 0.17);
        for (t, h, hu, hv) in [(0.0, 1.0, 2.0, 3.0), (4.0, 5.0, 6.0, 7.0), (8.0, 9.0, 1.0, 2.0)] {
            bikini.records.push(StationRecord {
                time: t,
                height: h,
                momentum_x: hu,
                momentum_y: hv,
            });
        }
        let atlantis = Station::new("Atlantis", 9, 13, 0.17);
        vec![bikini, atlantis]
    }

    fn assert_dam_break(h: &[Real], hu: &[Real], at: impl Fn(usize) -> usize) {
        for i in 0..49 {
            assert_abs_diff_eq!(h[at(i)], 10.0, epsilon = 1e-12);
            assert_abs_diff_eq!(hu[at(i)], 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(h[at(49)], 10.0 - 0.1 * 9.394671362, epsilon = 1e-3);
        assert_abs_diff_eq!(hu[at(49)], 0.1 * 88.25985, epsilon = 1e-2);
        assert_abs_diff_eq!(h[at(50)], 8.0 + 0.1 * 9.394671362, epsilon = 1e-3);
        assert_abs_diff_eq!(hu[at(50)], 0.1 * 88.25985, epsilon = 1e-2);
        for i in 51..100 {
            assert_abs_diff_eq!(h[at(i)], 8.0, epsilon = 1e-12);
            assert_abs_diff_eq!(hu[at(i)], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_capture_1d_and_restore_2d() {
        let patch = dam_break_1d();
        let checkpoint = Checkpoint::capture(&patch, 0.345, 0.123, 21, &stations());

        assert_eq!(checkpoint.extent, GridExtent::new(100, 1));
        assert_eq!(checkpoint.h.len(), checkpoint.extent.len());
        assert_eq!(checkpoint.cfl, 0.5);

        let restored = checkpoint.restore(StandardSolver::FWave).unwrap();
        assert_eq!(restored.cfl_factor(), 0.5);
        assert_dam_break(restored.height(), restored.momentum_x(), |i| restored.cell_index(i, 0));
    }

    #[test]
    fn test_setup_reinitialises_1d_patch() {
        let patch = dam_break_1d();
        let checkpoint = Checkpoint::capture(&patch, 1.0, 0.0, 0, &[]);
        let setup = checkpoint.setup().unwrap();

        let fresh = WavePropagation1D::from_setup(100, &setup, 1.0, StandardSolver::FWave);
        assert_eq!(fresh.height(), patch.height());
        assert_eq!(fresh.momentum_x(), patch.momentum_x());
    }

    #[cfg(not(feature = "netcdf"))]
    #[test]
    fn test_store_without_feature() {
        let checkpoint = Checkpoint::capture(&dam_break_1d(), 1.0, 0.0, 0, &[]);
        assert!(matches!(checkpoint.store("cp.nc"), Err(NetCdfError::FeatureDisabled)));
    }

    #[cfg(feature = "netcdf")]
    #[test]
    fn test_store_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.nc");

        let patch = dam_break_1d();
        let checkpoint = Checkpoint::capture(&patch, 0.345, 0.123, 21, &stations());
        checkpoint.store(&path).unwrap();

        let loaded = Checkpoint::load(&path).unwrap();
        assert_eq!(loaded, checkpoint);
        assert_eq!(loaded.stations[0].name, "Bikini Bottom");
        assert_eq!(loaded.stations[0].records[2].height, 9.0);
        assert!(loaded.stations[1].records.is_empty());

        let restored = loaded.restore(StandardSolver::FWave).unwrap();
        assert_dam_break(restored.height(), restored.momentum_x(), |i| restored.cell_index(i, 0));
    }
}
