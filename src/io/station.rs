//! Stations record the state of a single cell over time.
//!
//! # File Format
//!
//! ```text
//! # Station harbor
//! # Location (Grid) 12,40
//! time,height,momentumX,momentumY
//! 0,10,0,0
//! 1.5,10.2,0.3,0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::csv::{CsvError, read_columns};
use crate::solver::WavePropagation;
use crate::types::Real;

/// Error type for station files.
#[derive(Debug, Error)]
pub enum StationError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed station file
    #[error("Invalid station file: {0}")]
    Csv(#[from] CsvError),
}

/// One sample of a station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationRecord {
    /// Simulation time (s)
    pub time: Real,
    /// Water height
    pub height: Real,
    /// Momentum in x-direction
    pub momentum_x: Real,
    /// Momentum in y-direction (0 in 1D)
    pub momentum_y: Real,
}

/// A probe at interior cell `(ix, iy)` sampled every `interval` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    /// Name, used in the file name `station_<name>.csv`
    pub name: String,
    /// Interior cell x-index
    pub ix: usize,
    /// Interior cell y-index
    pub iy: usize,
    /// Time between two records (s)
    pub interval: Real,
    /// Earliest time of the next record
    pub next_record_time: Real,
    /// Samples so far
    pub records: Vec<StationRecord>,
}

impl Station {
    /// Create a station that records at t = 0 first.
    pub fn new(name: impl Into<String>, ix: usize, iy: usize, interval: Real) -> Self {
        Self {
            name: name.into(),
            ix,
            iy,
            interval,
            next_record_time: 0.0,
            records: Vec::new(),
        }
    }

    /// Whether a record is due at `time`.
    pub fn needs_update(&self, time: Real) -> bool {
        self.next_record_time <= time
    }

    /// Sample the cell and schedule the next record at `time + interval`.
    pub fn record_state<P: WavePropagation + ?Sized>(&mut self, patch: &P, time: Real) {
        let i = patch.cell_index(self.ix, self.iy);
        self.records.push(StationRecord {
            time,
            height: patch.height()[i],
            momentum_x: patch.momentum_x()[i],
            momentum_y: patch.momentum_y().map_or(0.0, |hv| hv[i]),
        });
        self.next_record_time = time + self.interval;
    }

    /// File name of this station.
    pub fn file_name(&self) -> String {
        format!("station_{}.csv", self.name)
    }

    /// Write all records to `<dir>/station_<name>.csv`.
    pub fn write_csv(&self, dir: impl AsRef<Path>, with_comment: bool) -> Result<PathBuf, StationError> {
        let path = dir.as_ref().join(self.file_name());
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_to(&mut writer, with_comment)?;
        tracing::debug!(station = %self.name, records = self.records.len(), "wrote station file");
        Ok(path)
    }

    /// Write all records as CSV.
    pub fn write_to<W: Write>(&self, writer: &mut W, with_comment: bool) -> std::io::Result<()> {
        if with_comment {
            writeln!(writer, "# Station {}", self.name)?;
            writeln!(writer, "# Location (Grid) {},{}", self.ix, self.iy)?;
        }
        writeln!(writer, "time,height,momentumX,momentumY")?;
        for r in &self.records {
            writeln!(writer, "{},{},{},{}", r.time, r.height, r.momentum_x, r.momentum_y)?;
        }
        writer.flush()
    }

    /// Read a station file written by [`write_csv`](Self::write_csv).
    ///
    /// Name and location come from the comment lines when present; otherwise
    /// the name is taken from the file name and the location is (0, 0).
    /// The interval is estimated from the first two records.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let fallback = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.strip_prefix("station_").unwrap_or(s).to_string())
            .unwrap_or_default();
        let mut station = Self::new(fallback, 0, 0, 0.0);
        station.parse_comments(BufReader::new(text.as_bytes()))?;

        let table = read_columns(BufReader::new(text.as_bytes()))?;
        let time = table.require("time")?;
        let height = table.require("height")?;
        let momentum_x = table.require("momentumX")?;
        let momentum_y = table.require("momentumY")?;

        station.records = (0..table.rows())
            .map(|k| StationRecord {
                time: time[k],
                height: height[k],
                momentum_x: momentum_x[k],
                momentum_y: momentum_y[k],
            })
            .collect();

        if let [first, second, ..] = station.records.as_slice() {
            station.interval = second.time - first.time;
        }
        if let Some(last) = station.records.last() {
            station.next_record_time = last.time + station.interval;
        }
        Ok(station)
    }

    fn parse_comments<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let Some(comment) = line.trim().strip_prefix('#') else {
                continue;
            };
            let comment = comment.trim();
            if let Some(location) = comment.strip_prefix("Location (Grid)") {
                let mut parts = location.trim().split(',').map(|p| p.trim().parse::<usize>());
                if let (Some(Ok(ix)), Some(Ok(iy))) = (parts.next(), parts.next()) {
                    self.ix = ix;
                    self.iy = iy;
                }
            } else if let Some(name) = comment.strip_prefix("Station ") {
                self.name = name.trim().to_string();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{WavePropagation1D, WavePropagation2D};

    #[test]
    fn test_needs_update_cadence() {
        let mut station = Station::new("probe", 0, 0, 2.0);
        let patch = WavePropagation1D::new(4);

        assert!(station.needs_update(0.0));
        station.record_state(&patch, 0.0);

        let next = station.next_record_time;
        assert_eq!(next, 2.0);
        assert!(!station.needs_update(next - 0.1));
        assert!(station.needs_update(next + 0.1));
    }

    #[test]
    fn test_record_reads_interior_cell() {
        let mut patch = WavePropagation2D::new(4, 3);
        patch.set_height(2, 1, 7.0);
        patch.set_momentum_x(2, 1, 1.5);
        patch.set_momentum_y(2, 1, -0.5);

        let mut station = Station::new("probe", 2, 1, 1.0);
        station.record_state(&patch, 3.0);

        assert_eq!(
            station.records,
            vec![StationRecord {
                time: 3.0,
                height: 7.0,
                momentum_x: 1.5,
                momentum_y: -0.5
            }]
        );
    }

    #[test]
    fn test_write_format() {
        let mut station = Station::new("harbor", 12, 40, 1.5);
        station.records.push(StationRecord {
            time: 0.0,
            height: 10.0,
            momentum_x: 0.0,
            momentum_y: 0.0,
        });

        let mut out = Vec::new();
        station.write_to(&mut out, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# Station harbor\n# Location (Grid) 12,40\ntime,height,momentumX,momentumY\n0,10,0,0\n"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut patch = WavePropagation1D::new(10);
        for i in 0..10 {
            patch.set_height(i, 0, 1.0 + i as Real);
        }

        let mut station = Station::new("gauge", 3, 0, 0.5);
        for k in 0..4 {
            station.record_state(&patch, k as Real * 0.5);
        }

        let path = station.write_csv(dir.path(), true).unwrap();
        assert!(path.ends_with("station_gauge.csv"));

        let restored = Station::read_csv(&path).unwrap();
        assert_eq!(restored, station);
    }

    #[test]
    fn test_read_without_comments() {
        let dir = tempfile::tempdir().unwrap();
        let mut station = Station::new("bare", 1, 2, 1.0);
        station.records.push(StationRecord {
            time: 0.0,
            height: 1.0,
            momentum_x: 2.0,
            momentum_y: 3.0,
        });
        let path = station.write_csv(dir.path(), false).unwrap();

        let restored = Station::read_csv(path).unwrap();
        assert_eq!(restored.name, "bare");
        assert_eq!((restored.ix, restored.iy), (0, 0));
        assert_eq!(restored.records, station.records);
    }
}
