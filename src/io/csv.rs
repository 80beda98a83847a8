//! Comma separated snapshots of a patch.
//!
//! # File Format
//!
//! ```text
//! x,y,height,momentum_x
//! 0.25,0,1,5
//! 0.75,0,2,4
//! ```
//!
//! Coordinates are cell centers `(i + 0.5) · dxy`, or 0 along a dimension
//! with a single cell. The reader accepts `,`, `;` or whitespace as
//! separators and skips blank lines and lines starting with `#`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::solver::WavePropagation;
use crate::types::Real;

/// Error type for CSV reading and writing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Requested column is not in the header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No header line found
    #[error("CSV input contains no header")]
    Empty,
}

/// Placement of the interior cells inside the stored arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotLayout {
    /// Cell size (m)
    pub dxy: Real,
    /// Interior cells in x-direction
    pub nx: usize,
    /// Interior cells in y-direction
    pub ny: usize,
    /// Distance between vertically adjacent cells in storage
    pub stride: usize,
    /// Storage index of interior cell (0, 0)
    pub offset: usize,
    /// Write every `downsample`-th cell in each direction
    pub downsample: usize,
}

impl SnapshotLayout {
    /// Layout of the interior of a ghost-padded patch.
    pub fn of_patch<P: WavePropagation + ?Sized>(patch: &P, dxy: Real) -> Self {
        Self {
            dxy,
            nx: patch.nx(),
            ny: patch.ny(),
            stride: patch.stride(),
            offset: patch.cell_index(0, 0),
            downsample: 1,
        }
    }

    /// Write only every `factor`-th cell in each direction.
    pub fn with_downsample(mut self, factor: usize) -> Self {
        self.downsample = factor.max(1);
        self
    }
}

/// Optional fields of a snapshot; absent fields are left out of the file.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotFields<'a> {
    /// Water height
    pub height: Option<&'a [Real]>,
    /// Momentum in x-direction
    pub momentum_x: Option<&'a [Real]>,
    /// Momentum in y-direction
    pub momentum_y: Option<&'a [Real]>,
    /// Bathymetry
    pub bathymetry: Option<&'a [Real]>,
}

impl<'a> SnapshotFields<'a> {
    /// All fields of a patch; `momentum_y` is absent for 1D patches.
    pub fn of_patch<P: WavePropagation + ?Sized>(patch: &'a P) -> Self {
        Self {
            height: Some(patch.height()),
            momentum_x: Some(patch.momentum_x()),
            momentum_y: patch.momentum_y(),
            bathymetry: Some(patch.bathymetry()),
        }
    }

    fn named(&self) -> impl Iterator<Item = (&'static str, &'a [Real])> {
        [
            ("height", self.height),
            ("momentum_x", self.momentum_x),
            ("momentum_y", self.momentum_y),
            ("bathymetry", self.bathymetry),
        ]
        .into_iter()
        .filter_map(|(name, field)| field.map(|f| (name, f)))
    }
}

/// Write one snapshot as CSV.
pub fn write_snapshot<W: Write>(
    writer: &mut W,
    layout: &SnapshotLayout,
    fields: &SnapshotFields<'_>,
) -> Result<(), CsvError> {
    write!(writer, "x,y")?;
    for (name, _) in fields.named() {
        write!(writer, ",{name}")?;
    }
    writeln!(writer)?;

    let step = layout.downsample.max(1);
    for iy in (0..layout.ny).step_by(step) {
        for ix in (0..layout.nx).step_by(step) {
            let x = if layout.nx > 1 { (ix as Real + 0.5) * layout.dxy } else { 0.0 };
            let y = if layout.ny > 1 { (iy as Real + 0.5) * layout.dxy } else { 0.0 };
            let id = layout.offset + iy * layout.stride + ix;

            write!(writer, "{x},{y}")?;
            for (_, field) in fields.named() {
                write!(writer, ",{}", field[id])?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write the interior of a patch to `path`.
pub fn write_patch<P: WavePropagation + ?Sized>(
    path: impl AsRef<Path>,
    patch: &P,
    dxy: Real,
    downsample: usize,
) -> Result<(), CsvError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let layout = SnapshotLayout::of_patch(patch, dxy).with_downsample(downsample);
    write_snapshot(&mut writer, &layout, &SnapshotFields::of_patch(patch))?;
    tracing::debug!(path = %path.as_ref().display(), "wrote CSV snapshot");
    Ok(())
}

/// Named columns of a CSV table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvColumns {
    columns: Vec<(String, Vec<Real>)>,
}

impl CsvColumns {
    /// Column names in header order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the header named no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of data rows.
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// Values of column `index`.
    pub fn column(&self, index: usize) -> Option<&[Real]> {
        self.columns.get(index).map(|(_, values)| values.as_slice())
    }

    /// Values of the column called `name`.
    pub fn find_column(&self, name: &str) -> Option<&[Real]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Like [`find_column`](Self::find_column), but an error if absent.
    pub fn require(&self, name: &str) -> Result<&[Real], CsvError> {
        self.find_column(name)
            .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
    }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|field| !field.is_empty())
}

/// Read a CSV table into named columns.
pub fn read_columns<R: BufRead>(reader: R) -> Result<CsvColumns, CsvError> {
    let mut columns: Option<Vec<(String, Vec<Real>)>> = None;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if columns.is_none() {
            columns = Some(
                split_fields(trimmed)
                    .map(|name| (name.to_string(), Vec::new()))
                    .collect(),
            );
            continue;
        }
        let Some(columns) = columns.as_mut() else {
            continue;
        };

        let mut fields = split_fields(trimmed);
        for (name, values) in columns.iter_mut() {
            let field = fields.next().ok_or_else(|| CsvError::Parse {
                line: line_num,
                message: format!("missing value for column `{name}`"),
            })?;
            let value = field.parse::<Real>().map_err(|_| CsvError::Parse {
                line: line_num,
                message: format!("invalid number `{field}` in column `{name}`"),
            })?;
            values.push(value);
        }
    }

    columns
        .map(|columns| CsvColumns { columns })
        .ok_or(CsvError::Empty)
}

/// Read a CSV file into named columns.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<CsvColumns, CsvError> {
    let file = File::open(path.as_ref())?;
    read_columns(BufReader::new(file))
}

/// Read one column of a CSV file, e.g. a bathymetry profile.
pub fn read_profile(path: impl AsRef<Path>, column: &str) -> Result<Vec<Real>, CsvError> {
    let table = read_csv_file(path)?;
    Ok(table.require(column)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    #[test]
    fn test_write_1d() {
        let h = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let hu = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        let layout = SnapshotLayout {
            dxy: 0.5,
            nx: 5,
            ny: 1,
            stride: 1,
            offset: 1,
            downsample: 1,
        };
        let fields = SnapshotFields {
            height: Some(&h),
            momentum_x: Some(&hu),
            ..Default::default()
        };

        let mut out = Vec::new();
        write_snapshot(&mut out, &layout, &fields).unwrap();

        let expected = "x,y,height,momentum_x\n\
                        0.25,0,1,5\n\
                        0.75,0,2,4\n\
                        1.25,0,3,3\n\
                        1.75,0,4,2\n\
                        2.25,0,5,1\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_2d() {
        let h: Vec<Real> = (0..16).map(|i| i as Real).collect();
        let hu: Vec<Real> = (0..16).rev().map(|i| i as Real).collect();
        let hv: Vec<Real> = (0..16).map(|i| ((i % 4) * 4 + i / 4) as Real).collect();
        let layout = SnapshotLayout {
            dxy: 10.0,
            nx: 2,
            ny: 2,
            stride: 4,
            offset: 5,
            downsample: 1,
        };
        let fields = SnapshotFields {
            height: Some(&h),
            momentum_x: Some(&hu),
            momentum_y: Some(&hv),
            bathymetry: None,
        };

        let mut out = Vec::new();
        write_snapshot(&mut out, &layout, &fields).unwrap();

        let expected = "x,y,height,momentum_x,momentum_y\n\
                        5,5,5,10,5\n\
                        15,5,6,9,9\n\
                        5,15,9,6,6\n\
                        15,15,10,5,10\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_downsampled() {
        let h: Vec<Real> = (0..6).map(|i| i as Real).collect();
        let layout = SnapshotLayout {
            dxy: 1.0,
            nx: 4,
            ny: 1,
            stride: 6,
            offset: 1,
            downsample: 2,
        };
        let fields = SnapshotFields {
            height: Some(&h),
            ..Default::default()
        };

        let mut out = Vec::new();
        write_snapshot(&mut out, &layout, &fields).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x,y,height\n0.5,0,1\n2.5,0,3\n");
    }

    #[test]
    fn test_read_columns() {
        let source = "# comment\n\
                      x,y,height,momentum_x\n\
                      0.25,0,1,5\n\
                      \n\
                      0.75,0,2,4\n\
                      1.25,0,3,3\n";
        let table = read_columns(Cursor::new(source)).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["x", "y", "height", "momentum_x"]);
        assert_eq!(table.rows(), 3);
        assert_relative_eq!(table.find_column("x").unwrap()[2], 1.25);
        assert_eq!(table.find_column("momentum_x").unwrap(), &[5.0, 4.0, 3.0]);
        assert!(table.find_column("momentum_y").is_none());
    }

    #[test]
    fn test_read_mixed_separators() {
        let table = read_columns(Cursor::new("a b;c\n1 2;3\n")).unwrap();
        assert_eq!(table.column(2).unwrap(), &[3.0]);
    }

    #[test]
    fn test_read_reports_bad_number() {
        let err = read_columns(Cursor::new("a,b\n1,2\n3,x\n")).unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_reports_short_row() {
        let err = read_columns(Cursor::new("a,b\n1\n")).unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_empty() {
        assert!(matches!(read_columns(Cursor::new("# only\n\n")), Err(CsvError::Empty)));
    }
}
