//! NetCDF output of wave propagation runs and input of gridded 2D fields.
//!
//! Output files hold the dimensions `x`, `y` and the unlimited `time`:
//!
//! | Variable | Dimensions | Units |
//! |----------|------------|-------|
//! | `x`, `y` | `x` / `y` | m (cell centers) |
//! | `time` | `time` | s |
//! | `height` | `time, y, x` | m |
//! | `momentumX`, `momentumY` | `time, y, x` | m²/s |
//! | `bathymetry`, `displacement` | `y, x` | m |
//!
//! `momentumY` is omitted for 1D patches. With a downsampling factor `k`
//! every output cell holds the mean of a `k × k` block of patch cells.
//!
//! # Example
//!
//! ```rust,ignore
//! use wave_rs::io::{NetCdfWriter, NetCdfWriterConfig};
//!
//! let config = NetCdfWriterConfig::new("solution.nc").with_downsample(2);
//! let mut writer = NetCdfWriter::create(config, &patch, 25.0)?;
//! writer.append_frame(0.0, &patch)?;
//! ```

use std::path::{Path, PathBuf};

#[cfg(feature = "netcdf")]
use chrono::Utc;
use thiserror::Error;

use crate::setup::GriddedField;
#[cfg(feature = "netcdf")]
use crate::setup::Setup;
#[cfg(feature = "netcdf")]
use crate::solver::WavePropagation;
use crate::types::Real;

/// Error type for NetCDF operations.
#[derive(Debug, Error)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// NetCDF library error
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Missing variable
    #[error("Missing variable: {0}")]
    MissingVariable(String),

    /// Feature not enabled
    #[error("NetCDF feature not enabled")]
    FeatureDisabled,
}

/// Configuration for NetCDF output.
#[derive(Debug, Clone, PartialEq)]
pub struct NetCdfWriterConfig {
    /// Output file path
    pub path: PathBuf,
    /// Block size for averaging cells (1 = full resolution)
    pub downsample: usize,
    /// Title attribute
    pub title: Option<String>,
}

impl NetCdfWriterConfig {
    /// Create a new configuration with the given output path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            downsample: 1,
            title: None,
        }
    }

    /// Average `factor × factor` blocks into one output cell.
    pub fn with_downsample(mut self, factor: usize) -> Self {
        self.downsample = factor.max(1);
        self
    }

    /// Set the title attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Number of output cells along an axis of `n` cells with block size `step`.
#[inline]
pub fn downsampled_len(n: usize, step: usize) -> usize {
    n.div_ceil(step.max(1))
}

/// Block-average the `nx × ny` cells starting at `offset` of a strided field.
///
/// Blocks at the right and top edges may be partial; they average only the
/// cells they cover. The result is row-major with
/// [`downsampled_len`]`(nx, step)` columns.
pub fn downsample(
    field: &[Real],
    nx: usize,
    ny: usize,
    stride: usize,
    offset: usize,
    step: usize,
) -> Vec<Real> {
    let step = step.max(1);
    let (nx_out, ny_out) = (downsampled_len(nx, step), downsampled_len(ny, step));
    let mut out = Vec::with_capacity(nx_out * ny_out);

    for by in 0..ny_out {
        let rows = by * step..((by + 1) * step).min(ny);
        for bx in 0..nx_out {
            let cols = bx * step..((bx + 1) * step).min(nx);
            let mut sum = 0.0;
            for iy in rows.clone() {
                let row = offset + iy * stride;
                sum += field[row + cols.start..row + cols.end].iter().sum::<Real>();
            }
            out.push(sum / (rows.len() * cols.len()) as Real);
        }
    }
    out
}

/// Writer for the time series of one run.
#[cfg(feature = "netcdf")]
pub struct NetCdfWriter {
    file: netcdf::FileMut,
    config: NetCdfWriterConfig,
    nx: usize,
    ny: usize,
    cell_size: Real,
    with_momentum_y: bool,
    time_index: usize,
}

#[cfg(feature = "netcdf")]
impl NetCdfWriter {
    /// Create the file and write coordinates and bathymetry of `patch`.
    pub fn create<P: WavePropagation + ?Sized>(
        config: NetCdfWriterConfig,
        patch: &P,
        cell_size: Real,
    ) -> Result<Self, NetCdfError> {
        let mut file = netcdf::create(&config.path)?;
        let step = config.downsample;
        let (nx, ny) = (patch.nx(), patch.ny());
        let (nx_out, ny_out) = (downsampled_len(nx, step), downsampled_len(ny, step));
        let with_momentum_y = patch.momentum_y().is_some();

        file.add_dimension("x", nx_out)?;
        file.add_dimension("y", ny_out)?;
        file.add_unlimited_dimension("time")?;

        let centers = |n: usize| -> Vec<f32> {
            (0..n)
                .map(|j| ((j * step) as Real + 0.5) as f32 * cell_size as f32)
                .collect()
        };

        {
            let mut x_var = file.add_variable::<f32>("x", &["x"])?;
            x_var.put_attribute("units", "m")?;
            x_var.put_values(&centers(nx_out), ..)?;
        }
        {
            let mut y_var = file.add_variable::<f32>("y", &["y"])?;
            y_var.put_attribute("units", "m")?;
            y_var.put_values(&centers(ny_out), ..)?;
        }
        {
            let mut time_var = file.add_variable::<f32>("time", &["time"])?;
            time_var.put_attribute("units", "s")?;
        }

        let mut frame_vars = vec![("height", "m"), ("momentumX", "m*m/s")];
        if with_momentum_y {
            frame_vars.push(("momentumY", "m*m/s"));
        }
        for (name, units) in frame_vars {
            let mut var = file.add_variable::<f32>(name, &["time", "y", "x"])?;
            var.put_attribute("units", units)?;
        }

        {
            let b = downsample(patch.bathymetry(), nx, ny, patch.stride(), patch.cell_index(0, 0), step);
            let mut b_var = file.add_variable::<f32>("bathymetry", &["y", "x"])?;
            b_var.put_attribute("units", "m")?;
            b_var.put_values(&to_f32(&b), ..)?;
        }
        {
            let mut d_var = file.add_variable::<f32>("displacement", &["y", "x"])?;
            d_var.put_attribute("units", "m")?;
            d_var.put_values(&vec![0.0f32; nx_out * ny_out], ..)?;
        }

        if let Some(ref title) = config.title {
            file.add_attribute("title", title.as_str())?;
        }
        file.add_attribute("source", "wave-rs")?;
        let now = Utc::now();
        file.add_attribute(
            "history",
            format!("{}: Created by wave-rs", now.format("%Y-%m-%d %H:%M:%S UTC")).as_str(),
        )?;

        tracing::debug!(path = %config.path.display(), nx_out, ny_out, "created NetCDF output");

        Ok(Self {
            file,
            config,
            nx,
            ny,
            cell_size,
            with_momentum_y,
            time_index: 0,
        })
    }

    /// Fill `displacement` with `setup` evaluated at cell centers `(i + 0.5) · scale`.
    pub fn write_displacement(&mut self, setup: &dyn Setup, scale: Real) -> Result<(), NetCdfError> {
        let stride = self.nx;
        let mut field = Vec::with_capacity(self.nx * self.ny);
        for iy in 0..self.ny {
            let y = (iy as Real + 0.5) * scale;
            for ix in 0..self.nx {
                field.push(setup.displacement((ix as Real + 0.5) * scale, y));
            }
        }
        let d = downsample(&field, self.nx, self.ny, stride, 0, self.config.downsample);

        let mut d_var = self
            .file
            .variable_mut("displacement")
            .ok_or_else(|| NetCdfError::MissingVariable("displacement".to_string()))?;
        d_var.put_values(&to_f32(&d), ..)?;
        Ok(())
    }

    /// Append the current state of `patch` as a new time frame.
    ///
    /// Returns the index of the written frame.
    pub fn append_frame<P: WavePropagation + ?Sized>(
        &mut self,
        time: Real,
        patch: &P,
    ) -> Result<usize, NetCdfError> {
        if (patch.nx(), patch.ny()) != (self.nx, self.ny) {
            return Err(NetCdfError::InvalidData(format!(
                "patch is {}×{}, file expects {}×{}",
                patch.nx(),
                patch.ny(),
                self.nx,
                self.ny
            )));
        }

        let t_idx = self.time_index;
        {
            let mut time_var = self
                .file
                .variable_mut("time")
                .ok_or_else(|| NetCdfError::MissingVariable("time".to_string()))?;
            time_var.put_value(time as f32, [t_idx])?;
        }

        let mut fields = vec![("height", patch.height()), ("momentumX", patch.momentum_x())];
        if self.with_momentum_y {
            if let Some(hv) = patch.momentum_y() {
                fields.push(("momentumY", hv));
            }
        }

        let (stride, offset) = (patch.stride(), patch.cell_index(0, 0));
        for (name, field) in fields {
            let data = downsample(field, self.nx, self.ny, stride, offset, self.config.downsample);
            let mut var = self
                .file
                .variable_mut(name)
                .ok_or_else(|| NetCdfError::MissingVariable(name.to_string()))?;
            var.put_values(&to_f32(&data), (t_idx, .., ..))?;
        }

        self.time_index += 1;
        Ok(t_idx)
    }

    /// Number of frames written.
    pub fn n_frames(&self) -> usize {
        self.time_index
    }

    /// Cell size the coordinates were written with.
    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

#[cfg(feature = "netcdf")]
fn to_f32(data: &[Real]) -> Vec<f32> {
    data.iter().map(|&v| v as f32).collect()
}

/// Read variable `var` over the `x` and `y` coordinates of a NetCDF file.
///
/// The cell size is derived from the `x` coordinate as
/// `(x[last] − x[0]) / (nx − 1)`; the origin is `(x[0], y[0])`.
#[cfg(feature = "netcdf")]
pub fn load_2d_array(path: impl AsRef<Path>, var: &str) -> Result<GriddedField, NetCdfError> {
    let file = netcdf::open(path.as_ref())?;

    let read = |name: &str| -> Result<Vec<f64>, NetCdfError> {
        let variable = file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingVariable(name.to_string()))?;
        let data: Vec<f64> = variable.get_values(..)?;
        Ok(data)
    };

    let x = read("x")?;
    let y = read("y")?;
    let z = read(var)?;
    let (nx, ny) = (x.len(), y.len());

    if nx == 0 || ny == 0 || z.len() != nx * ny {
        return Err(NetCdfError::InvalidData(format!(
            "`{var}` has {} values for a {nx}×{ny} grid",
            z.len()
        )));
    }

    let cell_size = if nx > 1 {
        (x[nx - 1] - x[0]) / (nx - 1) as f64
    } else if ny > 1 {
        (y[ny - 1] - y[0]) / (ny - 1) as f64
    } else {
        1.0
    };

    let nan_count = z.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        tracing::warn!(variable = var, nan_count, "input field contains NaN values");
    }

    let data: Vec<Real> = z.iter().map(|&v| v as Real).collect();
    let field = GriddedField::new(nx, ny, cell_size as Real, data).ok_or_else(|| {
        NetCdfError::InvalidData(format!("non-positive cell size {cell_size} in `x`"))
    })?;
    Ok(field.with_origin(x[0] as Real, y[0] as Real))
}

/// Read variable `var` over the `x` and `y` coordinates of a NetCDF file.
#[cfg(not(feature = "netcdf"))]
pub fn load_2d_array(_path: impl AsRef<Path>, _var: &str) -> Result<GriddedField, NetCdfError> {
    Err(NetCdfError::FeatureDisabled)
}
