//! Simulation driver implementation.
//!
//! Sequences output frames, station sampling, CFL step control, ghost-cell
//! refresh and the time step itself for one patch.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::flux::StandardSolver;
use crate::io::{Checkpoint, CsvError, NetCdfError, Station, StationError, write_patch};
#[cfg(feature = "netcdf")]
use crate::io::{NetCdfWriter, NetCdfWriterConfig};
use crate::setup::{BoxedSetup, Setup};
use crate::solver::{Diagnostics, GridError, WavePropagation, WavePropagation1D, WavePropagation2D};
use crate::time::CflConfig;
use crate::types::Real;

// =============================================================================
// Errors
// =============================================================================

/// Error type for simulation runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The CFL controller produced NaN and the run was configured to fail on it
    #[error("non-finite time step at step {step} (t = {time})")]
    NonFiniteTimestep { step: usize, time: Real },

    /// CSV frame output failed
    #[error("CSV output failed: {0}")]
    Csv(#[from] CsvError),

    /// Station output failed
    #[error("station output failed: {0}")]
    Station(#[from] StationError),

    /// NetCDF output or checkpoint storage failed
    #[error("NetCDF output failed: {0}")]
    NetCdf(#[from] NetCdfError),

    /// Output directory could not be prepared
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Restored arrays do not fit the patch
    #[error("invalid checkpoint: {0}")]
    Grid(#[from] GridError),

    /// Configuration is inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Format of the per-frame output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `solution_<n>.csv` per frame
    #[default]
    Csv,
    /// One `solution.nc` with a time dimension (requires `netcdf` feature)
    NetCdf,
    /// No frame output; stations are still written
    None,
}

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Cells in x-direction.
    pub nx: usize,
    /// Cells in y-direction; `ny <= 1` selects the 1D patch.
    pub ny: usize,
    /// Cell size in meters, used for CFL and output coordinates.
    pub cell_size: Real,
    /// Scale at which the setup is evaluated (`x = (i − 0.5) · scale`).
    pub setup_scale: Real,
    /// Step limit; `None` runs until `max_duration`.
    pub max_steps: Option<usize>,
    /// Simulated time limit in seconds.
    pub max_duration: Real,
    /// Downsampling factor of frame output.
    pub output_stride: usize,
    /// Number of frames spread over the run.
    pub output_frames: usize,
    /// Directory for frames, stations and NetCDF output.
    pub output_dir: PathBuf,
    /// Frame output format.
    pub output_format: OutputFormat,
    /// Sampling interval of stations added with [`Simulation::with_station_at`].
    pub station_interval: Real,
    /// Riemann solver.
    pub solver: StandardSolver,
    /// CFL factor; `None` uses the patch default (0.5 in 1D, 0.45 in 2D).
    pub cfl: Option<Real>,
    /// Checkpoint written at the end of the run (requires `netcdf` feature).
    pub checkpoint_path: Option<PathBuf>,
    /// Return an error instead of stopping when the time step becomes NaN.
    pub fail_on_non_finite: bool,
    /// Report frames at `info` instead of `debug` level.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nx: 100,
            ny: 1,
            cell_size: 1.0,
            setup_scale: 1.0,
            max_steps: None,
            max_duration: 10.0,
            output_stride: 1,
            output_frames: 10,
            output_dir: PathBuf::from("."),
            output_format: OutputFormat::Csv,
            station_interval: 1.0,
            solver: StandardSolver::FWave,
            cfl: None,
            checkpoint_path: None,
            fail_on_non_finite: false,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration for an `nx × ny` grid.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            ..Self::default()
        }
    }

    /// Set the cell size and evaluate the setup at the same scale.
    pub fn with_cell_size(mut self, cell_size: Real) -> Self {
        self.cell_size = cell_size;
        self.setup_scale = cell_size;
        self
    }

    /// Set the setup evaluation scale only.
    pub fn with_setup_scale(mut self, scale: Real) -> Self {
        self.setup_scale = scale;
        self
    }

    /// Limit the number of steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Limit the simulated time.
    pub fn with_max_duration(mut self, max_duration: Real) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Set the number of frames and their downsampling factor.
    pub fn with_output(mut self, frames: usize, stride: usize) -> Self {
        self.output_frames = frames;
        self.output_stride = stride.max(1);
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the frame output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the default station sampling interval.
    pub fn with_station_interval(mut self, interval: Real) -> Self {
        self.station_interval = interval;
        self
    }

    /// Select the Riemann solver.
    pub fn with_solver(mut self, solver: StandardSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Override the CFL factor.
    pub fn with_cfl(mut self, cfl: Real) -> Self {
        self.cfl = Some(cfl);
        self
    }

    /// Write a checkpoint at the end of the run.
    pub fn with_checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = Some(path.into());
        self
    }

    /// Fail instead of stopping when the time step becomes NaN.
    pub fn with_fail_on_non_finite(mut self, fail: bool) -> Self {
        self.fail_on_non_finite = fail;
        self
    }

    /// Report progress at `info` level.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |msg: String| Err(SimulationError::InvalidConfig(msg));
        if self.nx == 0 {
            return invalid("nx must be positive".to_string());
        }
        if !(self.cell_size > 0.0) || !self.cell_size.is_finite() {
            return invalid(format!("cell size must be positive, got {}", self.cell_size));
        }
        if !(self.setup_scale > 0.0) {
            return invalid(format!("setup scale must be positive, got {}", self.setup_scale));
        }
        if self.max_steps.is_none() && !self.max_duration.is_finite() {
            return invalid("either max_steps or a finite max_duration is required".to_string());
        }
        if let Some(cfl) = self.cfl
            && !(cfl > 0.0 && cfl <= 1.0)
        {
            return invalid(format!("CFL factor must be in (0, 1], got {cfl}"));
        }
        if self.output_frames == 0 && self.output_format != OutputFormat::None {
            return invalid("output_frames must be positive".to_string());
        }
        Ok(())
    }

    fn is_1d(&self) -> bool {
        self.ny <= 1
    }
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Why the time loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// Step limit reached
    MaxSteps,
    /// Simulated time limit reached
    MaxDuration,
    /// No wet cell left; the time step was infinite
    NoFluid,
    /// The state contained NaN
    NonFinite,
}

/// Result of a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Index of the next step (steps taken, plus the resumed offset).
    pub steps: usize,
    /// Final simulation time reached.
    pub final_time: Real,
    /// Number of frames written.
    pub frames_written: usize,
    /// Why the loop stopped.
    pub reason: TerminationReason,
    /// Stations with all their records.
    pub stations: Vec<Station>,
    /// Totals of the final state.
    pub diagnostics: Diagnostics,
}

impl SimulationResult {
    /// Whether the run stopped at one of its configured limits.
    pub fn completed(&self) -> bool {
        matches!(
            self.reason,
            TerminationReason::MaxSteps | TerminationReason::MaxDuration
        )
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

enum InitialState {
    Setup(BoxedSetup),
    Checkpoint(Box<Checkpoint>),
}

/// High-level simulation runner.
///
/// ```no_run
/// use wave_rs::setup::DamBreak1D;
/// use wave_rs::simulation::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig::new(100, 1)
///     .with_max_duration(5.0)
///     .with_output_dir("out");
/// let result = Simulation::new(config, DamBreak1D::new(10.0, 8.0, 50.0))
///     .with_station_at("center", 50, 0)
///     .run()?;
/// println!("{} steps, t = {}", result.steps, result.final_time);
/// # Ok::<(), wave_rs::simulation::SimulationError>(())
/// ```
pub struct Simulation {
    config: SimulationConfig,
    initial: InitialState,
    stations: Vec<Station>,
    start_time: Real,
    start_step: usize,
}

impl Simulation {
    /// Create a run that starts from `setup` at t = 0.
    pub fn new(config: SimulationConfig, setup: impl Setup + 'static) -> Self {
        Self::from_boxed(config, Box::new(setup))
    }

    /// Create a run from a boxed setup.
    pub fn from_boxed(config: SimulationConfig, setup: BoxedSetup) -> Self {
        Self {
            config,
            initial: InitialState::Setup(setup),
            stations: Vec::new(),
            start_time: 0.0,
            start_step: 0,
        }
    }

    /// Continue a run from a checkpoint.
    ///
    /// Grid size, cell size, CFL factor, time, step index and stations come
    /// from the checkpoint; everything else from `config`.
    pub fn resume(mut config: SimulationConfig, checkpoint: Checkpoint) -> Self {
        config.nx = checkpoint.extent.nx();
        config.ny = checkpoint.extent.ny();
        config.cell_size = checkpoint.cell_size;
        config.setup_scale = checkpoint.cell_size;
        config.cfl = Some(checkpoint.cfl);

        Self {
            stations: checkpoint.stations.clone(),
            start_time: checkpoint.time,
            start_step: checkpoint.step,
            config,
            initial: InitialState::Checkpoint(Box::new(checkpoint)),
        }
    }

    /// Add stations.
    pub fn with_stations(mut self, stations: impl IntoIterator<Item = Station>) -> Self {
        self.stations.extend(stations);
        self
    }

    /// Add a station at interior cell `(ix, iy)` sampled at the configured interval.
    pub fn with_station_at(mut self, name: impl Into<String>, ix: usize, iy: usize) -> Self {
        let interval = self.config.station_interval;
        self.stations.push(Station::new(name, ix, iy, interval));
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn build_patch(&self) -> Result<Box<dyn WavePropagation>, SimulationError> {
        let config = &self.config;
        let cfl = config.cfl.map(CflConfig::new);

        let patch: Box<dyn WavePropagation> = match &self.initial {
            InitialState::Setup(setup) => {
                if config.is_1d() {
                    let mut patch = WavePropagation1D::from_setup(
                        config.nx,
                        setup.as_ref(),
                        config.setup_scale,
                        config.solver,
                    );
                    if let Some(cfl) = cfl {
                        patch = patch.with_cfl(cfl);
                    }
                    Box::new(patch)
                } else {
                    let mut patch = WavePropagation2D::from_setup(
                        config.nx,
                        config.ny,
                        setup.as_ref(),
                        config.setup_scale,
                        config.setup_scale,
                        config.solver,
                    );
                    if let Some(cfl) = cfl {
                        patch = patch.with_cfl(cfl);
                    }
                    Box::new(patch)
                }
            }
            InitialState::Checkpoint(checkpoint) => {
                if config.is_1d() {
                    let setup = checkpoint.setup().ok_or_else(|| {
                        SimulationError::InvalidConfig("checkpoint arrays do not match its extent".to_string())
                    })?;
                    let patch = WavePropagation1D::from_setup(
                        config.nx,
                        &setup,
                        checkpoint.cell_size,
                        config.solver,
                    )
                    .with_cfl(CflConfig::new(checkpoint.cfl));
                    Box::new(patch)
                } else {
                    Box::new(checkpoint.restore(config.solver)?)
                }
            }
        };
        Ok(patch)
    }

    /// Run the time loop.
    pub fn run(mut self) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;
        let mut patch = self.build_patch()?;
        let config = &self.config;
        let cell_size = config.cell_size;

        tracing::info!(
            nx = config.nx,
            ny = config.ny,
            cell_size,
            max_steps = ?config.max_steps,
            max_duration = config.max_duration as f64,
            solver = patch.solver_name(),
            cfl = patch.cfl_factor() as f64,
            stations = self.stations.len(),
            "runtime configuration"
        );

        if config.output_format != OutputFormat::None {
            std::fs::create_dir_all(&config.output_dir)?;
        }
        let mut frames = FrameOutput::open(config, patch.as_ref())?;

        let max_steps = config.max_steps.unwrap_or(usize::MAX);
        let steps_for_printing = match config.max_steps {
            Some(n) => n,
            None => {
                let dt0 = patch.compute_max_timestep(cell_size);
                if dt0.is_finite() && dt0 > 0.0 {
                    ((config.max_duration - self.start_time) / dt0).ceil().max(1.0) as usize
                } else {
                    1
                }
            }
        };
        let output_span = config.output_frames.saturating_sub(1);

        let mut time = self.start_time;
        let mut step = self.start_step;
        let mut last_output: Option<usize> = None;
        let mut reason = None;

        tracing::debug!(steps_for_printing, "entering time loop");

        while step < max_steps && time < config.max_duration {
            let output_index = step.saturating_sub(self.start_step) * output_span
                / steps_for_printing.saturating_sub(1).max(1);
            if last_output != Some(output_index) {
                last_output = Some(output_index);
                frames.write(config, patch.as_ref(), time, step)?;
            }

            for station in self.stations.iter_mut().filter(|s| s.needs_update(time)) {
                station.record_state(patch.as_ref(), time);
            }

            let dt = patch.compute_max_timestep(cell_size);
            if !dt.is_finite() {
                if dt.is_nan() && config.fail_on_non_finite {
                    return Err(SimulationError::NonFiniteTimestep { step, time });
                }
                let why = if dt.is_nan() {
                    TerminationReason::NonFinite
                } else {
                    TerminationReason::NoFluid
                };
                tracing::warn!(step, time = time as f64, reason = ?why, "stopping time loop");
                reason = Some(why);
                break;
            }

            patch.set_ghost_outflow();
            patch.time_step(dt / cell_size);
            time += dt;
            step += 1;
        }

        let reason = reason.unwrap_or(if step >= max_steps {
            TerminationReason::MaxSteps
        } else {
            TerminationReason::MaxDuration
        });

        if matches!(reason, TerminationReason::NoFluid | TerminationReason::NonFinite) {
            frames.write(config, patch.as_ref(), time, step)?;
        }

        tracing::debug!(step, time = time as f64, "finished time loop");

        if config.output_format != OutputFormat::None {
            for station in &self.stations {
                station.write_csv(&config.output_dir, true)?;
            }
        }

        if let Some(path) = &config.checkpoint_path {
            Checkpoint::capture(patch.as_ref(), cell_size, time, step, &self.stations).store(path)?;
        }

        let diagnostics = Diagnostics::compute(patch.as_ref(), cell_size);
        tracing::info!(
            steps = step,
            time = time as f64,
            frames = frames.written,
            reason = ?reason,
            "{}",
            diagnostics.summary_line()
        );

        Ok(SimulationResult {
            steps: step,
            final_time: time,
            frames_written: frames.written,
            reason,
            stations: self.stations,
            diagnostics,
        })
    }
}

// =============================================================================
// Frame Output
// =============================================================================

struct FrameOutput {
    written: usize,
    #[cfg(feature = "netcdf")]
    netcdf: Option<NetCdfWriter>,
}

impl FrameOutput {
    fn open(config: &SimulationConfig, patch: &dyn WavePropagation) -> Result<Self, SimulationError> {
        match config.output_format {
            OutputFormat::Csv | OutputFormat::None => Ok(Self {
                written: 0,
                #[cfg(feature = "netcdf")]
                netcdf: None,
            }),
            #[cfg(feature = "netcdf")]
            OutputFormat::NetCdf => {
                let nc_config = NetCdfWriterConfig::new(config.output_dir.join("solution.nc"))
                    .with_downsample(config.output_stride);
                let writer = NetCdfWriter::create(nc_config, patch, config.cell_size)?;
                Ok(Self {
                    written: 0,
                    netcdf: Some(writer),
                })
            }
            #[cfg(not(feature = "netcdf"))]
            OutputFormat::NetCdf => {
                let _ = patch;
                Err(NetCdfError::FeatureDisabled.into())
            }
        }
    }

    fn write(
        &mut self,
        config: &SimulationConfig,
        patch: &dyn WavePropagation,
        time: Real,
        step: usize,
    ) -> Result<(), SimulationError> {
        let target = match config.output_format {
            OutputFormat::None => return Ok(()),
            OutputFormat::Csv => {
                let path = frame_path(&config.output_dir, self.written);
                write_patch(&path, patch, config.cell_size, config.output_stride)?;
                path
            }
            OutputFormat::NetCdf => {
                #[cfg(feature = "netcdf")]
                if let Some(writer) = self.netcdf.as_mut() {
                    writer.append_frame(time, patch)?;
                }
                config.output_dir.join("solution.nc")
            }
        };

        if config.verbose {
            tracing::info!(frame = self.written, step, time = time as f64, path = %target.display(), "writing wave field");
        } else {
            tracing::debug!(frame = self.written, step, time = time as f64, path = %target.display(), "writing wave field");
        }
        self.written += 1;
        Ok(())
    }
}

/// Path of CSV frame `index`.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("solution_{index}.csv"))
}
