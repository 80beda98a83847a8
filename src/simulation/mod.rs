//! Simulation driver.
//!
//! Ties together a patch built from a setup (or restored from a checkpoint),
//! frame output, stations and the CFL-controlled time loop:
//!
//! 1. write a frame whenever the frame index `step · (frames − 1) / (steps − 1)` changes
//! 2. sample stations that are due
//! 3. `dt = compute_max_timestep(dx)`; stop gracefully if it is not finite
//! 4. `set_ghost_outflow()`, `time_step(dt / dx)`, `t += dt`
//!
//! # Example
//! ```no_run
//! use wave_rs::setup::ArtificialTsunami2D;
//! use wave_rs::simulation::{OutputFormat, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new(100, 100)
//!     .with_cell_size(10.0)
//!     .with_max_duration(60.0)
//!     .with_output_format(OutputFormat::Csv);
//! let result = Simulation::new(config, ArtificialTsunami2D::new()).run()?;
//! assert!(result.completed());
//! # Ok::<(), wave_rs::simulation::SimulationError>(())
//! ```

mod runner;

pub use runner::{
    OutputFormat, Simulation, SimulationConfig, SimulationError, SimulationResult,
    TerminationReason, frame_path,
};
