//! Time step control.

mod cfl;

pub use cfl::{
    CFL_1D, CFL_2D, CflConfig, max_wave_speed_1d, max_wave_speed_2d, stable_timestep,
};
