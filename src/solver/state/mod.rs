//! Grid state storage.

mod buffer;

pub use buffer::{DoubleBuffer, Slot};
