//! Boundary conditions for the wave propagation patches.
//!
//! Two mechanisms exist:
//!
//! | Mechanism | Where | Description |
//! |-----------|-------|-------------|
//! | [`Outflow`] | ghost cells | Copies the nearest interior cell into each ghost cell |
//! | [`reflect_at_interface`] | interfaces | Mirrors the wet side into a dry neighbor |
//!
//! Ghost conditions are not applied automatically; call
//! `set_ghost_outflow()` on the patch before every time step.

mod outflow;
mod reflective;

pub use outflow::Outflow;
pub use reflective::{is_dry, reflect_at_interface};

use crate::types::{GridExtent, Real};

/// Condition that fills ghost cells of one field.
pub trait GhostCondition: Send + Sync {
    /// Fill both ghost cells of a line of `n + 2` values.
    fn fill_line(&self, field: &mut [Real]);

    /// Fill the ghost ring of a ghost-padded 2D field.
    fn fill_grid(&self, extent: GridExtent, field: &mut [Real]);

    /// Name of this condition (for logs).
    fn name(&self) -> &'static str;
}
