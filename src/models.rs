//! Public plant and zone models.
//!
//! # Organization
//!
//! - [`plant`]: Central plant equipment (chillers).
//! - [`zone`]: Zone-level balances (contaminants).
//!
//! # Model structure
//!
//! Each model lives in its own module and keeps its computation in private
//! submodules (the chiller's `core`, the contaminant balance's per-scheme
//! formulas). Those are implementation details and are **not** re-exported as
//! part of the public API.
//!
//! Public entry points are thin adapters that delegate to the core, either as a
//! [`twine_core::Model`] implementation or as a registry that owns per-instance
//! state between time steps.

pub mod plant;
pub mod zone;
