//! Zone-level balance models.

pub mod contaminant;
