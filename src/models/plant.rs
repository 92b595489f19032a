//! Central plant equipment models.

pub mod chiller;
