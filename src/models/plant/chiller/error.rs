use thiserror::Error;

use crate::support::{constraint::ConstraintError, curve::CurveError};

/// Invalid chiller configuration, detected while loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChillerConfigError {
    #[error("chiller `{chiller}`: {field} is invalid")]
    InvalidParameter {
        chiller: String,
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error(
        "chiller `{chiller}`: reference evaporator outlet ({evaporator} °C) must be below \
         reference condenser outlet ({condenser} °C)"
    )]
    ReferenceTemperatures {
        chiller: String,
        evaporator: f64,
        condenser: f64,
    },

    #[error("chiller `{chiller}`: minimum part-load ratio {min} exceeds maximum {max}")]
    PartLoadRange { chiller: String, min: f64, max: f64 },

    #[error("chiller `{chiller}`: {field} {value} is outside [{min}, {max}]")]
    OutsidePartLoadRange {
        chiller: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("chiller `{chiller}`: {role} curve")]
    Curve {
        chiller: String,
        role: &'static str,
        #[source]
        source: CurveError,
    },

    #[error(
        "chiller `{chiller}`: EIR part-load curve has an invalid part-load domain [{min}, {max}]"
    )]
    PartLoadDomain { chiller: String, min: f64, max: f64 },

    #[error(
        "chiller `{chiller}`: EIR part-load curve is negative ({value}) at condenser outlet \
         {condenser_temperature} °C and part-load ratio {part_load_ratio}"
    )]
    NegativePartLoadCurve {
        chiller: String,
        condenser_temperature: f64,
        part_load_ratio: f64,
        value: f64,
    },

    #[error("chiller `{chiller}` is defined more than once")]
    DuplicateName { chiller: String },
}

/// Errors raised while simulating a loaded chiller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChillerError {
    #[error("no chiller is registered under handle {0}")]
    UnknownHandle(usize),
}
