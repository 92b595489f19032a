use thiserror::Error;

use super::CurveForm;

/// Errors raised while building or resolving performance curves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve `{name}` is not defined")]
    Unknown { name: String },

    #[error("curve `{name}` must take {expected} variables but its form takes {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{form:?} curve needs {expected} coefficients, got {actual}")]
    CoefficientCount {
        form: CurveForm,
        expected: usize,
        actual: usize,
    },

    #[error("coefficient {index} is not finite")]
    NonFiniteCoefficient { index: usize },

    #[error("invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },
}
