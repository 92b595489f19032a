use thiserror::Error;

/// Errors that stop a [`solve`](super::solve) call.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },

    #[error("residual is not finite at x = {x}")]
    NonFiniteResidual { x: f64 },

    #[error("model evaluation failed")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("problem evaluation failed")]
    Problem(#[source] Box<dyn std::error::Error + Send + Sync>),
}
