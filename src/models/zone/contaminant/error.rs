use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while building a zone contaminant balance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContaminantError {
    #[error("zone `{zone}`: invalid {field}")]
    InvalidParameter {
        zone: String,
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}
