use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned by the simulation service on any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("surface_area must be a number greater than 0 (got {0})")]
    SurfaceAreaNotPositive(f64),
    #[error("location must be at least {min} characters")]
    LocationTooShort { min: usize },
}

impl From<ValidationError> for ErrorBody {
    fn from(value: ValidationError) -> Self {
        Self::new(value.to_string())
    }
}
