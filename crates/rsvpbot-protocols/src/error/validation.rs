//! Identity validation errors.

use thiserror::Error;

/// Construction-time validation failure. Aborts the run before any
/// automation starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required!")]
    MissingField(&'static str),
}
