//! Shared primitives for all Rust crates in Demotrail.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Demotrail crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of the demo request an audit entry belongs to.
///
/// Valid identifiers are strictly positive; construction rejects zero and
/// negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemoRequestId(i32);

impl DemoRequestId {
    /// Creates a validated demo request identifier.
    pub fn new(value: i32) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::Validation(format!(
                "invalid demo request id '{value}'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl Display for DemoRequestId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
