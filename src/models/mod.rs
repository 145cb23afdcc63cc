pub mod assessment;
pub mod enums;
pub mod patient;

pub use assessment::*;
pub use enums::*;
pub use patient::*;

use thiserror::Error;

/// Validation errors raised when untrusted input fails to match the
/// domain vocabulary or plausible clinical ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("{field} out of plausible range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
