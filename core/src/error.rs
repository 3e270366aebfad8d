//! Error types for ledger operations.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error taxonomy for every ledger operation.
///
/// Each variant carries the human-readable message that is handed back to the
/// caller verbatim. None of them are retried and none are fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// No record at the requested key.
    #[error("{0}")]
    NotFound(String),

    /// The caller is not the recorded owner.
    #[error("{0}")]
    Unauthorized(String),

    /// A state-transition precondition was not met.
    #[error("{0}")]
    Conflict(String),

    /// Not enough unused tickets to satisfy a purchase.
    #[error("{0}")]
    InsufficientInventory(String),

    /// Unexpected internal fault.
    #[error("{0}")]
    Operation(String),
}

impl LedgerError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an authorization error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an insufficient-inventory error.
    #[must_use]
    pub fn insufficient_inventory(message: impl Into<String>) -> Self {
        Self::InsufficientInventory(message.into())
    }

    /// Create an internal operation error.
    #[must_use]
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation(message.into())
    }

    /// Stable machine-readable code for this error category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientInventory(_) => "INSUFFICIENT_INVENTORY",
            Self::Operation(_) => "OPERATION_ERROR",
        }
    }

    /// The message handed back to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Unauthorized(message)
            | Self::Conflict(message)
            | Self::InsufficientInventory(message)
            | Self::Operation(message) => message,
        }
    }

    /// Whether this error is an internal fault rather than a caller mistake.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Operation(_))
    }
}
