//! Error types for pricefeed.
//!
//! One error enum covers the whole workspace, built with `thiserror`.
//! Every variant carries enough context to attribute the failure to the
//! item code that caused it.

use thiserror::Error;

/// Result type alias using `PriceError`.
pub type Result<T> = std::result::Result<T, PriceError>;

/// Main error type for all pricefeed operations.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The underlying price service failed for an item code.
    ///
    /// This is the cache's wrap of whatever the service reported; the
    /// original failure text is preserved in `reason`.
    #[error("getting price from service for '{code}': {reason}")]
    Service {
        /// Item code whose lookup failed.
        code: String,
        /// Failure text reported by the service.
        reason: String,
    },

    /// A price source has no entry for the requested item code.
    #[error("unknown item code: {0}")]
    UnknownItemCode(String),

    /// A batch lookup task terminated without reporting a result.
    #[error("price lookup task failed: {0}")]
    Task(String),
}

impl PriceError {
    /// Returns true if this error originated in the service layer.
    pub fn is_service_error(&self) -> bool {
        matches!(self, PriceError::Service { .. })
    }
}
