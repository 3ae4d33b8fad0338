//! Data-access error types.

use tally_shared::types::TenantId;
use thiserror::Error;

/// Errors returned by a [`super::ReportDataSource`].
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The tenant has no data.
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),

    /// The backing store could not be reached.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// The snapshot could not be decoded.
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DataSourceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TenantNotFound(_) => "TENANT_NOT_FOUND",
            Self::Unavailable(_) => "DATA_SOURCE_UNAVAILABLE",
            Self::Decode(_) => "SNAPSHOT_DECODE_ERROR",
        }
    }

    /// Returns true if repeating the call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
