//! Report error types.

use tally_shared::AppError;
use thiserror::Error;

use crate::accounts::AccountGraphError;
use crate::ledger::LedgerError;
use crate::period::PeriodError;
use crate::source::DataSourceError;

/// Errors that can occur during report generation.
///
/// An empty result is not an error: it is a report without nodes.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The chart of accounts is malformed.
    #[error("Invalid account hierarchy: {0}")]
    Graph(#[from] AccountGraphError),

    /// A ledger could not be assembled.
    #[error("Invalid ledger: {0}")]
    Ledger(#[from] LedgerError),

    /// The requested range is invalid.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The data-access collaborator failed.
    #[error("Failed to load report data: {0}")]
    DataSource(#[from] DataSourceError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::Period(err) => err.error_code(),
            Self::DataSource(err) => err.error_code(),
        }
    }

    /// Returns true if repeating the request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::DataSource(err) => err.is_retryable(),
            Self::Graph(_) | Self::Ledger(_) | Self::Period(_) => false,
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Period(_) => Self::Validation(err.to_string()),
            ReportError::Graph(_) | ReportError::Ledger(_) => Self::BusinessRule(err.to_string()),
            ReportError::DataSource(DataSourceError::TenantNotFound(_)) => {
                Self::NotFound(err.to_string())
            }
            ReportError::DataSource(_) => Self::DataSource(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::error::Error as _;
    use tally_shared::types::{AccountId, TenantId};

    #[test]
    fn test_error_codes() {
        let err = ReportError::from(AccountGraphError::CycleDetected {
            account: AccountId::new(1),
        });
        assert_eq!(err.error_code(), "ACCOUNT_CYCLE_DETECTED");
        assert!(!err.is_retryable());

        let err = ReportError::from(DataSourceError::Unavailable("timeout".into()));
        assert_eq!(err.error_code(), "DATA_SOURCE_UNAVAILABLE");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_data_source_error_is_preserved_as_source() {
        let err = ReportError::from(DataSourceError::TenantNotFound(TenantId::new(4)));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Tenant not found: 4");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let period = ReportError::from(PeriodError::InvalidDateRange {
            start: day,
            end: day.pred_opt().unwrap(),
        });
        assert_eq!(AppError::from(period).status_code(), 400);

        let missing = ReportError::from(DataSourceError::TenantNotFound(TenantId::new(4)));
        assert_eq!(AppError::from(missing).status_code(), 404);

        let cycle = ReportError::from(AccountGraphError::CycleDetected {
            account: AccountId::new(1),
        });
        assert_eq!(AppError::from(cycle).error_code(), "BUSINESS_RULE_VIOLATION");
    }
}
