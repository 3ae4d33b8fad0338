//! Ledger error types.

use tally_shared::types::{TenantId, TransactionId};
use thiserror::Error;

/// Errors that can occur while assembling a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A transaction belongs to another tenant.
    #[error("Transaction {transaction} belongs to tenant {found}, expected tenant {expected}")]
    TenantMismatch {
        /// Tenant the ledger is built for.
        expected: TenantId,
        /// Tenant found on the transaction.
        found: TenantId,
        /// The offending transaction.
        transaction: TransactionId,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TenantMismatch { .. } => "LEDGER_TENANT_MISMATCH",
        }
    }
}
