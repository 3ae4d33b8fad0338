//! Account hierarchy error types.

use tally_shared::types::AccountId;
use thiserror::Error;

/// Errors raised while building the account graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountGraphError {
    /// A parent chain revisits an account.
    #[error("Cycle detected in account hierarchy at account {account}")]
    CycleDetected {
        /// Account found twice on its own parent chain.
        account: AccountId,
    },

    /// A parent reference points to an account that does not exist.
    #[error("Account {account} references unknown parent {parent}")]
    UnknownParent {
        /// The child account.
        account: AccountId,
        /// The missing parent.
        parent: AccountId,
    },

    /// The same account id appears twice in the input.
    #[error("Duplicate account: {0}")]
    DuplicateAccount(AccountId),
}

impl AccountGraphError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CycleDetected { .. } => "ACCOUNT_CYCLE_DETECTED",
            Self::UnknownParent { .. } => "ACCOUNT_UNKNOWN_PARENT",
            Self::DuplicateAccount(_) => "ACCOUNT_DUPLICATE",
        }
    }
}
