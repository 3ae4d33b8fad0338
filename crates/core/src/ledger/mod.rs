//! Period-scoped transaction ledgers.
//!
//! This module implements the read side of double-entry bookkeeping:
//! - Ledger transactions (debits and credits)
//! - The immutable `Ledger` with per-account aggregation
//! - Running balance series for account statements
//! - Journal validation (debits must equal credits)
//! - Error types for ledger operations
//!
//! Sign convention, applied everywhere: debits are positive, credits are negative.

pub mod aggregate;
pub mod error;
pub mod running;
pub mod transaction;
pub mod validation;


pub use aggregate::Ledger;
pub use error::LedgerError;
pub use running::RunningBalanceEntry;
pub use transaction::{EntryType, Transaction};
pub use validation::{UnbalancedLedgerError, ensure_ledger_balanced, validate_journal};
