//! Journal validation.
//!
//! These checks guard the write side (manual journals, imports). The
//! reporting path never raises them.

use rust_decimal::Decimal;
use thiserror::Error;

use super::aggregate::Ledger;
use super::transaction::{EntryType, Transaction};

/// Scale used when comparing debit and credit totals.
const COMPARISON_SCALE: u32 = 2;

/// Validation errors for journals and ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnbalancedLedgerError {
    /// Entries do not balance.
    #[error("Ledger is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Journal has no entries.
    #[error("Journal must have at least one entry")]
    NoEntries,

    /// Journal has only one side (all debits or all credits).
    #[error("Journal must have both debit and credit entries")]
    SingleSided,

    /// Entry amount is zero or negative.
    #[error("Entry amount must be positive")]
    InvalidAmount,
}

impl UnbalancedLedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "CREDIT_DEBIT_NOT_EQUAL",
            Self::NoEntries => "JOURNAL_NO_ENTRIES",
            Self::SingleSided => "CREDIT_DEBIT_NOT_EQUAL_ZERO",
            Self::InvalidAmount => "ENTRY_AMOUNT_NOT_POSITIVE",
        }
    }
}

/// Validates that the entries of one journal balance.
///
/// # Errors
///
/// Returns an error if the entries are not balanced or violate business rules.
pub fn validate_journal(entries: &[Transaction]) -> Result<(), UnbalancedLedgerError> {
    if entries.is_empty() {
        return Err(UnbalancedLedgerError::NoEntries);
    }

    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;

    for entry in entries {
        if entry.amount <= Decimal::ZERO {
            return Err(UnbalancedLedgerError::InvalidAmount);
        }

        match entry.direction {
            EntryType::Debit => total_debits += entry.amount,
            EntryType::Credit => total_credits += entry.amount,
        }
    }

    if total_debits.is_zero() || total_credits.is_zero() {
        return Err(UnbalancedLedgerError::SingleSided);
    }

    compare_totals(total_debits, total_credits)
}

/// Checks that a whole ledger balances (total debits equal total credits).
///
/// An empty ledger is balanced.
///
/// # Errors
///
/// Returns [`UnbalancedLedgerError::Unbalanced`] when the totals differ.
pub fn ensure_ledger_balanced(ledger: &Ledger) -> Result<(), UnbalancedLedgerError> {
    compare_totals(ledger.total_debit(), ledger.total_credit())
}

fn compare_totals(debits: Decimal, credits: Decimal) -> Result<(), UnbalancedLedgerError> {
    let debits = debits.round_dp(COMPARISON_SCALE);
    let credits = credits.round_dp(COMPARISON_SCALE);

    if debits != credits {
        return Err(UnbalancedLedgerError::Unbalanced { debits, credits });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tally_shared::types::{AccountId, TenantId, TransactionId};

    fn make_entry(direction: EntryType, amount: Decimal) -> Transaction {
        Transaction::new(
            TransactionId::new(1),
            TenantId::new(1),
            AccountId::new(1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            amount,
            direction,
        )
    }

    #[test]
    fn test_balanced_entries() {
        let entries = vec![
            make_entry(EntryType::Debit, dec!(100.00)),
            make_entry(EntryType::Credit, dec!(60.00)),
            make_entry(EntryType::Credit, dec!(40.00)),
        ];
        assert!(validate_journal(&entries).is_ok());
    }

    #[test]
    fn test_unbalanced_entries() {
        let entries = vec![
            make_entry(EntryType::Debit, dec!(100.00)),
            make_entry(EntryType::Credit, dec!(50.00)),
        ];
        assert_eq!(
            validate_journal(&entries),
            Err(UnbalancedLedgerError::Unbalanced {
                debits: dec!(100.00),
                credits: dec!(50.00),
            })
        );
    }

    #[test]
    fn test_sub_cent_difference_is_balanced() {
        let entries = vec![
            make_entry(EntryType::Debit, dec!(10.001)),
            make_entry(EntryType::Credit, dec!(10.00)),
        ];
        assert!(validate_journal(&entries).is_ok());
    }

    #[test]
    fn test_no_entries() {
        assert_eq!(validate_journal(&[]), Err(UnbalancedLedgerError::NoEntries));
    }

    #[test]
    fn test_single_sided() {
        let entries = vec![
            make_entry(EntryType::Debit, dec!(100.00)),
            make_entry(EntryType::Debit, dec!(50.00)),
        ];
        assert_eq!(
            validate_journal(&entries),
            Err(UnbalancedLedgerError::SingleSided)
        );
    }

    #[test]
    fn test_non_positive_amount() {
        let entries = vec![
            make_entry(EntryType::Debit, Decimal::ZERO),
            make_entry(EntryType::Credit, dec!(1)),
        ];
        assert_eq!(
            validate_journal(&entries),
            Err(UnbalancedLedgerError::InvalidAmount)
        );
    }

    #[test]
    fn test_ledger_balance_check() {
        let balanced = Ledger::from_transactions(vec![
            make_entry(EntryType::Debit, dec!(20)),
            make_entry(EntryType::Credit, dec!(20)),
        ]);
        assert!(ensure_ledger_balanced(&balanced).is_ok());
        assert!(ensure_ledger_balanced(&Ledger::new()).is_ok());

        let unbalanced = Ledger::from_transactions(vec![make_entry(EntryType::Debit, dec!(20))]);
        assert!(matches!(
            ensure_ledger_balanced(&unbalanced),
            Err(UnbalancedLedgerError::Unbalanced { .. })
        ));
    }
}
