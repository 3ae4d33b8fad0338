//! Running balance series for account statements.

use rust_decimal::Decimal;

use super::transaction::Transaction;

/// A transaction annotated with the account balance around it.
///
/// - `previous_balance`: balance before this transaction
/// - `running_balance`: balance after this transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningBalanceEntry<'a> {
    /// The transaction.
    pub transaction: &'a Transaction,
    /// Position within the account's series, starting at 1.
    pub sequence: usize,
    /// Balance before this transaction.
    pub previous_balance: Decimal,
    /// Balance after this transaction.
    pub running_balance: Decimal,
}

impl<'a> RunningBalanceEntry<'a> {
    /// Creates the first entry of a series seeded by an opening balance.
    #[must_use]
    pub fn first(opening_balance: Decimal, transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            sequence: 1,
            previous_balance: opening_balance,
            running_balance: opening_balance + transaction.signed_amount(),
        }
    }

    /// Creates the entry following `previous`.
    ///
    /// - running_balance[N] = previous_balance[N] + signed amount
    /// - previous_balance[N] = running_balance[N-1]
    #[must_use]
    pub fn next(previous: &Self, transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            sequence: previous.sequence + 1,
            previous_balance: previous.running_balance,
            running_balance: previous.running_balance + transaction.signed_amount(),
        }
    }
}
