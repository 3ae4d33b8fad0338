//! Immutable, period-scoped ledger with per-account aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, TenantId};

use super::error::LedgerError;
use super::running::RunningBalanceEntry;
use super::transaction::Transaction;

/// Transactions of one period, grouped by account.
///
/// Transactions are kept in date order (ties keep their input order), so
/// every account group is date ascending as well. All queries over accounts
/// without transactions return zero.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    by_account: BTreeMap<AccountId, Vec<usize>>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a set of transactions.
    #[must_use]
    pub fn from_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let mut transactions: Vec<Transaction> = transactions.into_iter().collect();
        transactions.sort_by_key(|tx| tx.date);

        let mut by_account: BTreeMap<AccountId, Vec<usize>> = BTreeMap::new();
        for (position, tx) in transactions.iter().enumerate() {
            by_account.entry(tx.account_id).or_default().push(position);
        }

        Self {
            transactions,
            by_account,
        }
    }

    /// Wraps a set of transactions that must all belong to `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TenantMismatch`] on the first foreign transaction.
    pub fn try_for_tenant(
        tenant_id: TenantId,
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> Result<Self, LedgerError> {
        let transactions: Vec<Transaction> = transactions.into_iter().collect();
        if let Some(foreign) = transactions.iter().find(|tx| tx.tenant_id != tenant_id) {
            return Err(LedgerError::TenantMismatch {
                expected: tenant_id,
                found: foreign.tenant_id,
                transaction: foreign.id,
            });
        }
        Ok(Self::from_transactions(transactions))
    }

    /// Returns true iff the ledger holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Returns the number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns all transactions in date order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns the accounts that have at least one transaction.
    pub fn account_ids(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.by_account.keys().copied()
    }

    /// Returns the transactions of one account in date order.
    pub fn transactions_of(&self, account_id: AccountId) -> impl Iterator<Item = &Transaction> {
        self.by_account
            .get(&account_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&position| &self.transactions[position])
    }

    /// Returns the number of transactions posted to an account.
    #[must_use]
    pub fn transactions_count(&self, account_id: AccountId) -> usize {
        self.by_account.get(&account_id).map_or(0, Vec::len)
    }

    /// Returns true if the account has at least one transaction.
    #[must_use]
    pub fn has_transactions(&self, account_id: AccountId) -> bool {
        self.by_account.contains_key(&account_id)
    }

    /// Returns the signed balance of an account (debits minus credits).
    #[must_use]
    pub fn balance_of(&self, account_id: AccountId) -> Decimal {
        self.transactions_of(account_id)
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Returns the summed balance of several accounts.
    #[must_use]
    pub fn balance_of_many(&self, account_ids: impl IntoIterator<Item = AccountId>) -> Decimal {
        account_ids.into_iter().map(|id| self.balance_of(id)).sum()
    }

    /// Returns the total debits posted to an account.
    #[must_use]
    pub fn debit_of(&self, account_id: AccountId) -> Decimal {
        self.transactions_of(account_id).map(Transaction::debit).sum()
    }

    /// Returns the total credits posted to an account.
    #[must_use]
    pub fn credit_of(&self, account_id: AccountId) -> Decimal {
        self.transactions_of(account_id).map(Transaction::credit).sum()
    }

    /// Returns the signed sum across all accounts.
    #[must_use]
    pub fn total_sum(&self) -> Decimal {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Returns the total of all debit lines.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.transactions.iter().map(Transaction::debit).sum()
    }

    /// Returns the total of all credit lines.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.transactions.iter().map(Transaction::credit).sum()
    }

    /// Returns the account's transactions, each annotated with the balance
    /// after it, starting from `opening_balance`.
    #[must_use]
    pub fn running_balance_series(
        &self,
        account_id: AccountId,
        opening_balance: Decimal,
    ) -> Vec<RunningBalanceEntry<'_>> {
        let mut series: Vec<RunningBalanceEntry<'_>> =
            Vec::with_capacity(self.transactions_count(account_id));

        for tx in self.transactions_of(account_id) {
            let entry = match series.last() {
                Some(previous) => RunningBalanceEntry::next(previous, tx),
                None => RunningBalanceEntry::first(opening_balance, tx),
            };
            series.push(entry);
        }

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tally_shared::types::TransactionId;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn tx(id: i64, account: i64, on: NaiveDate, amount: Decimal, direction: EntryType) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            TenantId::new(1),
            AccountId::new(account),
            on,
            amount,
            direction,
        )
    }

    fn sample() -> Ledger {
        Ledger::from_transactions(vec![
            tx(1, 10, date(3, 5), dec!(40), EntryType::Debit),
            tx(2, 10, date(3, 1), dec!(100), EntryType::Debit),
            tx(3, 20, date(3, 2), dec!(100), EntryType::Credit),
            tx(4, 10, date(3, 3), dec!(15), EntryType::Credit),
            tx(5, 20, date(3, 9), dec!(25), EntryType::Credit),
        ])
    }

    #[test]
    fn test_balance_of_uses_debit_positive_convention() {
        let ledger = sample();
        assert_eq!(ledger.balance_of(AccountId::new(10)), dec!(125));
        assert_eq!(ledger.balance_of(AccountId::new(20)), dec!(-125));
        assert_eq!(ledger.debit_of(AccountId::new(10)), dec!(140));
        assert_eq!(ledger.credit_of(AccountId::new(10)), dec!(15));
    }

    #[test]
    fn test_unknown_account_is_zero() {
        let ledger = sample();
        assert_eq!(ledger.balance_of(AccountId::new(99)), Decimal::ZERO);
        assert_eq!(ledger.transactions_count(AccountId::new(99)), 0);
        assert!(!ledger.has_transactions(AccountId::new(99)));
    }

    #[test]
    fn test_groups_are_date_ascending() {
        let ledger = sample();
        let dates: Vec<_> = ledger
            .transactions_of(AccountId::new(10))
            .map(|tx| tx.date)
            .collect();
        assert_eq!(dates, vec![date(3, 1), date(3, 3), date(3, 5)]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let ledger = Ledger::from_transactions(vec![
            tx(7, 10, date(1, 1), dec!(1), EntryType::Debit),
            tx(8, 10, date(1, 1), dec!(2), EntryType::Debit),
        ]);
        let ids: Vec<_> = ledger
            .transactions_of(AccountId::new(10))
            .map(|tx| tx.id.into_inner())
            .collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_totals() {
        let ledger = sample();
        assert_eq!(ledger.total_sum(), Decimal::ZERO);
        assert_eq!(ledger.total_debit(), dec!(140));
        assert_eq!(ledger.total_credit(), dec!(140));
        assert_eq!(
            ledger.balance_of_many([AccountId::new(10), AccountId::new(20)]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::from_transactions(Vec::new());
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_sum(), Decimal::ZERO);
        assert!(ledger.running_balance_series(AccountId::new(1), dec!(5)).is_empty());
    }

    #[test]
    fn test_running_balance_seeded_by_opening() {
        let ledger = sample();
        let balances: Vec<_> = ledger
            .running_balance_series(AccountId::new(10), dec!(10))
            .iter()
            .map(|entry| entry.running_balance)
            .collect();
        assert_eq!(balances, vec![dec!(110), dec!(95), dec!(135)]);
    }

    #[test]
    fn test_try_for_tenant_rejects_foreign_lines() {
        let mut foreign = tx(9, 10, date(1, 1), dec!(1), EntryType::Debit);
        foreign.tenant_id = TenantId::new(2);

        let result = Ledger::try_for_tenant(TenantId::new(1), vec![foreign]);
        assert_eq!(
            result.unwrap_err(),
            LedgerError::TenantMismatch {
                expected: TenantId::new(1),
                found: TenantId::new(2),
                transaction: TransactionId::new(9),
            }
        );
    }

    #[test]
    fn test_account_ids_are_sorted() {
        let ids: Vec<_> = sample().account_ids().map(AccountId::into_inner).collect();
        assert_eq!(ids, vec![10, 20]);
    }
}
