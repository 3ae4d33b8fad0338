//! Transaction query filter.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tally_shared::types::{AccountId, BranchId};

use crate::ledger::Transaction;

/// Criteria for loading transactions. Both date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Earliest date, if bounded.
    pub from_date: Option<NaiveDate>,
    /// Latest date, if bounded.
    pub to_date: Option<NaiveDate>,
    /// Branch allow-list. Empty means every branch.
    pub branch_ids: Vec<BranchId>,
    /// Account allow-list. `None` means every account.
    pub account_ids: Option<BTreeSet<AccountId>>,
}

impl TransactionFilter {
    /// Transactions dated within `[from_date, to_date]`.
    #[must_use]
    pub fn between(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date: Some(from_date),
            to_date: Some(to_date),
            ..Self::default()
        }
    }

    /// Transactions dated on or before `cutoff`.
    #[must_use]
    pub fn up_to(cutoff: NaiveDate) -> Self {
        Self {
            to_date: Some(cutoff),
            ..Self::default()
        }
    }

    /// Restricts to the given branches.
    #[must_use]
    pub fn with_branches(mut self, branch_ids: &[BranchId]) -> Self {
        self.branch_ids = branch_ids.to_vec();
        self
    }

    /// Restricts to the given accounts.
    #[must_use]
    pub fn with_accounts(mut self, account_ids: Option<BTreeSet<AccountId>>) -> Self {
        self.account_ids = account_ids;
        self
    }

    /// Returns true if the transaction satisfies every criterion.
    ///
    /// A transaction without a branch never matches a branch allow-list.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self.from_date.is_some_and(|from| transaction.date < from) {
            return false;
        }
        if self.to_date.is_some_and(|to| transaction.date > to) {
            return false;
        }
        if !self.branch_ids.is_empty()
            && !transaction
                .branch_id
                .is_some_and(|branch| self.branch_ids.contains(&branch))
        {
            return false;
        }
        self.account_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&transaction.account_id))
    }
}
