//! Account domain types.

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// Account type as stored in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Cash on hand.
    Cash,
    /// Bank accounts.
    Bank,
    /// Amounts owed by customers.
    AccountsReceivable,
    /// Stock held for sale.
    Inventory,
    /// Other short term assets.
    OtherCurrentAsset,
    /// Property, plant and equipment.
    FixedAsset,
    /// Other long term assets.
    NonCurrentAsset,
    /// Amounts owed to vendors.
    AccountsPayable,
    /// Credit card balances.
    CreditCard,
    /// Taxes collected and not yet remitted.
    TaxPayable,
    /// Other short term liabilities.
    OtherCurrentLiability,
    /// Long term debt.
    LongTermLiability,
    /// Other long term liabilities.
    NonCurrentLiability,
    /// Equity.
    Equity,
    /// Operating income.
    Income,
    /// Non-operating income.
    OtherIncome,
    /// Direct cost of goods and services sold.
    CostOfGoodsSold,
    /// Operating expenses.
    Expense,
    /// Non-operating expenses.
    OtherExpense,
}

/// A chart of accounts entry. Immutable for the duration of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Parent account, `None` for roots.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
    /// Display name.
    pub name: String,
    /// Account code (e.g., "1000").
    #[serde(default)]
    pub code: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl Account {
    /// Creates a root account.
    #[must_use]
    pub fn new(id: AccountId, name: &str, code: &str, account_type: AccountType) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.to_string(),
            code: code.to_string(),
            account_type,
        }
    }

    /// Places the account under the given parent.
    #[must_use]
    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
