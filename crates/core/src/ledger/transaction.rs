//! Ledger transaction domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, BranchId, ContactId, TenantId, TransactionId};

/// Side of a ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/income).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/income).
    Credit,
}

/// A single posted ledger line against one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Line identifier.
    pub id: TransactionId,
    /// Tenant owning the line.
    pub tenant_id: TenantId,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Posting date.
    pub date: NaiveDate,
    /// Unsigned amount; the side is carried by `direction`.
    pub amount: Decimal,
    /// Whether this is a debit or credit.
    pub direction: EntryType,
    /// Branch the line was posted from.
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    /// Customer or vendor the line relates to.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    /// Source document type (e.g., "SaleInvoice").
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Source document id.
    #[serde(default)]
    pub reference_id: Option<i64>,
    /// Human readable document number.
    #[serde(default)]
    pub transaction_number: Option<String>,
    /// Optional description for this line.
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// Creates a line with no branch, contact, or reference.
    #[must_use]
    pub fn new(
        id: TransactionId,
        tenant_id: TenantId,
        account_id: AccountId,
        date: NaiveDate,
        amount: Decimal,
        direction: EntryType,
    ) -> Self {
        Self {
            id,
            tenant_id,
            account_id,
            date,
            amount,
            direction,
            branch_id: None,
            contact_id: None,
            reference_type: None,
            reference_id: None,
            transaction_number: None,
            note: None,
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }

    /// Returns the debit side amount (zero for credits).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        match self.direction {
            EntryType::Debit => self.amount,
            EntryType::Credit => Decimal::ZERO,
        }
    }

    /// Returns the credit side amount (zero for debits).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        match self.direction {
            EntryType::Debit => Decimal::ZERO,
            EntryType::Credit => self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(direction: EntryType, amount: Decimal) -> Transaction {
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
    fn test_signed_amount() {
        assert_eq!(line(EntryType::Debit, dec!(25.50)).signed_amount(), dec!(25.50));
        assert_eq!(line(EntryType::Credit, dec!(25.50)).signed_amount(), dec!(-25.50));
    }

    #[test]
    fn test_debit_credit_sides() {
        let debit = line(EntryType::Debit, dec!(10));
        assert_eq!((debit.debit(), debit.credit()), (dec!(10), Decimal::ZERO));
        let credit = line(EntryType::Credit, dec!(10));
        assert_eq!((credit.debit(), credit.credit()), (Decimal::ZERO, dec!(10)));
    }

    #[test]
    fn test_json_defaults_optional_fields() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id": 1, "tenantId": 3, "accountId": 2, "date": "2024-03-10",
                "amount": "100.00", "direction": "debit"}"#,
        )
        .unwrap();
        assert_eq!(tx.amount, dec!(100.00));
        assert!(tx.branch_id.is_none());
        assert!(tx.reference_type.is_none());
    }
}
