//! General ledger statements.
//!
//! One account node per account in scope, each with an opening line, one
//! line per transaction carrying the running balance, and a closing line.

use rust_decimal::Decimal;
use tally_shared::config::PercentagePolicy;
use tally_shared::types::AccountId;

use super::data::ReportData;
use super::types::{EntryDetail, NodeAmounts, NodeId, NodeType, ReportNode};
use crate::accounts::Account;
use crate::ledger::RunningBalanceEntry;

/// Builds general ledger statements from loaded report data.
pub struct GeneralLedgerBuilder<'a> {
    data: &'a ReportData,
    policy: PercentagePolicy,
}

impl<'a> GeneralLedgerBuilder<'a> {
    /// Creates a builder over loaded data.
    #[must_use]
    pub fn new(data: &'a ReportData) -> Self {
        Self {
            data,
            policy: PercentagePolicy::default(),
        }
    }

    /// Sets the zero-comparative policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PercentagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds one statement per account, ordered by account code.
    #[must_use]
    pub fn build(&self) -> Vec<ReportNode> {
        self.data
            .graph
            .accounts()
            .iter()
            .filter(|account| self.data.scope.includes_node(account.id))
            .map(|account| self.account_statement(account))
            .collect()
    }

    fn account_statement(&self, account: &Account) -> ReportNode {
        let amounts = self.amounts_of(account.id);
        let opening_balance = amounts.opening_balance;
        let series = if self.data.scope.includes_transactions(account.id) {
            self.data
                .ledgers
                .main
                .running_balance_series(account.id, opening_balance)
        } else {
            Vec::new()
        };
        let closing_balance = opening_balance + amounts.total;

        let mut children = Vec::with_capacity(series.len() + 2);
        children.push(self.balance_line(
            NodeId::Opening(account.id),
            NodeType::OpeningEntry,
            "Opening balance",
            opening_balance,
            self.data.period.from_date,
        ));
        children.extend(series.iter().map(|entry| self.transaction_line(entry)));
        children.push(self.balance_line(
            NodeId::Closing(account.id),
            NodeType::ClosingEntry,
            "Closing balance",
            closing_balance,
            self.data.period.to_date,
        ));

        let mut node = ReportNode::leaf(
            NodeId::Account(account.id),
            NodeType::Account,
            account.name.as_str(),
            amounts,
            self.policy,
        )
        .with_code(&account.code);
        node.transactions_count = series.len();
        node.children = children;
        node
    }

    /// Accounts shown only as ancestors of the selection carry no amounts.
    fn amounts_of(&self, id: AccountId) -> NodeAmounts {
        if !self.data.scope.includes_transactions(id) {
            return NodeAmounts::default();
        }

        let ledgers = &self.data.ledgers;
        NodeAmounts {
            total: ledgers.main.balance_of(id),
            opening_balance: ledgers.opening.balance_of(id),
            previous_year: ledgers.comparative.balance_of(id),
        }
    }

    fn balance_line(
        &self,
        id: NodeId,
        node_type: NodeType,
        name: &str,
        balance: Decimal,
        date: chrono::NaiveDate,
    ) -> ReportNode {
        let mut node = ReportNode::leaf(
            id,
            node_type,
            name,
            NodeAmounts {
                total: balance,
                ..NodeAmounts::default()
            },
            self.policy,
        );
        node.entry = Some(EntryDetail {
            date,
            running_balance: balance,
            debit: balance.max(Decimal::ZERO),
            credit: (-balance).max(Decimal::ZERO),
            contact_id: None,
            contact_name: None,
            reference_type: None,
            reference_id: None,
            transaction_number: None,
            note: None,
        });
        node
    }

    fn transaction_line(&self, entry: &RunningBalanceEntry<'_>) -> ReportNode {
        let tx = entry.transaction;
        let name = tx
            .transaction_number
            .clone()
            .or_else(|| tx.reference_type.clone())
            .unwrap_or_else(|| format!("Transaction {}", tx.id));

        let mut node = ReportNode::leaf(
            NodeId::Transaction(tx.id),
            NodeType::Transaction,
            name,
            NodeAmounts {
                total: tx.signed_amount(),
                opening_balance: entry.previous_balance,
                previous_year: Decimal::ZERO,
            },
            self.policy,
        );
        node.transactions_count = 1;
        node.entry = Some(EntryDetail {
            date: tx.date,
            running_balance: entry.running_balance,
            debit: tx.debit(),
            credit: tx.credit(),
            contact_id: tx.contact_id,
            contact_name: tx
                .contact_id
                .and_then(|id| self.data.contact_name(id))
                .map(str::to_string),
            reference_type: tx.reference_type.clone(),
            reference_id: tx.reference_id,
            transaction_number: tx.transaction_number.clone(),
            note: tx.note.clone(),
        });
        node
    }
}
