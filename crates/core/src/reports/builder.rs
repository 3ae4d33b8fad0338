//! Report tree construction.
//!
//! Joins the account graph with the period ledgers. Leaves take their
//! amounts from the ledgers; aggregates are summed from their children at
//! construction, so every aggregate's total equals the sum of its children's.

use rust_decimal::Decimal;
use tally_shared::config::PercentagePolicy;
use tally_shared::types::AccountId;

use super::data::LedgerSet;
use super::schema::{ReportSchema, SchemaNode, SchemaNodeKind};
use super::scope::AccountScope;
use super::types::{HorizontalTotal, NodeAmounts, NodeId, NodeType, PeriodColumn, ReportNode};
use crate::accounts::{Account, AccountGraph};
use crate::ledger::{Ledger, Transaction};
use crate::period::DatePeriod;

/// Builds account and aggregate nodes from a graph and its ledgers.
pub struct ReportTreeBuilder<'a> {
    graph: &'a AccountGraph,
    ledgers: &'a LedgerSet,
    scope: &'a AccountScope,
    policy: PercentagePolicy,
    columns: &'a [PeriodColumn],
}

impl<'a> ReportTreeBuilder<'a> {
    /// Creates a builder over the given inputs.
    #[must_use]
    pub fn new(graph: &'a AccountGraph, ledgers: &'a LedgerSet, scope: &'a AccountScope) -> Self {
        Self {
            graph,
            ledgers,
            scope,
            policy: PercentagePolicy::default(),
            columns: &[],
        }
    }

    /// Sets the zero-comparative policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PercentagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a per-column breakdown to every node.
    #[must_use]
    pub fn with_columns(mut self, columns: &'a [PeriodColumn]) -> Self {
        self.columns = columns;
        self
    }

    /// Builds the top level nodes of `schema`.
    #[must_use]
    pub fn build(&self, schema: &ReportSchema) -> Vec<ReportNode> {
        match schema {
            ReportSchema::Flexible => self
                .graph
                .roots()
                .filter(|account| self.scope.includes_node(account.id))
                .map(|account| self.account_node(account, &|_: &Account| true))
                .collect(),
            ReportSchema::Sections(sections) => {
                sections.iter().map(|section| self.section_node(section)).collect()
            }
        }
    }

    fn section_node(&self, section: &SchemaNode) -> ReportNode {
        let children = match &section.kind {
            SchemaNodeKind::Accounts { .. } => {
                let admit = |account: &Account| {
                    section.gathers(account.account_type) && self.scope.includes_node(account.id)
                };
                self.graph
                    .accounts()
                    .iter()
                    .filter(|&account| admit(account))
                    // Accounts under a gathered parent are built with that parent.
                    .filter(|account| !self.graph.parent(account.id).is_some_and(&admit))
                    .map(|account| self.account_node(account, &admit))
                    .collect()
            }
            SchemaNodeKind::Aggregate { children } => {
                children.iter().map(|child| self.section_node(child)).collect()
            }
        };

        ReportNode::aggregate(
            NodeId::Section(section.id.clone()),
            section.name.as_str(),
            children,
            self.policy,
        )
        .with_always_show(section.always_show)
    }

    /// Builds an account subtree. An account with admitted children becomes
    /// an aggregate; its own postings, if any, move to a direct-postings leaf.
    ///
    /// Recursion depth follows the depth of the account hierarchy.
    fn account_node(&self, account: &Account, admit: &dyn Fn(&Account) -> bool) -> ReportNode {
        let mut children: Vec<ReportNode> = self
            .graph
            .children(account.id)
            .filter(|child| self.scope.includes_node(child.id) && admit(child))
            .map(|child| self.account_node(child, admit))
            .collect();

        if children.is_empty() {
            return self.account_leaf(account, NodeId::Account(account.id));
        }

        if self.has_own_postings(account.id) {
            children.insert(0, self.account_leaf(account, NodeId::DirectPostings(account.id)));
        }

        ReportNode::aggregate(
            NodeId::Account(account.id),
            account.name.as_str(),
            children,
            self.policy,
        )
        .with_code(&account.code)
    }

    fn account_leaf(&self, account: &Account, id: NodeId) -> ReportNode {
        let mut node = ReportNode::leaf(
            id,
            NodeType::Account,
            account.name.as_str(),
            self.amounts_of(account.id),
            self.policy,
        )
        .with_code(&account.code);

        if self.scope.includes_transactions(account.id) {
            node.transactions_count = self.ledgers.main.transactions_count(account.id);
        }
        node.horizontal_totals = self.horizontal_totals_of(account.id);
        node
    }

    fn amounts_of(&self, id: AccountId) -> NodeAmounts {
        if !self.scope.includes_transactions(id) {
            return NodeAmounts::default();
        }

        NodeAmounts {
            total: self.ledgers.main.balance_of(id),
            opening_balance: self.ledgers.opening.balance_of(id),
            previous_year: self.ledgers.comparative.balance_of(id),
        }
    }

    fn has_own_postings(&self, id: AccountId) -> bool {
        self.scope.includes_transactions(id)
            && (self.ledgers.main.has_transactions(id)
                || self.ledgers.opening.has_transactions(id)
                || self.ledgers.comparative.has_transactions(id))
    }

    fn horizontal_totals_of(&self, id: AccountId) -> Vec<HorizontalTotal> {
        let included = self.scope.includes_transactions(id);

        self.columns
            .iter()
            .map(|column| HorizontalTotal {
                period: column.period,
                total: if included {
                    balance_within(&self.ledgers.main, id, &column.period)
                } else {
                    Decimal::ZERO
                },
                previous_year: if included {
                    balance_within(&self.ledgers.comparative, id, &column.previous_year)
                } else {
                    Decimal::ZERO
                },
            })
            .collect()
    }
}

fn balance_within(ledger: &Ledger, id: AccountId, period: &DatePeriod) -> Decimal {
    ledger
        .transactions_of(id)
        .filter(|tx| period.contains(tx.date))
        .map(Transaction::signed_amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountType;
    use crate::ledger::EntryType;
    use chrono::{Datelike, NaiveDate};
    use rust_decimal_macros::dec;
    use tally_shared::types::{TenantId, TransactionId};

    fn id(raw: i64) -> AccountId {
        AccountId::new(raw)
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn debit(account: i64, on: NaiveDate, amount: Decimal) -> Transaction {
        Transaction::new(
            TransactionId::new(account * 100 + i64::from(on.day0())),
            TenantId::new(1),
            id(account),
            on,
            amount,
            EntryType::Debit,
        )
    }

    /// Assets(1) -> Cash(2), Bank(3); Expenses(4) -> Rent(5), Utilities(6).
    fn graph() -> AccountGraph {
        AccountGraph::build(vec![
            Account::new(id(1), "Assets", "1000", AccountType::OtherCurrentAsset),
            Account::new(id(2), "Cash", "1010", AccountType::Cash).with_parent(id(1)),
            Account::new(id(3), "Bank", "1020", AccountType::Bank).with_parent(id(1)),
            Account::new(id(4), "Expenses", "5000", AccountType::Expense),
            Account::new(id(5), "Rent", "5010", AccountType::Expense).with_parent(id(4)),
            Account::new(id(6), "Utilities", "5020", AccountType::Expense).with_parent(id(4)),
        ])
        .unwrap()
    }

    fn ledgers() -> LedgerSet {
        LedgerSet {
            main: Ledger::from_transactions(vec![
                debit(2, date(3, 1), dec!(100)),
                debit(3, date(3, 2), dec!(50)),
                debit(5, date(3, 3), dec!(20)),
            ]),
            opening: Ledger::from_transactions(vec![debit(2, date(1, 5), dec!(10))]),
            comparative: Ledger::from_transactions(vec![debit(5, date(3, 3), dec!(10))]),
            total_accounts: None,
        }
    }

    #[test]
    fn test_flexible_tree_totals() {
        let graph = graph();
        let ledgers = ledgers();
        let scope = AccountScope::unrestricted();
        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::flexible());

        assert_eq!(nodes.len(), 2);
        let assets = &nodes[0];
        assert_eq!(assets.node_type, NodeType::Aggregate);
        assert_eq!(assets.amounts.total, dec!(150));
        assert_eq!(assets.amounts.opening_balance, dec!(10));
        assert_eq!(assets.children[0].amounts.total, dec!(100));
        assert_eq!(assets.children[1].amounts.total, dec!(50));

        let expenses = &nodes[1];
        assert_eq!(expenses.amounts.total, dec!(20));
        assert_eq!(expenses.amounts.previous_year, dec!(10));
        assert_eq!(expenses.previous_year_change, dec!(10));
        assert_eq!(expenses.previous_year_percentage_change, Some(dec!(1)));
        assert_eq!(expenses.transactions_count, 1);
        assert_eq!(expenses.children.len(), 2);
    }

    #[test]
    fn test_direct_postings_child_keeps_sum() {
        let graph = graph();
        let mut ledgers = ledgers();
        ledgers.main = Ledger::from_transactions(vec![
            debit(1, date(3, 1), dec!(7)),
            debit(2, date(3, 1), dec!(100)),
        ]);
        let scope = AccountScope::unrestricted();
        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::flexible());

        let assets = &nodes[0];
        assert_eq!(assets.children[0].id, NodeId::DirectPostings(id(1)));
        assert_eq!(assets.children[0].amounts.total, dec!(7));
        assert_eq!(assets.amounts.total, dec!(107));
    }

    #[test]
    fn test_narrowed_scope_excludes_before_aggregation() {
        let graph = graph();
        let ledgers = ledgers();
        let scope = AccountScope::resolve(&graph, &[id(2)]);
        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::flexible());

        assert_eq!(nodes.len(), 1);
        let assets = &nodes[0];
        // Bank is outside the scope, so its 50 never reaches Assets.
        assert_eq!(assets.amounts.total, dec!(100));
        assert_eq!(assets.children.len(), 1);
    }

    #[test]
    fn test_profit_loss_sections() {
        let graph = graph();
        let ledgers = ledgers();
        let scope = AccountScope::unrestricted();
        let nodes =
            ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::profit_loss());

        assert_eq!(nodes.len(), 5);
        let expenses = nodes
            .iter()
            .find(|node| node.id == NodeId::Section("expenses".into()))
            .unwrap();
        assert!(expenses.always_show);
        assert_eq!(expenses.amounts.total, dec!(20));
        // Rent and Utilities are built under Expenses, not as separate roots.
        assert_eq!(expenses.children.len(), 1);
        assert_eq!(expenses.children[0].id, NodeId::Account(id(4)));

        let income = &nodes[0];
        assert!(income.children.is_empty());
        assert_eq!(income.amounts.total, Decimal::ZERO);
    }

    #[test]
    fn test_horizontal_totals_per_column() {
        let graph = graph();
        let ledgers = ledgers();
        let scope = AccountScope::unrestricted();
        let period = DatePeriod::new(date(3, 1), date(3, 31)).unwrap();
        let columns: Vec<PeriodColumn> = period
            .split(crate::period::PeriodUnit::Day)
            .into_iter()
            .take(3)
            .map(PeriodColumn::from)
            .collect();

        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope)
            .with_columns(&columns)
            .build(&ReportSchema::flexible());

        let assets: Vec<_> = nodes[0].horizontal_totals.iter().map(|c| c.total).collect();
        assert_eq!(assets, vec![dec!(100), dec!(50), Decimal::ZERO]);
    }
}
