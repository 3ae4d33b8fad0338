//! Property-based tests for report trees.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::config::PercentagePolicy;
use tally_shared::types::{AccountId, TenantId, TransactionId};

use super::builder::ReportTreeBuilder;
use super::data::LedgerSet;
use super::filter::NodeFilterPipeline;
use super::schema::ReportSchema;
use super::scope::AccountScope;
use super::types::{NodeAmounts, NodeType, ReportNode};
use crate::accounts::{Account, AccountGraph, AccountType};
use crate::ledger::{EntryType, Ledger, Transaction};

/// Parent of account `i` is `None` or some account `j < i`.
fn forest_strategy() -> impl Strategy<Value = Vec<(Option<usize>, bool)>> {
    (1usize..12).prop_flat_map(|len| {
        (0..len)
            .map(|i| {
                let parent = if i == 0 {
                    Just(None).boxed()
                } else {
                    prop::option::of(0..i).boxed()
                };
                (parent, any::<bool>())
            })
            .collect::<Vec<_>>()
    })
}

/// (account index, cents, is debit, ledger: 0 main, 1 opening, 2 comparative)
fn lines_strategy() -> impl Strategy<Value = Vec<(usize, i64, bool, u8)>> {
    prop::collection::vec((0usize..12, 0i64..50_000, any::<bool>(), 0u8..3), 0..40)
}

fn graph(shape: &[(Option<usize>, bool)]) -> AccountGraph {
    let accounts = shape
        .iter()
        .enumerate()
        .map(|(i, &(parent, is_expense))| {
            let account_type = if is_expense {
                AccountType::Expense
            } else {
                AccountType::Income
            };
            let account = Account::new(
                AccountId::new(i as i64),
                &format!("Account {i}"),
                &format!("{i:04}"),
                account_type,
            );
            match parent {
                Some(parent) => account.with_parent(AccountId::new(parent as i64)),
                None => account,
            }
        })
        .collect();
    AccountGraph::build(accounts).unwrap()
}

fn ledgers(accounts: usize, lines: &[(usize, i64, bool, u8)]) -> LedgerSet {
    let mut split: [Vec<Transaction>; 3] = Default::default();
    for (i, &(account, cents, is_debit, target)) in lines.iter().enumerate() {
        split[usize::from(target)].push(Transaction::new(
            TransactionId::new(i as i64),
            TenantId::new(1),
            AccountId::new((account % accounts) as i64),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Decimal::new(cents, 2),
            if is_debit { EntryType::Debit } else { EntryType::Credit },
        ));
    }
    let [main, opening, comparative] = split;
    LedgerSet {
        main: Ledger::from_transactions(main),
        opening: Ledger::from_transactions(opening),
        comparative: Ledger::from_transactions(comparative),
        total_accounts: None,
    }
}

fn assert_sums(node: &ReportNode) -> Result<(), TestCaseError> {
    if node.node_type == NodeType::Aggregate {
        let summed: NodeAmounts = node.children.iter().map(|child| child.amounts).sum();
        prop_assert_eq!(node.amounts, summed);
        prop_assert_eq!(node.previous_year_change, summed.total - summed.previous_year);
    }
    for child in &node.children {
        assert_sums(child)?;
    }
    Ok(())
}

fn sum_totals(nodes: &[ReportNode]) -> Decimal {
    nodes.iter().map(|node| node.amounts.total).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every aggregate equals the sum of its children before filtering.
    #[test]
    fn prop_aggregates_sum_children(
        shape in forest_strategy(),
        lines in lines_strategy(),
        profit_loss in any::<bool>(),
    ) {
        let graph = graph(&shape);
        let ledgers = ledgers(shape.len(), &lines);
        let scope = AccountScope::unrestricted();
        let schema = if profit_loss { ReportSchema::profit_loss() } else { ReportSchema::flexible() };

        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&schema);
        for node in &nodes {
            assert_sums(node)?;
        }
        // Every posting lands in exactly one leaf.
        prop_assert_eq!(sum_totals(&nodes), ledgers.main.total_sum());
    }

    /// Filtering keeps the aggregate invariant and is idempotent.
    #[test]
    fn prop_filter_idempotent(
        shape in forest_strategy(),
        lines in lines_strategy(),
        none_zero in any::<bool>(),
        none_transactions in any::<bool>(),
    ) {
        let graph = graph(&shape);
        let ledgers = ledgers(shape.len(), &lines);
        let scope = AccountScope::unrestricted();
        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::profit_loss());

        let pipeline = NodeFilterPipeline::from_flags(none_zero, none_transactions, PercentagePolicy::Undefined);
        let total = Ledger::from_transactions(vec![Transaction::new(
            TransactionId::new(0),
            TenantId::new(1),
            AccountId::new(0),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Decimal::ONE,
            EntryType::Debit,
        )]);

        let once = pipeline.filter(nodes, &total);
        for node in &once {
            assert_sums(node)?;
        }
        let twice = pipeline.filter(once.clone(), &total);
        prop_assert_eq!(&once, &twice);
    }

    /// Zero pruning never changes any surviving total.
    #[test]
    fn prop_none_zero_preserves_totals(
        shape in forest_strategy(),
        lines in lines_strategy(),
    ) {
        let graph = graph(&shape);
        let ledgers = ledgers(shape.len(), &lines);
        let scope = AccountScope::unrestricted();
        let nodes = ReportTreeBuilder::new(&graph, &ledgers, &scope).build(&ReportSchema::flexible());
        let before = sum_totals(&nodes);

        let pipeline = NodeFilterPipeline::from_flags(true, false, PercentagePolicy::Undefined);
        let after = pipeline.filter(nodes, &Ledger::from_transactions(ledgers.main.transactions().to_vec()));

        if !ledgers.main.is_empty() {
            prop_assert_eq!(sum_totals(&after), before);
        }
    }
}
