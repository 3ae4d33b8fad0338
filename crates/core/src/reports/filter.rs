//! Report tree pruning.
//!
//! Every step is a node predicate applied through one shared post-order
//! traversal: a node's children are filtered first, the node's sums are
//! re-derived from the surviving children, and only then is the node's own
//! predicate evaluated. Step order matters: the empty-aggregate prune must
//! follow the account prune it cleans up after.

use rust_decimal::Decimal;
use tally_shared::config::PercentagePolicy;

use super::types::{NodeType, ReportNode};
use crate::ledger::Ledger;

/// A named node predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStep {
    /// Drops account nodes whose total is zero.
    NoneZero,
    /// Drops account nodes without transactions in the range.
    NoneTransactions,
    /// Drops aggregate nodes left without children, unless always shown.
    AggregateNoneChildren,
}

impl FilterStep {
    /// Returns the step name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoneZero => "noneZero",
            Self::NoneTransactions => "noneTransactions",
            Self::AggregateNoneChildren => "aggregateNoneChildren",
        }
    }

    /// Returns true if the node survives this step.
    #[must_use]
    pub fn keeps(self, node: &ReportNode) -> bool {
        match self {
            Self::NoneZero => {
                !node.is_type(NodeType::Account) || node.amounts.total != Decimal::ZERO
            }
            Self::NoneTransactions => {
                !node.is_type(NodeType::Account) || node.transactions_count > 0
            }
            Self::AggregateNoneChildren => {
                !node.is_type(NodeType::Aggregate) || node.always_show || node.has_children()
            }
        }
    }
}

/// Name of the final whole-report suppression step.
pub const SUPPRESS_WHEN_RANGE_EMPTY: &str = "suppressWhenRangeEmpty";

/// Applies `keep` to every node of the forest, children first.
///
/// Aggregates are re-derived from their surviving children before `keep`
/// sees them.
/// Recursion depth follows the depth of the tree.
#[must_use]
pub fn filter_deep(
    nodes: Vec<ReportNode>,
    keep: &impl Fn(&ReportNode) -> bool,
    policy: PercentagePolicy,
) -> Vec<ReportNode> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            if node.has_children() {
                node.children = filter_deep(std::mem::take(&mut node.children), keep, policy);
                node.rederive(policy);
            }
            keep(&node).then_some(node)
        })
        .collect()
}

/// Ordered pruning steps chosen from the query flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFilterPipeline {
    steps: Vec<FilterStep>,
    policy: PercentagePolicy,
}

impl NodeFilterPipeline {
    /// A pipeline without steps. Only the suppression rule applies.
    #[must_use]
    pub fn new(policy: PercentagePolicy) -> Self {
        Self {
            steps: Vec::new(),
            policy,
        }
    }

    /// Composes the steps for the given flags.
    ///
    /// Order: no-transactions prune, empty-aggregate prune, zero prune,
    /// empty-aggregate prune.
    #[must_use]
    pub fn from_flags(none_zero: bool, none_transactions: bool, policy: PercentagePolicy) -> Self {
        let mut pipeline = Self::new(policy);
        if none_transactions {
            pipeline = pipeline
                .then(FilterStep::NoneTransactions)
                .then(FilterStep::AggregateNoneChildren);
        }
        if none_zero {
            pipeline = pipeline
                .then(FilterStep::NoneZero)
                .then(FilterStep::AggregateNoneChildren);
        }
        pipeline
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, step: FilterStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Returns the configured steps.
    #[must_use]
    pub fn steps(&self) -> &[FilterStep] {
        &self.steps
    }

    /// Returns the step names in application order, suppression last.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .map(|step| step.name())
            .chain(std::iter::once(SUPPRESS_WHEN_RANGE_EMPTY))
            .collect()
    }

    /// Prunes the forest.
    ///
    /// Returns no nodes at all when `total_accounts` is empty.
    #[must_use]
    pub fn filter(&self, nodes: Vec<ReportNode>, total_accounts: &Ledger) -> Vec<ReportNode> {
        let nodes = self
            .steps
            .iter()
            .fold(nodes, |nodes, step| {
                filter_deep(nodes, &|node: &ReportNode| step.keeps(node), self.policy)
            });

        if total_accounts.is_empty() {
            return Vec::new();
        }
        nodes
    }
}
