//! Report data types.

use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::config::PercentagePolicy;
use tally_shared::types::{AccountId, ContactId, NumberFormat, TenantId, TransactionId};

use crate::period::DatePeriod;

/// Kind of report being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Chart of accounts tree with balances.
    AccountTree,
    /// Profit and loss sheet.
    ProfitLoss,
    /// Per-account statement with opening, transactions and closing lines.
    GeneralLedger,
}

impl ReportKind {
    /// Returns the kebab-case name of the report.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountTree => "account-tree",
            Self::ProfitLoss => "profit-loss",
            Self::GeneralLedger => "general-ledger",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "account-tree" => Ok(Self::AccountTree),
            "profit-loss" => Ok(Self::ProfitLoss),
            "general-ledger" => Ok(Self::GeneralLedger),
            other => Err(format!("unknown report kind: {other}")),
        }
    }
}

/// Role of a node within the report tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// A single account's figures.
    Account,
    /// A sum over child nodes.
    Aggregate,
    /// Opening balance line of a statement.
    OpeningEntry,
    /// Closing balance line of a statement.
    ClosingEntry,
    /// One posted transaction of a statement.
    Transaction,
}

/// Stable identity of a report node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum NodeId {
    /// An account, as a leaf or as the aggregate over its sub-accounts.
    Account(AccountId),
    /// Postings made directly to an account that also has sub-accounts.
    DirectPostings(AccountId),
    /// A schema section.
    Section(String),
    /// A statement transaction line.
    Transaction(TransactionId),
    /// A statement opening line.
    Opening(AccountId),
    /// A statement closing line.
    Closing(AccountId),
}

/// The summable amounts of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAmounts {
    /// Amount for the current period.
    pub total: Decimal,
    /// Balance as of the day before the period starts.
    pub opening_balance: Decimal,
    /// Amount for the comparative period.
    pub previous_year: Decimal,
}

impl NodeAmounts {
    /// Difference between the current and comparative amounts.
    #[must_use]
    pub fn previous_year_change(&self) -> Decimal {
        self.total - self.previous_year
    }

    /// Change relative to the comparative amount.
    ///
    /// When the comparative amount is zero the result follows `policy`.
    #[must_use]
    pub fn previous_year_percentage_change(&self, policy: PercentagePolicy) -> Option<Decimal> {
        match self.previous_year_change().checked_div(self.previous_year) {
            Some(ratio) => Some(ratio),
            None => match policy {
                PercentagePolicy::Undefined => None,
                PercentagePolicy::Zero => Some(Decimal::ZERO),
            },
        }
    }
}

impl Add for NodeAmounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            opening_balance: self.opening_balance + rhs.opening_balance,
            previous_year: self.previous_year + rhs.previous_year,
        }
    }
}

impl AddAssign for NodeAmounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for NodeAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Current and comparative amounts of one column of a period breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalTotal {
    /// Column range.
    pub period: DatePeriod,
    /// Amount within the column range.
    pub total: Decimal,
    /// Amount within the column's comparative range.
    pub previous_year: Decimal,
}

/// Line detail of a statement entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetail {
    /// Entry date.
    pub date: NaiveDate,
    /// Balance after the entry.
    pub running_balance: Decimal,
    /// Debit side amount.
    pub debit: Decimal,
    /// Credit side amount.
    pub credit: Decimal,
    /// Counter-party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    /// Counter-party display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    /// Source document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    /// Source document id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<i64>,
    /// Source document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_number: Option<String>,
    /// Line note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One node of a report tree.
///
/// `previous_year_change` and `previous_year_percentage_change` are always
/// derived from `amounts`. For aggregates, `amounts`, `transactions_count`
/// and `horizontal_totals` are sums over `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNode {
    /// Node identity.
    pub id: NodeId,
    /// Node role.
    pub node_type: NodeType,
    /// Display name.
    pub name: String,
    /// Account code, for account nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Summable amounts.
    #[serde(flatten)]
    pub amounts: NodeAmounts,
    /// `total - previous_year`.
    pub previous_year_change: Decimal,
    /// `previous_year_change / previous_year`.
    pub previous_year_percentage_change: Option<Decimal>,
    /// Number of current period transactions.
    pub transactions_count: usize,
    /// Kept even without children.
    pub always_show: bool,
    /// Column breakdown, empty unless requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub horizontal_totals: Vec<HorizontalTotal>,
    /// Statement line detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryDetail>,
    /// Child nodes, empty for leaves.
    #[serde(default)]
    pub children: Vec<ReportNode>,
}

impl ReportNode {
    /// Creates a leaf node with derived fields computed.
    #[must_use]
    pub fn leaf(
        id: NodeId,
        node_type: NodeType,
        name: impl Into<String>,
        amounts: NodeAmounts,
        policy: PercentagePolicy,
    ) -> Self {
        let mut node = Self {
            id,
            node_type,
            name: name.into(),
            code: None,
            amounts,
            previous_year_change: Decimal::ZERO,
            previous_year_percentage_change: None,
            transactions_count: 0,
            always_show: false,
            horizontal_totals: Vec::new(),
            entry: None,
            children: Vec::new(),
        };
        node.derive(policy);
        node
    }

    /// Creates an aggregate node over `children`.
    #[must_use]
    pub fn aggregate(
        id: NodeId,
        name: impl Into<String>,
        children: Vec<Self>,
        policy: PercentagePolicy,
    ) -> Self {
        let mut node = Self::leaf(id, NodeType::Aggregate, name, NodeAmounts::default(), policy);
        node.children = children;
        node.rederive(policy);
        node
    }

    /// Sets the account code.
    #[must_use]
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    /// Marks the node as always shown.
    #[must_use]
    pub fn with_always_show(mut self, always_show: bool) -> Self {
        self.always_show = always_show;
        self
    }

    /// Returns true for the given node type.
    #[must_use]
    pub fn is_type(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    /// Returns true if at least one child remains.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Recomputes the derived comparison fields from `amounts`.
    pub fn derive(&mut self, policy: PercentagePolicy) {
        self.previous_year_change = self.amounts.previous_year_change();
        self.previous_year_percentage_change =
            self.amounts.previous_year_percentage_change(policy);
    }

    /// Recomputes an aggregate's sums from its current children, then its
    /// derived fields. Other node types are left untouched.
    pub fn rederive(&mut self, policy: PercentagePolicy) {
        if self.node_type != NodeType::Aggregate {
            return;
        }

        self.amounts = self.children.iter().map(|child| child.amounts).sum();
        self.transactions_count = self
            .children
            .iter()
            .map(|child| child.transactions_count)
            .sum();
        self.horizontal_totals = sum_horizontal(&self.children);
        self.derive(policy);
    }

    /// Visits this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Elementwise sum of the children's column breakdowns.
fn sum_horizontal(children: &[ReportNode]) -> Vec<HorizontalTotal> {
    let mut columns: Vec<HorizontalTotal> = Vec::new();

    for child in children {
        for (index, column) in child.horizontal_totals.iter().enumerate() {
            match columns.get_mut(index) {
                Some(sum) => {
                    sum.total += column.total;
                    sum.previous_year += column.previous_year;
                }
                None => columns.push(*column),
            }
        }
    }

    columns
}

/// One column of a period breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodColumn {
    /// Column range.
    pub period: DatePeriod,
    /// The column range shifted back one year.
    pub previous_year: DatePeriod,
}

impl From<DatePeriod> for PeriodColumn {
    fn from(period: DatePeriod) -> Self {
        Self {
            period,
            previous_year: period.previous_year(),
        }
    }
}

/// Resolved parameters a renderer needs alongside the nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    /// Report kind.
    pub kind: ReportKind,
    /// Tenant the report was computed for.
    pub tenant_id: TenantId,
    /// Reporting range.
    pub period: DatePeriod,
    /// Comparative range.
    pub previous_year: DatePeriod,
    /// Formatting hints.
    pub number_format: NumberFormat,
    /// Policy used for zero comparatives.
    pub percentage_policy: PercentagePolicy,
    /// Column breakdown, empty unless requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<PeriodColumn>,
}

/// A computed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Resolved parameters.
    pub meta: ReportMeta,
    /// Top level nodes.
    pub nodes: Vec<ReportNode>,
}

impl Report {
    /// Returns true if the report has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the first node with the given id, searching depth first.
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&ReportNode> {
        let mut found = None;
        for node in &self.nodes {
            node.walk(&mut |candidate| {
                if found.is_none() && &candidate.id == id {
                    found = Some(candidate);
                }
            });
        }
        found
    }
}
