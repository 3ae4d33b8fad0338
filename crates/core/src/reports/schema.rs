//! Report layouts.
//!
//! A schema decides which top level nodes a report has and which accounts
//! each of them gathers. The flexible schema shows the chart of accounts as
//! it is.

use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;

/// What a schema node contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaNodeKind {
    /// Account subtrees whose type is one of `types`.
    Accounts {
        /// Account types gathered by this node.
        types: Vec<AccountType>,
    },
    /// Nested schema nodes.
    Aggregate {
        /// Child schema nodes.
        children: Vec<SchemaNode>,
    },
}

/// One section of a schema-driven report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Section key, unique within the schema.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Keep the section even when pruning leaves it empty.
    #[serde(default)]
    pub always_show: bool,
    /// Section content.
    #[serde(flatten)]
    pub kind: SchemaNodeKind,
}

impl SchemaNode {
    /// A section gathering account subtrees of the given types.
    #[must_use]
    pub fn accounts(id: &str, name: &str, types: &[AccountType]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            always_show: false,
            kind: SchemaNodeKind::Accounts {
                types: types.to_vec(),
            },
        }
    }

    /// A section nesting other sections.
    #[must_use]
    pub fn aggregate(id: &str, name: &str, children: Vec<Self>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            always_show: false,
            kind: SchemaNodeKind::Aggregate { children },
        }
    }

    /// Marks the section as always shown.
    #[must_use]
    pub fn always_show(mut self) -> Self {
        self.always_show = true;
        self
    }

    /// Returns true if `account_type` belongs to this section.
    #[must_use]
    pub fn gathers(&self, account_type: AccountType) -> bool {
        match &self.kind {
            SchemaNodeKind::Accounts { types } => types.contains(&account_type),
            SchemaNodeKind::Aggregate { .. } => false,
        }
    }
}

/// Layout of a report tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "sections", rename_all = "camelCase")]
pub enum ReportSchema {
    /// One tree per root account.
    Flexible,
    /// Fixed sections.
    Sections(Vec<SchemaNode>),
}

impl ReportSchema {
    /// The chart of accounts as a tree.
    #[must_use]
    pub fn flexible() -> Self {
        Self::Flexible
    }

    /// Profit and loss sections.
    #[must_use]
    pub fn profit_loss() -> Self {
        Self::Sections(vec![
            SchemaNode::accounts("income", "Income", &[AccountType::Income]).always_show(),
            SchemaNode::accounts("cost-of-sales", "Cost of sales", &[AccountType::CostOfGoodsSold])
                .always_show(),
            SchemaNode::accounts("expenses", "Expenses", &[AccountType::Expense]).always_show(),
            SchemaNode::accounts("other-income", "Other income", &[AccountType::OtherIncome]),
            SchemaNode::accounts("other-expenses", "Other expenses", &[AccountType::OtherExpense]),
        ])
    }
}
