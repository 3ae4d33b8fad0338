//! Account narrowing for reports restricted to selected accounts.

use std::collections::BTreeSet;

use tally_shared::types::AccountId;

use crate::accounts::AccountGraph;

/// The accounts a report may show and the accounts whose postings it loads.
///
/// - `nodes`: selected ids with their descendants and ancestors, so the
///   selected accounts keep their place in the tree
/// - `transactions`: selected ids with their descendants only
///
/// `None` means no narrowing. Unknown ids only ever match themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountScope {
    nodes: Option<BTreeSet<AccountId>>,
    transactions: Option<BTreeSet<AccountId>>,
}

impl AccountScope {
    /// A scope including every account.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Expands the selected ids through the account graph.
    ///
    /// An empty selection is unrestricted.
    #[must_use]
    pub fn resolve(graph: &AccountGraph, selected: &[AccountId]) -> Self {
        if selected.is_empty() {
            return Self::unrestricted();
        }

        let mut transactions = BTreeSet::new();
        let mut nodes = BTreeSet::new();

        for &id in selected {
            let descendants = graph.descendants(id);
            transactions.insert(id);
            transactions.extend(descendants.iter().copied());

            nodes.insert(id);
            nodes.extend(descendants.iter().copied());
            nodes.extend(graph.ancestors(id).iter().copied());
        }

        Self {
            nodes: Some(nodes),
            transactions: Some(transactions),
        }
    }

    /// Returns true if any narrowing applies.
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.nodes.is_some()
    }

    /// Returns true if the account may appear in the tree.
    #[must_use]
    pub fn includes_node(&self, id: AccountId) -> bool {
        self.nodes.as_ref().is_none_or(|ids| ids.contains(&id))
    }

    /// Returns true if the account's postings are loaded.
    #[must_use]
    pub fn includes_transactions(&self, id: AccountId) -> bool {
        self.transactions.as_ref().is_none_or(|ids| ids.contains(&id))
    }

    /// Returns the transaction allow-list, `None` when unrestricted.
    #[must_use]
    pub fn transaction_ids(&self) -> Option<&BTreeSet<AccountId>> {
        self.transactions.as_ref()
    }
}
