//! Account hierarchy graph.
//!
//! The chart of accounts is a forest: every account has at most one parent
//! and roots have none. The graph is built once per report and never mutated
//! afterwards. Transitive ancestor and descendant sets are computed on first
//! use and memoized per account, so repeated lookups are cheap and free of
//! side effects.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::OnceCell;
use tally_shared::types::AccountId;

use super::account::Account;
use super::error::AccountGraphError;

static EMPTY: BTreeSet<AccountId> = BTreeSet::new();

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Read-only view over the parent/child relation of a set of accounts.
#[derive(Debug)]
pub struct AccountGraph {
    /// Accounts ordered by code, then name.
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    descendants: Vec<OnceCell<BTreeSet<AccountId>>>,
    ancestors: Vec<OnceCell<BTreeSet<AccountId>>>,
}

impl AccountGraph {
    /// Builds the graph from a tenant's accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if an account id is duplicated, a parent is unknown,
    /// or a parent chain revisits an account.
    pub fn build(mut accounts: Vec<Account>) -> Result<Self, AccountGraphError> {
        accounts.sort_by(|a, b| {
            a.code
                .cmp(&b.code)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            if index.insert(account.id, position).is_some() {
                return Err(AccountGraphError::DuplicateAccount(account.id));
            }
        }

        let mut parents = Vec::with_capacity(accounts.len());
        let mut children = vec![Vec::new(); accounts.len()];
        for (position, account) in accounts.iter().enumerate() {
            let parent = match account.parent_id {
                Some(parent_id) => {
                    let parent = *index.get(&parent_id).ok_or(
                        AccountGraphError::UnknownParent {
                            account: account.id,
                            parent: parent_id,
                        },
                    )?;
                    children[parent].push(position);
                    Some(parent)
                }
                None => None,
            };
            parents.push(parent);
        }

        detect_cycles(&accounts, &parents)?;

        let descendants = (0..accounts.len()).map(|_| OnceCell::new()).collect();
        let ancestors = (0..accounts.len()).map(|_| OnceCell::new()).collect();

        Ok(Self {
            accounts,
            index,
            parents,
            children,
            descendants,
            ancestors,
        })
    }

    /// Returns the number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the graph holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Returns all accounts ordered by code, then name.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Looks up an account.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.index.get(&id).map(|&i| &self.accounts[i])
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, id: AccountId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the accounts without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .zip(&self.parents)
            .filter(|(_, parent)| parent.is_none())
            .map(|(account, _)| account)
    }

    /// Returns the direct children of an account. Unknown ids have none.
    pub fn children(&self, id: AccountId) -> impl Iterator<Item = &Account> {
        self.index
            .get(&id)
            .map(|&i| self.children[i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&child| &self.accounts[child])
    }

    /// Returns the direct parent of an account.
    #[must_use]
    pub fn parent(&self, id: AccountId) -> Option<&Account> {
        let i = *self.index.get(&id)?;
        self.parents[i].map(|parent| &self.accounts[parent])
    }

    /// Returns true if the account has no children (or is unknown).
    #[must_use]
    pub fn is_leaf(&self, id: AccountId) -> bool {
        self.index
            .get(&id)
            .is_none_or(|&i| self.children[i].is_empty())
    }

    /// Returns the number of ancestors of an account (0 for roots).
    #[must_use]
    pub fn depth(&self, id: AccountId) -> usize {
        self.ancestors(id).len()
    }

    /// Returns every account reachable by following child edges.
    ///
    /// Never contains `id` itself. Unknown ids have no descendants.
    #[must_use]
    pub fn descendants(&self, id: AccountId) -> &BTreeSet<AccountId> {
        match self.index.get(&id) {
            Some(&i) => self.descendants_at(i),
            None => &EMPTY,
        }
    }

    /// Returns every account on the parent chain.
    ///
    /// Never contains `id` itself. Unknown ids have no ancestors.
    #[must_use]
    pub fn ancestors(&self, id: AccountId) -> &BTreeSet<AccountId> {
        match self.index.get(&id) {
            Some(&i) => self.ancestors_at(i),
            None => &EMPTY,
        }
    }

    // Iterative: stack usage does not grow with hierarchy depth.
    fn descendants_at(&self, i: usize) -> &BTreeSet<AccountId> {
        self.descendants[i].get_or_init(|| {
            let mut set = BTreeSet::new();
            let mut pending: Vec<usize> = self.children[i].clone();
            while let Some(next) = pending.pop() {
                set.insert(self.accounts[next].id);
                pending.extend_from_slice(&self.children[next]);
            }
            set
        })
    }

    fn ancestors_at(&self, i: usize) -> &BTreeSet<AccountId> {
        self.ancestors[i].get_or_init(|| {
            let mut set = BTreeSet::new();
            let mut current = self.parents[i];
            while let Some(parent) = current {
                set.insert(self.accounts[parent].id);
                current = self.parents[parent];
            }
            set
        })
    }
}

/// Walks every parent chain once; an account seen twice on the chain being
/// walked closes a cycle.
fn detect_cycles(accounts: &[Account], parents: &[Option<usize>]) -> Result<(), AccountGraphError> {
    let mut state = vec![Visit::New; accounts.len()];

    for start in 0..accounts.len() {
        let mut path = Vec::new();
        let mut cursor = Some(start);

        while let Some(i) = cursor {
            match state[i] {
                Visit::Done => break,
                Visit::Active => {
                    return Err(AccountGraphError::CycleDetected {
                        account: accounts[i].id,
                    });
                }
                Visit::New => {
                    state[i] = Visit::Active;
                    path.push(i);
                    cursor = parents[i];
                }
            }
        }

        for i in path {
            state[i] = Visit::Done;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountType;

    fn account(id: i64, parent: Option<i64>, code: &str) -> Account {
        let account = Account::new(
            AccountId::new(id),
            &format!("Account {id}"),
            code,
            AccountType::Expense,
        );
        match parent {
            Some(parent) => account.with_parent(AccountId::new(parent)),
            None => account,
        }
    }

    fn ids(raw: &[i64]) -> BTreeSet<AccountId> {
        raw.iter().copied().map(AccountId::new).collect()
    }

    /// 1 -> {2, 3}, 3 -> {4}, 5 standalone.
    fn sample_graph() -> AccountGraph {
        AccountGraph::build(vec![
            account(4, Some(3), "1310"),
            account(1, None, "1000"),
            account(2, Some(1), "1100"),
            account(3, Some(1), "1300"),
            account(5, None, "5000"),
        ])
        .unwrap()
    }

    #[test]
    fn test_descendants_are_transitive() {
        let graph = sample_graph();
        assert_eq!(graph.descendants(AccountId::new(1)), &ids(&[2, 3, 4]));
        assert_eq!(graph.descendants(AccountId::new(3)), &ids(&[4]));
        assert!(graph.descendants(AccountId::new(4)).is_empty());
    }

    #[test]
    fn test_ancestors_are_transitive() {
        let graph = sample_graph();
        assert_eq!(graph.ancestors(AccountId::new(4)), &ids(&[1, 3]));
        assert!(graph.ancestors(AccountId::new(1)).is_empty());
        assert_eq!(graph.depth(AccountId::new(4)), 2);
    }

    #[test]
    fn test_unknown_id_has_no_relatives() {
        let graph = sample_graph();
        assert!(graph.descendants(AccountId::new(99)).is_empty());
        assert!(graph.ancestors(AccountId::new(99)).is_empty());
        assert_eq!(graph.children(AccountId::new(99)).count(), 0);
        assert!(graph.is_leaf(AccountId::new(99)));
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let graph = sample_graph();
        let first = graph.descendants(AccountId::new(1)).clone();
        let second = graph.descendants(AccountId::new(1)).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_roots_and_children_ordered_by_code() {
        let graph = sample_graph();
        let roots: Vec<_> = graph.roots().map(|a| a.id.into_inner()).collect();
        assert_eq!(roots, vec![1, 5]);
        let children: Vec<_> = graph
            .children(AccountId::new(1))
            .map(|a| a.id.into_inner())
            .collect();
        assert_eq!(children, vec![2, 3]);
        assert_eq!(graph.parent(AccountId::new(4)).map(|a| a.id), Some(AccountId::new(3)));
    }

    #[test]
    fn test_deep_chain() {
        let accounts: Vec<_> = (0..20_000)
            .map(|i| account(i, (i > 0).then_some(i - 1), &format!("{i:05}")))
            .collect();
        let graph = AccountGraph::build(accounts).unwrap();

        assert_eq!(graph.descendants(AccountId::new(0)).len(), 19_999);
        assert_eq!(graph.depth(AccountId::new(19_999)), 19_999);
        assert_eq!(graph.ancestors(AccountId::new(10_000)).len(), 10_000);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let result = AccountGraph::build(vec![
            account(1, Some(3), "1"),
            account(2, Some(1), "2"),
            account(3, Some(2), "3"),
        ]);
        assert!(matches!(result, Err(AccountGraphError::CycleDetected { .. })));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let result = AccountGraph::build(vec![account(1, Some(1), "1")]);
        assert_eq!(
            result.unwrap_err(),
            AccountGraphError::CycleDetected {
                account: AccountId::new(1)
            }
        );
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let result = AccountGraph::build(vec![account(2, Some(7), "2")]);
        assert_eq!(
            result.unwrap_err(),
            AccountGraphError::UnknownParent {
                account: AccountId::new(2),
                parent: AccountId::new(7),
            }
        );
    }

    #[test]
    fn test_duplicate_account_is_rejected() {
        let result = AccountGraph::build(vec![account(1, None, "1"), account(1, None, "2")]);
        assert_eq!(
            result.unwrap_err(),
            AccountGraphError::DuplicateAccount(AccountId::new(1))
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = AccountGraph::build(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.roots().count(), 0);
    }
}
