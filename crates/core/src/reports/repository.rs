//! Loading of report inputs.
//!
//! The repository only sequences fetches: it asks the data source for the
//! tenant's accounts and contacts, builds the account graph, derives the
//! account scope, and wraps every transaction set in a [`Ledger`].

use std::collections::HashMap;

use tally_shared::types::{BranchId, TenantId};
use tracing::{debug, info};

use super::data::{LedgerSet, ReportData};
use super::error::ReportError;
use super::query::ReportQuery;
use super::scope::AccountScope;
use crate::accounts::AccountGraph;
use crate::ledger::Ledger;
use crate::period::DatePeriod;
use crate::source::{ReportDataSource, TransactionFilter};

/// Loads everything one report invocation needs.
pub struct ReportRepository<S> {
    source: S,
}

impl<S: ReportDataSource> ReportRepository<S> {
    /// Creates a repository over a data source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying data source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the graph, contacts, scope and period ledgers for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid, a fetch fails, the account
    /// hierarchy is malformed, or a fetched transaction belongs to another
    /// tenant.
    pub async fn load(&self, query: &ReportQuery) -> Result<ReportData, ReportError> {
        let tenant_id = query.tenant_id;
        let period = query.period()?;
        let previous_year = period.previous_year();

        let (accounts, contacts) = futures::try_join!(
            self.source.accounts(tenant_id),
            self.source.contacts(tenant_id),
        )?;
        debug!(
            tenant_id = %tenant_id,
            accounts = accounts.len(),
            contacts = contacts.len(),
            "Loaded accounts and contacts"
        );

        let graph = AccountGraph::build(accounts)?;
        let contacts = contacts
            .into_iter()
            .map(|contact| (contact.id, contact))
            .collect::<HashMap<_, _>>();

        let opening = self
            .opening_ledger(tenant_id, &period, &query.branches_ids)
            .await?;

        let scope = AccountScope::resolve(&graph, &query.accounts_ids);
        let narrowed_to = scope.transaction_ids().cloned();

        let main_filter = TransactionFilter::between(period.from_date, period.to_date)
            .with_branches(&query.branches_ids)
            .with_accounts(narrowed_to.clone());
        let comparative_filter =
            TransactionFilter::between(previous_year.from_date, previous_year.to_date)
                .with_branches(&query.branches_ids)
                .with_accounts(narrowed_to);
        let total_filter = scope.is_restricted().then(|| {
            TransactionFilter::between(period.from_date, period.to_date)
                .with_branches(&query.branches_ids)
        });

        let (main, comparative, total_accounts) = futures::try_join!(
            self.ledger(tenant_id, &main_filter),
            self.ledger(tenant_id, &comparative_filter),
            async {
                match &total_filter {
                    Some(filter) => self.ledger(tenant_id, filter).await.map(Some),
                    None => Ok(None),
                }
            },
        )?;

        info!(
            tenant_id = %tenant_id,
            from_date = %period.from_date,
            to_date = %period.to_date,
            narrowed = scope.is_restricted(),
            transactions = main.len(),
            opening_transactions = opening.len(),
            comparative_transactions = comparative.len(),
            "Report data loaded"
        );

        Ok(ReportData {
            period,
            previous_year,
            graph,
            contacts,
            scope,
            ledgers: LedgerSet {
                main,
                opening,
                comparative,
                total_accounts,
            },
        })
    }

    /// Transactions dated before the period, filtered by branch only.
    async fn opening_ledger(
        &self,
        tenant_id: TenantId,
        period: &DatePeriod,
        branches_ids: &[BranchId],
    ) -> Result<Ledger, ReportError> {
        match period.opening_balance_cutoff() {
            Some(cutoff) => {
                let filter = TransactionFilter::up_to(cutoff).with_branches(branches_ids);
                self.ledger(tenant_id, &filter).await
            }
            None => Ok(Ledger::new()),
        }
    }

    async fn ledger(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Ledger, ReportError> {
        let transactions = self.source.transactions(tenant_id, filter).await?;
        Ok(Ledger::try_for_tenant(tenant_id, transactions)?)
    }
}
