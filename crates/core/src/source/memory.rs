//! In-memory data source backed by JSON snapshots.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tally_shared::types::TenantId;

use super::contact::Contact;
use super::error::DataSourceError;
use super::filter::TransactionFilter;
use super::ReportDataSource;
use crate::accounts::Account;
use crate::ledger::Transaction;

/// Everything a report needs for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Tenant the snapshot belongs to.
    pub tenant_id: TenantId,
    /// Chart of accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Counter-parties.
    #[serde(default)]
    pub contacts: Vec<Contact>,
    /// Posted ledger lines.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError::Decode`] if the input is not a valid snapshot.
    pub fn from_json(input: &str) -> Result<Self, DataSourceError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// A [`ReportDataSource`] holding one snapshot per tenant.
///
/// Transactions are returned exactly as stored, so a snapshot carrying
/// another tenant's lines is surfaced to the caller rather than hidden.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    snapshots: HashMap<TenantId, Snapshot>,
}

impl InMemoryDataSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the snapshot of its tenant.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshots.insert(snapshot.tenant_id, snapshot);
        self
    }

    fn snapshot(&self, tenant_id: TenantId) -> Result<&Snapshot, DataSourceError> {
        self.snapshots
            .get(&tenant_id)
            .ok_or(DataSourceError::TenantNotFound(tenant_id))
    }
}

impl From<Snapshot> for InMemoryDataSource {
    fn from(snapshot: Snapshot) -> Self {
        Self::new().with_snapshot(snapshot)
    }
}

#[async_trait]
impl ReportDataSource for InMemoryDataSource {
    async fn accounts(&self, tenant_id: TenantId) -> Result<Vec<Account>, DataSourceError> {
        Ok(self.snapshot(tenant_id)?.accounts.clone())
    }

    async fn contacts(&self, tenant_id: TenantId) -> Result<Vec<Contact>, DataSourceError> {
        Ok(self.snapshot(tenant_id)?.contacts.clone())
    }

    async fn transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, DataSourceError> {
        Ok(self
            .snapshot(tenant_id)?
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }
}
