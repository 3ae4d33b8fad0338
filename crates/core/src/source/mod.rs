//! Data-access boundary for report computation.
//!
//! The engine never performs I/O itself. It asks a [`ReportDataSource`] for
//! the tenant's accounts, contacts and transactions and works on the loaded
//! snapshot.

pub mod contact;
pub mod error;
pub mod filter;
pub mod memory;

pub use contact::Contact;
pub use error::DataSourceError;
pub use filter::TransactionFilter;
pub use memory::{InMemoryDataSource, Snapshot};

use async_trait::async_trait;
use tally_shared::types::TenantId;

use crate::accounts::Account;
use crate::ledger::Transaction;

/// Loads report inputs for one tenant.
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    /// Returns every account of the tenant.
    async fn accounts(&self, tenant_id: TenantId) -> Result<Vec<Account>, DataSourceError>;

    /// Returns every contact of the tenant.
    async fn contacts(&self, tenant_id: TenantId) -> Result<Vec<Contact>, DataSourceError>;

    /// Returns the tenant's transactions matching `filter`.
    async fn transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, DataSourceError>;
}
