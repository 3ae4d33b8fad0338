//! Financial report generation.
//!
//! This module turns loaded ledgers into pruned, comparative report trees:
//! - Report node types and metadata
//! - Schemas (chart of accounts tree, profit and loss sections)
//! - Tree construction from the account graph and period ledgers
//! - General ledger statements with running balances
//! - Recursive node filtering
//! - Data loading and the report service

pub mod builder;
pub mod data;
pub mod error;
pub mod filter;
pub mod general_ledger;
pub mod query;
pub mod repository;
pub mod schema;
pub mod scope;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::ReportTreeBuilder;
pub use data::{LedgerSet, ReportData};
pub use error::ReportError;
pub use filter::{FilterStep, NodeFilterPipeline, filter_deep};
pub use general_ledger::GeneralLedgerBuilder;
pub use query::ReportQuery;
pub use repository::ReportRepository;
pub use schema::{ReportSchema, SchemaNode, SchemaNodeKind};
pub use scope::AccountScope;
pub use service::ReportService;
pub use types::*;
