//! Core report computation for Tally.
//!
//! This crate contains the financial statement engine with ZERO web or
//! database dependencies. It works on accounts and transactions already
//! loaded by a data source and never performs I/O itself.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and the account hierarchy graph
//! - `ledger` - Period ledgers, running balances and journal validation
//! - `period` - Reporting ranges and prior-year comparatives
//! - `reports` - Report trees, filtering and the report service
//! - `source` - Data-access boundary and the in-memory snapshot source

pub mod accounts;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod source;
