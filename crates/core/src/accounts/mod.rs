//! Chart of accounts.
//!
//! This module provides:
//! - Account domain types
//! - The account hierarchy graph with memoized ancestor/descendant sets
//! - Error types for malformed hierarchies

pub mod account;
pub mod error;
pub mod graph;


pub use account::{Account, AccountType};
pub use error::AccountGraphError;
pub use graph::AccountGraph;
