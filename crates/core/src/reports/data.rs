//! Loaded inputs of one report computation.

use std::collections::HashMap;

use tally_shared::types::ContactId;

use super::scope::AccountScope;
use crate::accounts::AccountGraph;
use crate::ledger::Ledger;
use crate::period::DatePeriod;
use crate::source::Contact;

/// The ledgers a report is computed from.
#[derive(Debug, Clone, Default)]
pub struct LedgerSet {
    /// Transactions inside the reporting range, narrowed to the scope.
    pub main: Ledger,
    /// Transactions before the reporting range, filtered by branch only.
    /// Accounts outside the transaction scope are zeroed by the builders.
    pub opening: Ledger,
    /// Transactions inside the comparative range, narrowed to the scope.
    pub comparative: Ledger,
    /// Transactions inside the reporting range, not narrowed.
    /// `None` when no narrowing applies and `main` is the same ledger.
    pub total_accounts: Option<Ledger>,
}

impl LedgerSet {
    /// Returns the ledger deciding whether the report is empty.
    #[must_use]
    pub fn total_accounts(&self) -> &Ledger {
        self.total_accounts.as_ref().unwrap_or(&self.main)
    }
}

/// Everything the builders need, loaded once per invocation.
#[derive(Debug)]
pub struct ReportData {
    /// Reporting range.
    pub period: DatePeriod,
    /// Comparative range.
    pub previous_year: DatePeriod,
    /// Account hierarchy.
    pub graph: AccountGraph,
    /// Contacts by id.
    pub contacts: HashMap<ContactId, Contact>,
    /// Account narrowing.
    pub scope: AccountScope,
    /// Period ledgers.
    pub ledgers: LedgerSet,
}

impl ReportData {
    /// Returns the display name of a contact.
    #[must_use]
    pub fn contact_name(&self, id: ContactId) -> Option<&str> {
        self.contacts.get(&id).map(|contact| contact.display_name.as_str())
    }
}
