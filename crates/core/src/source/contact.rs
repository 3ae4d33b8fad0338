//! Counter-parties referenced by transactions.

use serde::{Deserialize, Serialize};
use tally_shared::types::ContactId;

/// A customer, vendor or other counter-party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact ID.
    pub id: ContactId,
    /// Name shown on reports.
    pub display_name: String,
    /// Free-form kind, e.g. `customer` or `vendor`.
    #[serde(default)]
    pub contact_type: Option<String>,
}

impl Contact {
    /// Creates a contact without a type.
    #[must_use]
    pub fn new(id: ContactId, display_name: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            contact_type: None,
        }
    }
}
