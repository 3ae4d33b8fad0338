//! Report query parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::config::{PercentagePolicy, ReportConfig};
use tally_shared::types::{AccountId, BranchId, NumberFormat, TenantId};

use crate::period::{DatePeriod, PeriodError, PeriodUnit};

/// What to compute and how to prune it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Tenant to report on.
    pub tenant_id: TenantId,
    /// First day of the reporting range.
    pub from_date: NaiveDate,
    /// Last day of the reporting range.
    pub to_date: NaiveDate,
    /// Branch allow-list. Empty means every branch.
    #[serde(default)]
    pub branches_ids: Vec<BranchId>,
    /// Account allow-list. Empty means every account.
    #[serde(default)]
    pub accounts_ids: Vec<AccountId>,
    /// Drop accounts whose total is zero.
    #[serde(default)]
    pub none_zero: bool,
    /// Drop accounts without transactions in the range.
    #[serde(default)]
    pub none_transactions: bool,
    /// Formatting hints. Falls back to the configured format.
    #[serde(default)]
    pub number_format: Option<NumberFormat>,
    /// Zero-comparative policy. Falls back to the configured policy.
    #[serde(default)]
    pub percentage_policy: Option<PercentagePolicy>,
    /// Column breakdown unit.
    #[serde(default)]
    pub period_unit: Option<PeriodUnit>,
}

impl ReportQuery {
    /// Creates a query over a date range with no narrowing or pruning.
    #[must_use]
    pub fn new(tenant_id: TenantId, from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            tenant_id,
            from_date,
            to_date,
            branches_ids: Vec::new(),
            accounts_ids: Vec::new(),
            none_zero: false,
            none_transactions: false,
            number_format: None,
            percentage_policy: None,
            period_unit: None,
        }
    }

    /// Restricts the report to the given accounts.
    #[must_use]
    pub fn with_accounts(mut self, accounts_ids: impl IntoIterator<Item = AccountId>) -> Self {
        self.accounts_ids = accounts_ids.into_iter().collect();
        self
    }

    /// Restricts the report to the given branches.
    #[must_use]
    pub fn with_branches(mut self, branches_ids: impl IntoIterator<Item = BranchId>) -> Self {
        self.branches_ids = branches_ids.into_iter().collect();
        self
    }

    /// Enables zero-total pruning.
    #[must_use]
    pub fn none_zero(mut self, enabled: bool) -> Self {
        self.none_zero = enabled;
        self
    }

    /// Enables no-transaction pruning.
    #[must_use]
    pub fn none_transactions(mut self, enabled: bool) -> Self {
        self.none_transactions = enabled;
        self
    }

    /// Sets the zero-comparative policy.
    #[must_use]
    pub fn with_percentage_policy(mut self, policy: PercentagePolicy) -> Self {
        self.percentage_policy = Some(policy);
        self
    }

    /// Requests a column breakdown.
    #[must_use]
    pub fn with_period_unit(mut self, unit: PeriodUnit) -> Self {
        self.period_unit = Some(unit);
        self
    }

    /// Returns the validated reporting range.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDateRange`] if `from_date > to_date`.
    pub fn period(&self) -> Result<DatePeriod, PeriodError> {
        DatePeriod::new(self.from_date, self.to_date)
    }

    /// Returns the policy to apply, preferring the query's own.
    #[must_use]
    pub fn resolved_policy(&self, defaults: &ReportConfig) -> PercentagePolicy {
        self.percentage_policy.unwrap_or(defaults.percentage_policy)
    }

    /// Returns the number format to report, preferring the query's own.
    #[must_use]
    pub fn resolved_number_format(&self, defaults: &ReportConfig) -> NumberFormat {
        self.number_format.unwrap_or(defaults.number_format)
    }
}
