//! Report generation service.

use tally_shared::config::ReportConfig;
use tracing::info;

use super::builder::ReportTreeBuilder;
use super::data::ReportData;
use super::error::ReportError;
use super::filter::NodeFilterPipeline;
use super::general_ledger::GeneralLedgerBuilder;
use super::query::ReportQuery;
use super::repository::ReportRepository;
use super::schema::ReportSchema;
use super::types::{PeriodColumn, Report, ReportKind, ReportMeta, ReportNode};
use crate::source::ReportDataSource;

/// Computes reports: load, build, prune.
pub struct ReportService<S> {
    repository: ReportRepository<S>,
    defaults: ReportConfig,
}

impl<S: ReportDataSource> ReportService<S> {
    /// Creates a service over a data source with configured defaults.
    #[must_use]
    pub fn new(source: S, defaults: ReportConfig) -> Self {
        Self {
            repository: ReportRepository::new(source),
            defaults,
        }
    }

    /// Returns the repository used to load report data.
    #[must_use]
    pub fn repository(&self) -> &ReportRepository<S> {
        &self.repository
    }

    /// Computes the chart of accounts tree.
    ///
    /// # Errors
    ///
    /// See [`ReportRepository::load`].
    pub async fn account_tree(&self, query: &ReportQuery) -> Result<Report, ReportError> {
        self.generate(ReportKind::AccountTree, query).await
    }

    /// Computes the profit and loss sheet.
    ///
    /// # Errors
    ///
    /// See [`ReportRepository::load`].
    pub async fn profit_loss(&self, query: &ReportQuery) -> Result<Report, ReportError> {
        self.generate(ReportKind::ProfitLoss, query).await
    }

    /// Computes the general ledger.
    ///
    /// # Errors
    ///
    /// See [`ReportRepository::load`].
    pub async fn general_ledger(&self, query: &ReportQuery) -> Result<Report, ReportError> {
        self.generate(ReportKind::GeneralLedger, query).await
    }

    /// Computes a report of the given kind.
    ///
    /// # Errors
    ///
    /// See [`ReportRepository::load`].
    pub async fn generate(
        &self,
        kind: ReportKind,
        query: &ReportQuery,
    ) -> Result<Report, ReportError> {
        let data = self.repository.load(query).await?;
        let report = self.compute(kind, query, &data);

        info!(
            tenant_id = %query.tenant_id,
            kind = %kind,
            nodes = report.nodes.len(),
            "Report computed"
        );
        Ok(report)
    }

    /// Builds and prunes a report from already loaded data.
    #[must_use]
    pub fn compute(&self, kind: ReportKind, query: &ReportQuery, data: &ReportData) -> Report {
        let policy = query.resolved_policy(&self.defaults);
        let columns: Vec<PeriodColumn> = match (kind, query.period_unit) {
            (ReportKind::GeneralLedger, _) | (_, None) => Vec::new(),
            (_, Some(unit)) => data
                .period
                .split(unit)
                .into_iter()
                .map(PeriodColumn::from)
                .collect(),
        };

        let nodes: Vec<ReportNode> = match kind {
            ReportKind::AccountTree | ReportKind::ProfitLoss => {
                let schema = if kind == ReportKind::ProfitLoss {
                    ReportSchema::profit_loss()
                } else {
                    ReportSchema::flexible()
                };
                ReportTreeBuilder::new(&data.graph, &data.ledgers, &data.scope)
                    .with_policy(policy)
                    .with_columns(&columns)
                    .build(&schema)
            }
            ReportKind::GeneralLedger => GeneralLedgerBuilder::new(data).with_policy(policy).build(),
        };

        let pipeline = NodeFilterPipeline::from_flags(query.none_zero, query.none_transactions, policy);
        let nodes = pipeline.filter(nodes, data.ledgers.total_accounts());

        Report {
            meta: ReportMeta {
                kind,
                tenant_id: query.tenant_id,
                period: data.period,
                previous_year: data.previous_year,
                number_format: query.resolved_number_format(&self.defaults),
                percentage_policy: policy,
                columns,
            },
            nodes,
        }
    }
}
