//! Tally report runner
//!
//! Computes one report from a JSON snapshot and prints it as JSON.
//!
//! Usage: tally-reporter --kind profit-loss --query query.json [--snapshot snapshot.json]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::ledger::{Ledger, Transaction, ensure_ledger_balanced, validate_journal};
use tally_core::reports::{Report, ReportKind, ReportQuery, ReportService};
use tally_core::source::{InMemoryDataSource, Snapshot};
use tally_shared::{AppConfig, AppError, AppResult};

#[derive(Parser, Debug)]
#[command(name = "tally-reporter")]
#[command(about = "Computes a financial report from a ledger snapshot", long_about = None)]
struct Args {
    /// Report to compute: account-tree, profit-loss or general-ledger
    #[arg(short, long, default_value = "account-tree")]
    kind: ReportKind,

    /// Query file (JSON). The tenant defaults to the snapshot's.
    #[arg(short, long)]
    query: PathBuf,

    /// Snapshot file (JSON). Overrides the configured path.
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Check that journals and the whole ledger balance before reporting
    #[arg(long)]
    check: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(AppError::from)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let snapshot_path = args
        .snapshot
        .unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
    let snapshot = Snapshot::from_json(
        &std::fs::read_to_string(&snapshot_path)
            .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?,
    )?;
    info!(
        path = %snapshot_path.display(),
        tenant_id = %snapshot.tenant_id,
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "Snapshot loaded"
    );

    let query = read_query(&args.query, &snapshot)?;

    if args.check {
        check_balances(&snapshot.transactions);
    }

    let service = ReportService::new(InMemoryDataSource::from(snapshot), config.report);
    let report = run_report(&service, args.kind, &query).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}

/// Runs one report, mapping failures onto application errors.
async fn run_report(
    service: &ReportService<InMemoryDataSource>,
    kind: ReportKind,
    query: &ReportQuery,
) -> AppResult<Report> {
    service.generate(kind, query).await.map_err(|err| {
        let err = AppError::from(err);
        error!(
            code = err.error_code(),
            status = err.status_code(),
            error = %err,
            "Report failed"
        );
        err
    })
}

/// Reads the query, filling in the snapshot's tenant when absent.
fn read_query(path: &Path, snapshot: &Snapshot) -> anyhow::Result<ReportQuery> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)?;

    if let Some(fields) = value.as_object_mut() {
        fields
            .entry("tenantId")
            .or_insert_with(|| serde_json::json!(snapshot.tenant_id));
    }

    serde_json::from_value(value).context("Invalid report query")
}

/// Logs every journal (lines sharing a reference) that does not balance.
fn check_balances(transactions: &[Transaction]) {
    let mut journals: BTreeMap<(String, i64), Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        if let (Some(kind), Some(id)) = (&tx.reference_type, tx.reference_id) {
            journals.entry((kind.clone(), id)).or_default().push(tx.clone());
        }
    }

    for ((reference_type, reference_id), entries) in &journals {
        if let Err(err) = validate_journal(entries) {
            warn!(
                reference_type = %reference_type,
                reference_id = reference_id,
                code = err.error_code(),
                error = %err,
                "Journal does not balance"
            );
        }
    }

    let ledger = Ledger::from_transactions(transactions.to_vec());
    match ensure_ledger_balanced(&ledger) {
        Ok(()) => info!(journals = journals.len(), "Ledger balances"),
        Err(err) => warn!(code = err.error_code(), error = %err, "Ledger does not balance"),
    }
}
