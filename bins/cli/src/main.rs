//! Ledgerbal command-line runner.
//!
//! Loads a JSON dataset into the in-memory store and either runs the account
//! balance report or the depreciation batch approver against it.
//!
//! # Usage
//!
//! ```bash
//! ledgerbal report --dataset demos/dataset.json --company "Acme Corp" --from 2024-01-01 --to 2024-01-31
//! ledgerbal report --dataset demos/dataset.json --filters filters.json --format json
//! ledgerbal approve-depreciation --dataset demos/dataset.json --output approved.json
//! ```

mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerbal_core::reports::{ReportFilters, ReportService};
use ledgerbal_core::store::ReportSources;
use ledgerbal_core::workflow::DepreciationApprover;
use ledgerbal_memory::{Dataset, MemoryStore};
use ledgerbal_shared::config::LoggingConfig;
use ledgerbal_shared::types::UserId;
use ledgerbal_shared::{AppConfig, AppError};

/// Account balance report and depreciation approval over a JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "ledgerbal")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the account balance report
    Report(ReportArgs),
    /// Approve, submit, and book draft depreciation entries
    ApproveDepreciation(ApproveArgs),
}

#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// Dataset to report on
    #[arg(long, value_name = "FILE")]
    dataset: PathBuf,

    /// JSON file with report filters; flags below override it
    #[arg(long, value_name = "FILE")]
    filters: Option<PathBuf>,

    /// Company to report on
    #[arg(long)]
    company: Option<String>,

    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Restrict the report to this account's subtree
    #[arg(long)]
    main_account: Option<String>,

    /// Present amounts in this currency
    #[arg(long)]
    presentation_currency: Option<String>,

    /// Collapse opening and closing balances onto one side
    #[arg(long)]
    show_net_values: bool,

    /// Keep rows without any value
    #[arg(long)]
    show_zero_values: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(clap::Args, Debug)]
struct ApproveArgs {
    /// Dataset holding the journal entries
    #[arg(long, value_name = "FILE")]
    dataset: PathBuf,

    /// Resume entries a previous run left approved or submitted
    #[arg(long)]
    resume: bool,

    /// User recorded on every transition (defaults to a fresh id)
    #[arg(long)]
    actor: Option<UserId>,

    /// Write the dataset with updated journal entries here
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                // Rejected input exits with 2, everything else with 1.
                Some(app) => {
                    eprintln!("error[{}]: {app}", app.error_code());
                    ExitCode::from(if app.status_code() < 500 { 2 } else { 1 })
                }
                None => {
                    eprintln!("error: {e:#}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    match args.command {
        Command::Report(report) => run_report(&config, report),
        Command::ApproveDepreciation(approve) => run_approver(&config, &approve),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn load_store(config: &AppConfig, path: &Path) -> Result<(Dataset, MemoryStore)> {
    let dataset = Dataset::from_path(path)?;
    let store = MemoryStore::from_dataset(dataset.clone(), config.currency.clone())?;
    info!(dataset = %path.display(), "Dataset loaded");
    Ok((dataset, store))
}

fn run_report(config: &AppConfig, args: ReportArgs) -> Result<ExitCode> {
    let (_, store) = load_store(config, &args.dataset)?;

    let mut filters = match &args.filters {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read filters {}", path.display()))?;
            serde_json::from_str::<ReportFilters>(&json)
                .with_context(|| format!("Invalid filters {}", path.display()))?
        }
        None => ReportFilters::default(),
    };
    override_with(&mut filters.company, args.company);
    override_with(&mut filters.from_date, args.from);
    override_with(&mut filters.to_date, args.to);
    override_with(&mut filters.main_account, args.main_account);
    override_with(&mut filters.presentation_currency, args.presentation_currency);
    filters.show_net_values |= args.show_net_values;
    filters.show_zero_values |= args.show_zero_values;

    let report = ReportService::execute(&ReportSources::from_store(&store), config.accounts, filters)
        .map_err(AppError::from)?;
    info!(rows = report.rows.len(), "Report finished");

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Table => output::report_table(&report).printstd(),
    }
    Ok(ExitCode::SUCCESS)
}

fn override_with(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

fn run_approver(config: &AppConfig, args: &ApproveArgs) -> Result<ExitCode> {
    let (mut dataset, store) = load_store(config, &args.dataset)?;
    let approver = DepreciationApprover::new(&store, args.actor.unwrap_or_default());

    let outcome = if args.resume {
        approver.resume_stuck()
    } else {
        approver.run()
    }
    .map_err(AppError::from)?;

    let pending = store.staged_changes().map_err(AppError::from)?;
    if pending > 0 {
        warn!(pending, "Discarding uncommitted journal entry changes");
        store.rollback().map_err(AppError::from)?;
    }
    info!(
        run_id = %outcome.run_id,
        entries = outcome.completed.len(),
        complete = outcome.is_complete(),
        "Approver finished"
    );
    output::batch_table(&outcome).printstd();

    if let Some(path) = &args.output {
        dataset.journal_entries = store.committed_journal_entries().map_err(AppError::from)?;
        fs::write(path, serde_json::to_string_pretty(&dataset)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(output = %path.display(), "Dataset written");
    }

    match outcome.into_result() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => Err(AppError::from(err).into()),
    }
}
