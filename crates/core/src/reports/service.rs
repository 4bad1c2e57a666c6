//! Balance report service.

use tracing::{debug, instrument};

use super::aggregate::calculate_values;
use super::error::ReportError;
use super::filters::{ReportFilters, ValidatedFilters};
use super::format::{FormatOptions, prepare_report};
use super::opening::{OpeningRequest, resolve_opening_balances};
use super::scope::build_row_filter;
use super::types::BalanceReport;
use crate::accounts::{AccountHierarchy, load_chart};
use crate::ledger::{PeriodFetch, gl_entries_by_account};
use crate::store::ReportSources;
use ledgerbal_shared::AccountsSettings;

/// Service for generating the account balance report.
pub struct ReportService;

impl ReportService {
    /// Validates a raw request and runs the report.
    pub fn execute(
        sources: &ReportSources<'_>,
        settings: AccountsSettings,
        filters: ReportFilters,
    ) -> Result<BalanceReport, ReportError> {
        let filters = filters.validate()?;
        Self::run(sources, settings, &filters)
    }

    /// Runs the report for a validated request.
    ///
    /// Stages run in order: account loading, hierarchy indexing, opening
    /// balances, in-period aggregation, roll-up, and presentation. Every
    /// accumulator is local to the call.
    #[instrument(skip_all, fields(company = %filters.company, from = %filters.from_date, to = %filters.to_date))]
    pub fn run(
        sources: &ReportSources<'_>,
        settings: AccountsSettings,
        filters: &ValidatedFilters,
    ) -> Result<BalanceReport, ReportError> {
        let company = filters.company.as_str();

        let chart = load_chart(
            sources.accounts,
            sources.trees,
            company,
            filters.main_account.as_deref(),
        )?;
        if chart.is_empty() {
            debug!("No accounts selected");
            return Ok(BalanceReport::empty());
        }

        let rows = build_row_filter(filters, sources.ledger, sources.trees, sources.dimensions)?;
        let mut hierarchy = AccountHierarchy::build(&chart);

        let currency = match &filters.presentation_currency {
            Some(currency) => currency.clone(),
            None => sources.currencies.company_currency(company)?,
        };
        let presentation_currency = filters.presentation_currency.as_deref();

        let account_filter = chart.account_filter();
        let opening = resolve_opening_balances(
            sources.accounts,
            sources.ledger,
            sources.converter,
            &OpeningRequest {
                company,
                from_date: filters.from_date,
                to_date: filters.to_date,
                account_filter: account_filter.as_ref(),
                rows: &rows,
                include_period_closing: filters.with_period_closing_entry_for_opening,
                presentation_currency,
                settings,
            },
        )?;

        let period = gl_entries_by_account(
            sources.ledger,
            sources.converter,
            &PeriodFetch {
                company,
                from_date: filters.from_date,
                to_date: filters.to_date,
                accounts: chart.posting_accounts(),
                rows: &rows,
                include_period_closing: filters.with_period_closing_entry_for_current_period,
                presentation_currency,
            },
        )?;

        calculate_values(&mut hierarchy, &period, &opening, filters.show_net_values);
        hierarchy.roll_up();

        let report = prepare_report(
            &mut hierarchy,
            &FormatOptions {
                from_date: filters.from_date,
                to_date: filters.to_date,
                currency: &currency,
                zero_cutoff: sources.currencies.zero_cutoff(&currency),
                show_net_values: filters.show_net_values,
                show_zero_values: filters.show_zero_values,
            },
        );

        debug!(rows = report.rows.len(), "Balance report prepared");
        Ok(report)
    }
}
