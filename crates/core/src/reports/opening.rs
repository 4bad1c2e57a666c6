//! Opening balance resolution.
//!
//! For each report type the opening balance comes from one of two sources:
//!
//! - **Snapshot**: the per-account balances stored by the latest submitted
//!   period-closing voucher before the period, topped up with a replay of
//!   the entries between the snapshot and the period start.
//! - **Replay**: every GL entry before the period, plus opening-flagged
//!   entries unless the opening flag is ignored.
//!
//! Rows are summed per account before conversion to the presentation
//! currency.
//!
//! Balance Sheet is resolved first; Profit and Loss overrides it on collision.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ReportError;
use crate::accounts::ReportType;
use crate::dimension::RowFilter;
use crate::ledger::{Amounts, ClosingBalanceQuery, LedgerQuery, PostingWindow};
use crate::store::{AccountStore, LedgerStore, PresentationConverter};
use ledgerbal_shared::AccountsSettings;

/// Debit/credit balance of an account at the period start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Opening debit.
    pub opening_debit: Decimal,
    /// Opening credit.
    pub opening_credit: Decimal,
}

/// Where a report type's opening balance came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpeningSource {
    /// Closing-voucher snapshot, with the first replayed day if a gap was
    /// replayed on top.
    Snapshot {
        /// Closing voucher name.
        voucher: String,
        /// First day of the gap replay.
        replay_from: Option<NaiveDate>,
    },
    /// Full ledger replay.
    Replay,
}

/// Inputs of the opening balance resolution.
#[derive(Debug, Clone)]
pub struct OpeningRequest<'a> {
    /// Company reported on.
    pub company: &'a str,
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period, used as the conversion date.
    pub to_date: NaiveDate,
    /// Accounts of the active subtree, `None` for the whole chart.
    pub account_filter: Option<&'a BTreeSet<String>>,
    /// Secondary-dimension restrictions.
    pub rows: &'a RowFilter,
    /// Keep period-closing entries in the opening balance.
    pub include_period_closing: bool,
    /// Presentation currency.
    pub presentation_currency: Option<&'a str>,
    /// Global accounting settings.
    pub settings: AccountsSettings,
}

/// Opening balances for every account with history before the period.
pub type OpeningBalances = BTreeMap<String, OpeningBalance>;

/// Resolves opening balances for both report types.
pub fn resolve_opening_balances(
    accounts: &dyn AccountStore,
    ledger: &dyn LedgerStore,
    converter: &dyn PresentationConverter,
    request: &OpeningRequest<'_>,
) -> Result<OpeningBalances, ReportError> {
    let mut merged = OpeningBalances::new();
    for report_type in ReportType::ALL {
        let (balances, source) =
            resolve_report_type(accounts, ledger, converter, request, report_type)?;
        debug!(
            company = request.company,
            report_type = %report_type,
            source = ?source,
            accounts = balances.len(),
            "Resolved opening balances"
        );
        merged.extend(balances);
    }
    Ok(merged)
}

/// Resolves opening balances for one report type.
pub fn resolve_report_type(
    accounts: &dyn AccountStore,
    ledger: &dyn LedgerStore,
    converter: &dyn PresentationConverter,
    request: &OpeningRequest<'_>,
    report_type: ReportType,
) -> Result<(OpeningBalances, OpeningSource), ReportError> {
    let mut scope: BTreeSet<String> = accounts
        .accounts_of_report_type(request.company, report_type)?
        .into_iter()
        .collect();
    if let Some(filter) = request.account_filter {
        scope.retain(|account| filter.contains(account));
    }

    let voucher = if request.settings.ignore_account_closing_balance {
        None
    } else {
        ledger
            .last_period_closing_voucher(request.company, request.from_date)?
            .filter(|voucher| voucher.is_submitted)
    };

    let ignore_is_opening = request.settings.ignore_is_opening_check_for_reporting;
    let mut rows: Vec<(String, Amounts)> = Vec::new();

    let source = if let Some(voucher) = voucher {
        let snapshot = ledger.closing_balances(&ClosingBalanceQuery {
            company: request.company.to_string(),
            period_closing_voucher: voucher.name.clone(),
            accounts: Some(scope.clone()),
            exclude_period_closing_entries: !request.include_period_closing,
            rows: request.rows.clone(),
        })?;
        rows.extend(snapshot.into_iter().map(|row| (row.account, row.amounts)));

        let replay_from = voucher.replay_start(request.from_date);
        if let Some(start) = replay_from {
            let gap = ledger.gl_entries(&LedgerQuery {
                company: request.company.to_string(),
                accounts: Some(scope.clone()),
                window: PostingWindow::Between {
                    start,
                    before: request.from_date,
                },
                exclude_opening: !ignore_is_opening,
                exclude_period_closing: !request.include_period_closing,
                rows: request.rows.clone(),
            })?;
            rows.extend(gap.into_iter().map(|entry| (entry.account, entry.amounts)));
        }

        OpeningSource::Snapshot {
            voucher: voucher.name,
            replay_from,
        }
    } else {
        let window = if ignore_is_opening {
            PostingWindow::Before(request.from_date)
        } else {
            PostingWindow::BeforeOrOpening(request.from_date)
        };
        let history = ledger.gl_entries(&LedgerQuery {
            company: request.company.to_string(),
            accounts: Some(scope),
            window,
            exclude_opening: false,
            exclude_period_closing: !request.include_period_closing,
            rows: request.rows.clone(),
        })?;
        rows.extend(history.into_iter().map(|entry| (entry.account, entry.amounts)));

        OpeningSource::Replay
    };

    let mut sums: BTreeMap<String, Amounts> = BTreeMap::new();
    for (account, amounts) in rows {
        sums.entry(account).or_default().add(&amounts);
    }

    let mut balances = OpeningBalances::new();
    for (account, mut amounts) in sums {
        if let Some(currency) = request.presentation_currency {
            converter.to_presentation(&mut amounts, request.company, currency, request.to_date)?;
        }
        balances.insert(
            account,
            OpeningBalance {
                opening_debit: amounts.debit,
                opening_credit: amounts.credit,
            },
        );
    }

    Ok((balances, source))
}
