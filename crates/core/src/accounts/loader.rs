//! Account tree loading.

use std::collections::BTreeSet;

use tracing::{debug, error, warn};

use super::types::{Account, NestedSetBounds};
use crate::reports::ReportError;
use crate::store::{AccountStore, TreeDoctype, TreeExpander};

/// The account a report is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeRoot {
    /// Account name.
    pub name: String,
    /// Nested-set bounds, `None` when the store has none recorded.
    pub bounds: Option<NestedSetBounds>,
}

/// Accounts selected for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChart {
    /// Selected accounts ordered by left bound.
    pub accounts: Vec<Account>,
    /// Active subtree restriction.
    pub subtree: Option<SubtreeRoot>,
}

impl LoadedChart {
    /// Returns true if no account was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Returns the names of the selected accounts when a subtree is active.
    ///
    /// `None` means the whole chart is selected and no account restriction
    /// applies to ledger reads.
    #[must_use]
    pub fn account_filter(&self) -> Option<BTreeSet<String>> {
        self.subtree
            .as_ref()
            .map(|_| self.accounts.iter().map(|a| a.name.clone()).collect())
    }

    /// Returns the non-group accounts that lie inside the subtree bounds.
    ///
    /// `None` when no subtree is active or its bounds are unknown.
    #[must_use]
    pub fn posting_accounts(&self) -> Option<BTreeSet<String>> {
        let bounds = self.subtree.as_ref()?.bounds?;
        Some(
            self.accounts
                .iter()
                .filter(|a| !a.is_group && bounds.contains(&a.bounds))
                .map(|a| a.name.clone())
                .collect(),
        )
    }
}

/// Loads the company's accounts, restricted to the subtree of `main_account`
/// when one is given.
///
/// # Errors
///
/// Returns `AccountNotFound` if `main_account` is not an account of the
/// company, or a store error.
pub fn load_chart(
    accounts: &dyn AccountStore,
    trees: &dyn TreeExpander,
    company: &str,
    main_account: Option<&str>,
) -> Result<LoadedChart, ReportError> {
    let mut chart = accounts.company_accounts(company)?;

    let subtree = match main_account {
        None => None,
        Some(main) => {
            if !accounts.account_exists(company, main)? {
                return Err(ReportError::AccountNotFound {
                    account: main.to_string(),
                    company: company.to_string(),
                });
            }

            let bounds = accounts.nested_set_bounds(main)?;
            let members = subtree_members(trees, main, bounds)?;
            chart.retain(|account| members.contains(&account.name));

            Some(SubtreeRoot {
                name: main.to_string(),
                bounds,
            })
        }
    };

    chart.sort_by(|a, b| {
        a.bounds
            .lft
            .cmp(&b.bounds.lft)
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(company, accounts = chart.len(), "Loaded chart of accounts");

    Ok(LoadedChart {
        accounts: chart,
        subtree,
    })
}

fn subtree_members(
    trees: &dyn TreeExpander,
    main: &str,
    bounds: Option<NestedSetBounds>,
) -> Result<BTreeSet<String>, ReportError> {
    if bounds.is_none() {
        error!(
            account = main,
            "Nested-set bounds missing for account; reporting it alone"
        );
        return Ok(BTreeSet::from([main.to_string()]));
    }

    let expanded = trees.with_children(&TreeDoctype::Account, main)?;
    if expanded.is_empty() {
        warn!(
            account = main,
            "Descendant expansion returned nothing; reporting the account alone"
        );
        return Ok(BTreeSet::from([main.to_string()]));
    }

    Ok(expanded.into_iter().collect())
}
