//! Chart-of-accounts construction from parent links.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetError;
use ledgerbal_core::accounts::{Account, NestedSetBounds, ReportType, RootType};

/// An account as authored in a dataset, without nested-set bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSpec {
    /// Unique account identifier.
    pub name: String,
    /// Owning company.
    pub company: String,
    /// Optional account number.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Display name, defaults to `name`.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Parent account, `None` for a root.
    #[serde(default)]
    pub parent_account: Option<String>,
    /// Group accounts only aggregate children.
    #[serde(default)]
    pub is_group: bool,
    /// Root classification.
    pub root_type: RootType,
    /// Defaults to Profit and Loss for Income/Expense, Balance Sheet otherwise.
    #[serde(default)]
    pub report_type: Option<ReportType>,
}

impl AccountSpec {
    /// Creates a spec with derived report type and display name.
    pub fn new(
        company: &str,
        name: &str,
        parent: Option<&str>,
        root_type: RootType,
        is_group: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            company: company.to_string(),
            account_number: None,
            account_name: None,
            parent_account: parent.map(str::to_string),
            is_group,
            root_type,
            report_type: None,
        }
    }

    fn report_type(&self) -> ReportType {
        self.report_type.unwrap_or(match self.root_type {
            RootType::Income | RootType::Expense => ReportType::ProfitAndLoss,
            RootType::Asset | RootType::Liability | RootType::Equity => ReportType::BalanceSheet,
        })
    }
}

/// Builds accounts with nested-set bounds, returned in pre-order.
///
/// Children are numbered in input order. Every parent must exist in the
/// same company and every account must be reachable from a root.
pub fn build_chart(specs: &[AccountSpec]) -> Result<Vec<Account>, DatasetError> {
    let mut index: BTreeMap<&str, &AccountSpec> = BTreeMap::new();
    for spec in specs {
        if index.insert(spec.name.as_str(), spec).is_some() {
            return Err(DatasetError::DuplicateAccount(spec.name.clone()));
        }
    }

    let mut children: BTreeMap<&str, Vec<&AccountSpec>> = BTreeMap::new();
    let mut roots = Vec::new();
    for spec in specs {
        match spec.parent_account.as_deref() {
            None => roots.push(spec),
            Some(parent) => match index.get(parent) {
                Some(p) if p.company == spec.company => {
                    children.entry(parent).or_default().push(spec);
                }
                _ => {
                    return Err(DatasetError::UnknownParent {
                        account: spec.name.clone(),
                        parent: parent.to_string(),
                    });
                }
            },
        }
    }

    let mut accounts = Vec::with_capacity(specs.len());
    let mut counter = 0;
    for root in roots {
        number(root, &children, &mut counter, &mut accounts);
    }

    if accounts.len() < specs.len() {
        let reached: BTreeSet<&str> = accounts.iter().map(|a: &Account| a.name.as_str()).collect();
        let stray = specs
            .iter()
            .find(|spec| !reached.contains(spec.name.as_str()))
            .map_or_else(String::new, |spec| spec.name.clone());
        return Err(DatasetError::Unreachable(stray));
    }

    Ok(accounts)
}

fn number(
    spec: &AccountSpec,
    children: &BTreeMap<&str, Vec<&AccountSpec>>,
    counter: &mut i64,
    out: &mut Vec<Account>,
) {
    *counter += 1;
    let position = out.len();
    out.push(Account {
        name: spec.name.clone(),
        company: spec.company.clone(),
        account_number: spec.account_number.clone(),
        account_name: spec.account_name.clone().unwrap_or_else(|| spec.name.clone()),
        parent_account: spec.parent_account.clone(),
        bounds: NestedSetBounds::new(*counter, *counter),
        is_group: spec.is_group,
        root_type: spec.root_type,
        report_type: spec.report_type(),
    });

    for child in children.get(spec.name.as_str()).into_iter().flatten() {
        number(child, children, counter, out);
    }

    *counter += 1;
    out[position].bounds.rgt = *counter;
}
