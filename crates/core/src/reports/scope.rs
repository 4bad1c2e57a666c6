//! Secondary-dimension scope of a report run.
//!
//! Expands tree-typed filter values to their descendants and resolves the
//! finance-book rule, producing the single [`RowFilter`] every ledger read of
//! the run uses.

use std::collections::BTreeSet;

use tracing::debug;

use super::error::ReportError;
use super::filters::ValidatedFilters;
use crate::dimension::{FinanceBookRule, RowFilter};
use crate::store::{DimensionRegistry, LedgerStore, TreeDoctype, TreeExpander};

/// Builds the row filter for a validated request.
///
/// # Errors
///
/// Returns `FinanceBookConflict` when default-book entries are requested
/// together with a different explicit finance book, or a store error.
pub fn build_row_filter(
    filters: &ValidatedFilters,
    ledger: &dyn LedgerStore,
    trees: &dyn TreeExpander,
    registry: &dyn DimensionRegistry,
) -> Result<RowFilter, ReportError> {
    let mut rows = RowFilter::new();

    if let Some(cost_center) = &filters.cost_center {
        let expanded = expand(trees, &TreeDoctype::CostCenter, [cost_center.as_str()])?;
        rows = rows.with_cost_centers(expanded);
    }

    if !filters.projects.is_empty() {
        rows = rows.with_projects(filters.projects.iter().cloned());
    }

    if let Some(rule) = finance_book_rule(filters, ledger)? {
        rows = rows.with_finance_books(rule);
    }

    if !filters.dimensions.is_empty() {
        for dimension in registry.accounting_dimensions()? {
            let Some(values) = filters.dimensions.get(&dimension.fieldname) else {
                continue;
            };
            let accepted: BTreeSet<String> = if dimension.is_tree {
                let doctype = TreeDoctype::Dimension(dimension.document_type.clone());
                expand(trees, &doctype, values.iter().map(String::as_str))?
            } else {
                values.iter().cloned().collect()
            };
            rows = rows.with_dimension(dimension.fieldname, accepted);
        }
    }

    debug!(company = %filters.company, active = !rows.is_empty(), "Built row filter");
    Ok(rows)
}

fn finance_book_rule(
    filters: &ValidatedFilters,
    ledger: &dyn LedgerStore,
) -> Result<Option<FinanceBookRule>, ReportError> {
    if ledger.finance_book_count()? == 0 {
        return Ok(None);
    }

    let requested = filters.finance_book.as_deref();
    if !filters.include_default_book_entries {
        return Ok(Some(FinanceBookRule::accepting(requested)));
    }

    let default = ledger
        .default_finance_book(&filters.company)?
        .filter(|book| !book.is_empty());
    if let (Some(requested), Some(default)) = (requested, default.as_deref())
        && requested != default
    {
        return Err(ReportError::FinanceBookConflict {
            requested: requested.to_string(),
            default: default.to_string(),
        });
    }

    Ok(Some(FinanceBookRule::accepting(
        requested.into_iter().chain(default.as_deref()),
    )))
}

/// Expands each value to itself and its descendants.
///
/// A value the expander knows nothing about is kept as given.
fn expand<'v>(
    trees: &dyn TreeExpander,
    doctype: &TreeDoctype,
    values: impl IntoIterator<Item = &'v str>,
) -> Result<BTreeSet<String>, ReportError> {
    let mut expanded = BTreeSet::new();
    for value in values {
        let descendants = trees.with_children(doctype, value)?;
        debug!(
            doctype = doctype.as_str(),
            value,
            descendants = descendants.len(),
            "Expanded tree filter"
        );
        if descendants.is_empty() {
            expanded.insert(value.to_string());
        } else {
            expanded.extend(descendants);
        }
    }
    Ok(expanded)
}
