//! Presentation of a rolled-up hierarchy as report rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{BalanceReport, ReportRow, TOTAL_LABEL, columns};
use crate::accounts::AccountHierarchy;

/// Presentation settings of one report run.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
    /// Currency the values are in.
    pub currency: &'a str,
    /// Magnitude below which a value counts as zero.
    pub zero_cutoff: Decimal,
    /// Net group rows onto their natural side.
    pub show_net_values: bool,
    /// Keep rows without any value.
    pub show_zero_values: bool,
}

/// Turns a rolled-up hierarchy into report rows and a total row.
///
/// The subtree root and its direct children are always visible. Unless
/// zero values are shown, a row is kept only if it or one of its
/// descendants has a value.
#[must_use]
pub fn prepare_report(hierarchy: &mut AccountHierarchy, options: &FormatOptions<'_>) -> BalanceReport {
    if hierarchy.is_empty() {
        return BalanceReport::empty();
    }

    if options.show_net_values {
        let groups: Vec<bool> = hierarchy
            .nodes()
            .iter()
            .map(|node| hierarchy.has_children(&node.account.name))
            .collect();
        for (node, is_group) in hierarchy.nodes_mut().iter_mut().zip(groups) {
            if is_group {
                node.balance.apply_net(node.account.root_type);
            }
        }
    }

    let subtree_root = hierarchy.subtree_root();
    let mut rows: Vec<ReportRow> = hierarchy
        .nodes()
        .iter()
        .map(|node| {
            let forced = subtree_root.is_some_and(|root| {
                node.account.name == root || node.parent.as_deref() == Some(root)
            });
            ReportRow {
                account: node.account.name.clone(),
                parent_account: node.parent.clone(),
                indent: node.indent,
                from_date: options.from_date,
                to_date: options.to_date,
                currency: options.currency.to_string(),
                account_name: node.account.display_name(),
                values: node.balance,
                has_value: forced || node.balance.has_value(options.zero_cutoff),
                warn_if_negative: false,
            }
        })
        .collect();

    if !options.show_zero_values {
        let mut keep: Vec<bool> = rows.iter().map(|row| row.has_value).collect();
        for i in (0..rows.len()).rev() {
            if !keep[i] {
                continue;
            }
            if let Some(parent) = rows[i].parent_account.as_deref()
                && let Some(p) = hierarchy.position(parent)
            {
                keep[p] = true;
            }
        }
        let mut keep = keep.into_iter();
        rows.retain(|_| keep.next().unwrap_or(false));
    }

    let total = ReportRow {
        account: TOTAL_LABEL.to_string(),
        parent_account: None,
        indent: 0,
        from_date: options.from_date,
        to_date: options.to_date,
        currency: options.currency.to_string(),
        account_name: TOTAL_LABEL.to_string(),
        values: hierarchy.root_total(),
        has_value: true,
        warn_if_negative: true,
    };

    BalanceReport {
        columns: columns(),
        rows,
        total: Some(total),
    }
}
