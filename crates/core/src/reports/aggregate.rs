//! Per-account value calculation.

use super::opening::OpeningBalances;
use crate::accounts::AccountHierarchy;
use crate::ledger::PeriodTotals;

/// Fills every listed account's balance from its opening balance and the
/// period's per-account sums, then closes it.
///
/// With `show_net_values`, each account is netted right after closing.
pub fn calculate_values(
    hierarchy: &mut AccountHierarchy,
    period: &PeriodTotals,
    opening: &OpeningBalances,
    show_net_values: bool,
) {
    for node in hierarchy.nodes_mut() {
        let name = node.account.name.as_str();
        let balance = &mut node.balance;

        if let Some(opening) = opening.get(name) {
            balance.opening_debit = opening.opening_debit;
            balance.opening_credit = opening.opening_credit;
        }

        if let Some(amounts) = period.get(name) {
            balance.debit += amounts.debit;
            balance.credit += amounts.credit;
        }

        balance.close();

        if show_net_values {
            balance.apply_net(node.account.root_type);
        }
    }
}
