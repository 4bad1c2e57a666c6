//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Always round to currency's decimal places
//! - Use banker's rounding (round half to even)

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::ledger::Amounts;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Rewrites company-currency debit/credit into `target`.
///
/// Rows kept in an account currency equal to `target` take their
/// account-currency amounts verbatim. Everything else is converted from the
/// company currency at `rate`. Account-currency amounts are left as posted.
pub fn convert_amounts(amounts: &mut Amounts, target: &str, rate: Decimal, decimal_places: u32) {
    if amounts.account_currency.as_deref() == Some(target) {
        amounts.debit = amounts.debit_in_account_currency;
        amounts.credit = amounts.credit_in_account_currency;
        return;
    }
    amounts.debit = convert_amount(amounts.debit, rate, decimal_places);
    amounts.credit = convert_amount(amounts.credit, rate, decimal_places);
}
