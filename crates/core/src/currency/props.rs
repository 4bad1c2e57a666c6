//! Property-based tests for presentation conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{convert_amount, convert_amounts};
use crate::ledger::Amounts;

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converted amounts never carry more decimal places than requested.
    #[test]
    fn prop_convert_respects_precision(amount in amount(), rate in rate(), dp in 0u32..=4) {
        let converted = convert_amount(amount, rate, dp);
        prop_assert!(converted.scale() <= dp);
    }

    /// Rounding moves the exact product by at most half a unit.
    #[test]
    fn prop_convert_error_is_bounded(amount in amount(), rate in rate(), dp in 0u32..=4) {
        let exact = amount * rate;
        let converted = convert_amount(amount, rate, dp);
        prop_assert!((converted - exact).abs() <= Decimal::new(5, dp + 1));
    }

    /// Converting at a rate of one is the identity for 2-place amounts.
    #[test]
    fn prop_unit_rate_is_identity(debit in amount(), credit in amount()) {
        let mut amounts = Amounts::new(debit, credit);
        amounts.account_currency = Some("USD".to_string());
        convert_amounts(&mut amounts, "EUR", Decimal::ONE, 2);
        prop_assert_eq!(amounts.debit, debit);
        prop_assert_eq!(amounts.credit, credit);
    }
}
