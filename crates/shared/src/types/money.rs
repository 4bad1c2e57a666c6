//! Currency precision helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the workspace is a `rust_decimal::Decimal`.

use rust_decimal::Decimal;

/// Decimal places assumed for a currency with no configured precision.
pub const DEFAULT_CURRENCY_PRECISION: u32 = 2;

/// Returns the negligible-amount cutoff for a currency precision.
///
/// An amount whose absolute value is below half of the smallest currency
/// unit rounds to zero for display, so it does not count as a value.
#[must_use]
pub fn zero_cutoff(precision: u32) -> Decimal {
    Decimal::new(5, precision + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(0, dec!(0.5))]
    #[case(2, dec!(0.005))]
    #[case(3, dec!(0.0005))]
    fn test_zero_cutoff(#[case] precision: u32, #[case] expected: Decimal) {
        assert_eq!(zero_cutoff(precision), expected);
    }

    #[test]
    fn test_default_precision_cutoff() {
        assert_eq!(zero_cutoff(DEFAULT_CURRENCY_PRECISION), dec!(0.005));
    }
}
