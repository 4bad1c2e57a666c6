//! Presentation-currency conversion helpers and exchange rate tables.

pub mod conversion;
pub mod exchange;

#[cfg(test)]
mod props;

pub use conversion::{convert_amount, convert_amounts};
pub use exchange::{ExchangeRate, RateTable};
