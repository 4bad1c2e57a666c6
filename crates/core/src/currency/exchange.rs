//! Exchange rate types and lookup.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: String,
    /// Target currency code.
    pub to_currency: String,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(
        from_currency: String,
        to_currency: String,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
            effective_date,
        }
    }

    /// Returns the inverse rate, or `None` for a zero rate.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rate = Decimal::ONE.checked_div(self.rate)?;
        Some(Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate,
            effective_date: self.effective_date,
        })
    }
}

/// Dated exchange rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Creates a table from a list of rates.
    #[must_use]
    pub fn new(rates: Vec<ExchangeRate>) -> Self {
        Self { rates }
    }

    /// Returns the rate from `from` to `to` effective on `on`.
    ///
    /// The latest direct quote on or before `on` wins; without one, the
    /// latest reverse quote is inverted. Identical currencies convert at one.
    #[must_use]
    pub fn rate(&self, from: &str, to: &str, on: NaiveDate) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        if let Some(direct) = self.latest(from, to, on) {
            return Some(direct.rate);
        }
        self.latest(to, from, on)
            .and_then(ExchangeRate::inverse)
            .map(|inverse| inverse.rate)
    }

    fn latest(&self, from: &str, to: &str, on: NaiveDate) -> Option<&ExchangeRate> {
        self.rates
            .iter()
            .filter(|r| r.from_currency == from && r.to_currency == to && r.effective_date <= on)
            .max_by_key(|r| r.effective_date)
    }
}
