//! Per-account balance accumulators.
//!
//! A [`BalanceRow`] carries the six monetary columns of the balance report.
//! Rows start at zero, only ever accumulate, and are decremented solely by
//! the net-balance transform.

use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{BalanceSide, RootType};

/// The six monetary columns of the balance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    /// Debit balance at the start of the period.
    OpeningDebit,
    /// Credit balance at the start of the period.
    OpeningCredit,
    /// Debits posted within the period.
    Debit,
    /// Credits posted within the period.
    Credit,
    /// Debit balance at the end of the period.
    ClosingDebit,
    /// Credit balance at the end of the period.
    ClosingCredit,
}

impl ValueField {
    /// All value fields in column order.
    pub const ALL: [Self; 6] = [
        Self::OpeningDebit,
        Self::OpeningCredit,
        Self::Debit,
        Self::Credit,
        Self::ClosingDebit,
        Self::ClosingCredit,
    ];

    /// Returns the column field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpeningDebit => "opening_debit",
            Self::OpeningCredit => "opening_credit",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::ClosingDebit => "closing_debit",
            Self::ClosingCredit => "closing_credit",
        }
    }
}

/// Which period boundary a debit/credit pair describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Opening,
    Closing,
}

/// Opening, period, and closing debit/credit of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Debit balance at the start of the period.
    pub opening_debit: Decimal,
    /// Credit balance at the start of the period.
    pub opening_credit: Decimal,
    /// Debits posted within the period.
    pub debit: Decimal,
    /// Credits posted within the period.
    pub credit: Decimal,
    /// Debit balance at the end of the period.
    pub closing_debit: Decimal,
    /// Credit balance at the end of the period.
    pub closing_credit: Decimal,
}

impl BalanceRow {
    /// Creates a zeroed row.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the value of one column.
    #[must_use]
    pub const fn get(&self, field: ValueField) -> Decimal {
        match field {
            ValueField::OpeningDebit => self.opening_debit,
            ValueField::OpeningCredit => self.opening_credit,
            ValueField::Debit => self.debit,
            ValueField::Credit => self.credit,
            ValueField::ClosingDebit => self.closing_debit,
            ValueField::ClosingCredit => self.closing_credit,
        }
    }

    /// Returns a mutable reference to one column.
    pub fn get_mut(&mut self, field: ValueField) -> &mut Decimal {
        match field {
            ValueField::OpeningDebit => &mut self.opening_debit,
            ValueField::OpeningCredit => &mut self.opening_credit,
            ValueField::Debit => &mut self.debit,
            ValueField::Credit => &mut self.credit,
            ValueField::ClosingDebit => &mut self.closing_debit,
            ValueField::ClosingCredit => &mut self.closing_credit,
        }
    }

    /// Sets the closing columns to opening plus period movement.
    pub fn close(&mut self) {
        self.closing_debit = self.opening_debit + self.debit;
        self.closing_credit = self.opening_credit + self.credit;
    }

    /// Returns true if any column's magnitude reaches `cutoff`.
    #[must_use]
    pub fn has_value(&self, cutoff: Decimal) -> bool {
        ValueField::ALL
            .iter()
            .any(|field| self.get(*field).abs() >= cutoff)
    }

    /// Collapses the opening and closing pairs onto a single side.
    ///
    /// For each boundary, the other-side amount is subtracted from the
    /// natural-side amount of `root_type`. A negative result moves to the
    /// other side as a positive amount. Period debit/credit are untouched.
    pub fn apply_net(&mut self, root_type: RootType) {
        let natural = root_type.natural_side();
        for boundary in [Boundary::Opening, Boundary::Closing] {
            let natural_field = Self::field(boundary, natural);
            let other_field = Self::field(boundary, natural.opposite());

            let net = self.get(natural_field) - self.get(other_field);
            if net < Decimal::ZERO {
                *self.get_mut(other_field) = net.abs();
                *self.get_mut(natural_field) = Decimal::ZERO;
            } else {
                *self.get_mut(natural_field) = net;
                *self.get_mut(other_field) = Decimal::ZERO;
            }
        }
    }

    const fn field(boundary: Boundary, side: BalanceSide) -> ValueField {
        match (boundary, side) {
            (Boundary::Opening, BalanceSide::Debit) => ValueField::OpeningDebit,
            (Boundary::Opening, BalanceSide::Credit) => ValueField::OpeningCredit,
            (Boundary::Closing, BalanceSide::Debit) => ValueField::ClosingDebit,
            (Boundary::Closing, BalanceSide::Credit) => ValueField::ClosingCredit,
        }
    }
}

impl AddAssign<&BalanceRow> for BalanceRow {
    fn add_assign(&mut self, other: &BalanceRow) {
        for field in ValueField::ALL {
            *self.get_mut(field) += other.get(field);
        }
    }
}
