//! Period-closing vouchers.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A submitted voucher that closed the books up to `period_end_date` and
/// stored a per-account balance snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodClosingVoucher {
    /// Voucher identifier.
    pub name: String,
    /// Company whose books were closed.
    pub company: String,
    /// First day of the closed period.
    #[serde(default)]
    pub period_start_date: Option<NaiveDate>,
    /// Last day of the closed period.
    pub period_end_date: NaiveDate,
    /// Only submitted vouchers carry a usable snapshot.
    #[serde(default = "default_submitted")]
    pub is_submitted: bool,
}

fn default_submitted() -> bool {
    true
}

impl PeriodClosingVoucher {
    /// Returns the first unsnapshotted day when the snapshot stops short of
    /// the day before `from_date`.
    ///
    /// Entries from that day up to (excluding) `from_date` must be replayed
    /// on top of the snapshot.
    #[must_use]
    pub fn replay_start(&self, from_date: NaiveDate) -> Option<NaiveDate> {
        let day_before = from_date.checked_sub_days(Days::new(1))?;
        if self.period_end_date < day_before {
            self.period_end_date.checked_add_days(Days::new(1))
        } else {
            None
        }
    }
}
