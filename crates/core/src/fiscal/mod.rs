//! Fiscal period closing.

pub mod period;

pub use period::PeriodClosingVoucher;
