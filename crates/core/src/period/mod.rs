//! Reporting periods and their prior-year comparatives.

pub mod date_period;
pub mod error;

pub use date_period::{DatePeriod, PeriodUnit, comparative_range, shift_year};
pub use error::PeriodError;
