//! Date ranges, prior-year shifting, and column breakdowns.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Granularity of a column breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    /// One column per day.
    Day,
    /// One column per calendar month.
    Month,
    /// One column per calendar quarter.
    Quarter,
    /// One column per calendar year.
    Year,
}

/// Subtracts exactly one calendar year.
///
/// Feb 29 maps to Feb 28 when the target year is not a leap year. Saturates at
/// the earliest representable date.
#[must_use]
pub fn shift_year(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN)
}

/// Shifts both boundaries of a range back one year, independently.
///
/// The shifted range may be one day shorter than the original when it
/// crosses Feb 29.
#[must_use]
pub fn comparative_range(from_date: NaiveDate, to_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (shift_year(from_date), shift_year(to_date))
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePeriod {
    /// First day of the range.
    pub from_date: NaiveDate,
    /// Last day of the range.
    pub to_date: NaiveDate,
}

impl DatePeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns an error if `from_date` is after `to_date`.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, PeriodError> {
        if from_date > to_date {
            return Err(PeriodError::InvalidDateRange {
                start: from_date,
                end: to_date,
            });
        }
        Ok(Self { from_date, to_date })
    }

    /// Returns the same range shifted back one year.
    #[must_use]
    pub fn previous_year(&self) -> Self {
        let (from_date, to_date) = comparative_range(self.from_date, self.to_date);
        Self { from_date, to_date }
    }

    /// Returns the last day covered by the opening balance, i.e. the day
    /// before the period starts.
    #[must_use]
    pub fn opening_balance_cutoff(&self) -> Option<NaiveDate> {
        self.from_date.pred_opt()
    }

    /// Returns true if the date falls within the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }

    /// Returns the number of days in the period, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }

    /// Splits the period into consecutive sub-periods of the given unit.
    ///
    /// The first and last sub-periods are clipped to the period.
    #[must_use]
    pub fn split(&self, unit: PeriodUnit) -> Vec<Self> {
        let mut periods = Vec::new();
        let mut start = self.from_date;

        loop {
            let end = unit_end(start, unit).min(self.to_date);
            periods.push(Self {
                from_date: start,
                to_date: end,
            });

            match end.succ_opt() {
                Some(next) if end < self.to_date => start = next,
                _ => break,
            }
        }

        periods
    }
}

/// Last day of the unit containing `date`.
fn unit_end(date: NaiveDate, unit: PeriodUnit) -> NaiveDate {
    match unit {
        PeriodUnit::Day => date,
        PeriodUnit::Month => month_end(date.year(), date.month()),
        PeriodUnit::Quarter => {
            let last_month = date.month0() / 3 * 3 + 3;
            month_end(date.year(), last_month)
        }
        PeriodUnit::Year => month_end(date.year(), 12),
    }
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
