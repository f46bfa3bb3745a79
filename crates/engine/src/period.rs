//! Month buckets and month arithmetic.
//!
//! Months are zero-based (`0` = January, `11` = December), matching the
//! `month` field persisted on every entry.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::{EngineError, ResultEngine};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// A viewing bucket: one calendar month of one year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    month: u32,
    year: i32,
}

impl MonthYear {
    /// Builds a bucket from a zero-based month. The year must be one chrono
    /// can represent.
    pub fn new(month: u32, year: i32) -> ResultEngine<Self> {
        if month > 11 {
            return Err(EngineError::InvalidMonth(format!(
                "month must be in 0..=11, got {month}"
            )));
        }
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if !years.contains(&year) {
            return Err(EngineError::InvalidMonth(format!(
                "year must be in {}..={}, got {year}",
                years.start(),
                years.end()
            )));
        }
        Ok(Self { month, year })
    }

    /// Bucket containing the given date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    /// Bucket of the local current date.
    #[must_use]
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Portuguese month name, e.g. `Março`.
    #[must_use]
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    /// The preceding month, rolling back into December of the previous year.
    #[must_use]
    pub fn previous(self) -> Self {
        self.shift(-1)
    }

    /// The following month, rolling over into January of the next year.
    #[must_use]
    pub fn next(self) -> Self {
        self.shift(1)
    }

    /// Moves by `offset` months in either direction.
    #[must_use]
    pub fn shift(self, offset: i32) -> Self {
        // Years start inside chrono's range and an i32 offset moves at most
        // ~179M years, so the quotient always fits in i32.
        let index = i64::from(self.year) * 12 + i64::from(self.month) + i64::from(offset);
        Self {
            month: index.rem_euclid(12) as u32,
            year: index.div_euclid(12) as i32,
        }
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days(self) -> u32 {
        let next = self.next();
        match (
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1),
            NaiveDate::from_ymd_opt(next.year, next.month + 1, 1),
        ) {
            (Some(first), Some(following)) => (following - first).num_days() as u32,
            _ => 28,
        }
    }

    /// Moves `date` into this month, keeping its time of day.
    ///
    /// The day of month is kept when it exists here, otherwise it is clamped
    /// to the last day (31 January into February gives 28 or 29 February).
    pub fn move_date(self, date: DateTime<Utc>) -> ResultEngine<DateTime<Utc>> {
        let day = date.day().min(self.days());
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day)
            .map(|d| d.and_time(date.time()).and_utc())
            .ok_or_else(|| {
                EngineError::InvalidDate(format!(
                    "cannot move {date} into {}/{}",
                    self.month + 1,
                    self.year
                ))
            })
    }
}

impl core::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
