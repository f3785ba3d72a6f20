//! Calendar month arithmetic.

use chrono::{Datelike as _, NaiveDate};
use serde::ser::SerializeStruct as _;
use serde::{Serialize, Serializer};

use crate::error::{BudgetError, Result};

/// Three-letter month labels, January first.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month of a specific year.
///
/// Ordering is chronological. Serializes as `{"year": 2024, "month": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    /// Calendar year.
    year: i32,
    /// Month number, `1..=12`.
    month: u32,
}

impl YearMonth {
    /// Creates a month from its year and 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InvalidArgument`] if `month` is not in `1..=12`
    /// or `year` is outside the range [`NaiveDate`] can represent.
    #[inline]
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidArgument(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(BudgetError::InvalidArgument(format!(
                "year {year} is outside the supported calendar range"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, taken from the date's own fields.
    #[inline]
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[inline]
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, `1..=12`.
    #[inline]
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The month before this one, wrapping January into the prior December.
    #[inline]
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Three-letter English label (`"Jan"` .. `"Dec"`).
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        usize::try_from(self.month - 1)
            .ok()
            .and_then(|index| MONTH_LABELS.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Returns `true` if `date` falls in this month.
    #[inline]
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The `count` months ending at (and including) this one, oldest first.
    #[inline]
    #[must_use]
    pub fn trailing(self, count: usize) -> Vec<Self> {
        let mut months: Vec<Self> =
            core::iter::successors(Some(self), |month| Some(month.previous()))
                .take(count)
                .collect();
        months.reverse();
        months
    }
}

impl core::fmt::Display for YearMonth {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.label(), self.year)
    }
}

impl Serialize for YearMonth {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("YearMonth", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.end()
    }
}
