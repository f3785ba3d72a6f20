//! Trailing monthly spend series.

use chrono::NaiveDate;
use serde::Serialize;

use super::YearMonth;
use crate::error::{BudgetError, Result};
use crate::models::Transaction;

/// Largest accepted series window, one hundred years of months.
pub const MAX_SERIES_WINDOW: usize = 1200;

/// Expense total of one month in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAmount {
    /// The month the amount belongs to.
    pub month: YearMonth,
    /// Three-letter month label.
    pub label: &'static str,
    /// Sum of absolute expense amounts dated in the month.
    pub amount: f64,
}

/// Builds the expense series for the `window` months ending at the month of
/// `reference`, oldest first.
///
/// Months are matched on both year and month, so a window spanning New
/// Year keeps December and January apart.
///
/// # Errors
///
/// Returns [`BudgetError::InvalidArgument`] if `window` is zero or larger
/// than [`MAX_SERIES_WINDOW`].
#[inline]
pub fn monthly_series(
    transactions: &[Transaction],
    reference: NaiveDate,
    window: usize,
) -> Result<Vec<MonthlyAmount>> {
    if window == 0 {
        return Err(BudgetError::InvalidArgument(
            "monthly series window must be at least 1".to_owned(),
        ));
    }
    if window > MAX_SERIES_WINDOW {
        return Err(BudgetError::InvalidArgument(format!(
            "monthly series window must be at most {MAX_SERIES_WINDOW}, got {window}"
        )));
    }

    let months = YearMonth::from_date(reference).trailing(window);
    let mut amounts = vec![0.0_f64; months.len()];
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let Some(date) = tx.date() else {
            continue;
        };
        let bucket = YearMonth::from_date(date);
        if let Some(slot) = months
            .iter()
            .position(|month| *month == bucket)
            .and_then(|index| amounts.get_mut(index))
        {
            *slot += tx.spend();
        }
    }

    Ok(months
        .into_iter()
        .zip(amounts)
        .map(|(month, amount)| MonthlyAmount {
            month,
            label: month.label(),
            amount,
        })
        .collect())
}
