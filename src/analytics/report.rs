//! The aggregation report entry point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    BudgetSummary, CategoryTotals, MonthlyAmount, PieSegment, YearMonth, aggregate_categories,
    income_in_month, monthly_series, pie_segments,
};
use crate::error::Result;
use crate::models::{BudgetConfig, Transaction, TransactionId};

/// Default length of the trailing monthly series.
pub const DEFAULT_SERIES_WINDOW: usize = 4;

/// Tunables for [`compute_aggregation_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    /// Number of months in [`AggregationReport::monthly_series`].
    pub monthly_series_window: usize,
}

impl Default for ReportOptions {
    #[inline]
    fn default() -> Self {
        Self {
            monthly_series_window: DEFAULT_SERIES_WINDOW,
        }
    }
}

/// Everything the dashboard and analytics views display for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    /// Month containing the reference date.
    pub reference_month: YearMonth,
    /// Absolute spend in the reference month; equals the sum of
    /// [`Self::category_totals`].
    pub total_spent_this_month: f64,
    /// Monthly budget minus spend; negative when over budget.
    pub remaining_budget: f64,
    /// Spend per category in the reference month, all categories present.
    pub category_totals: CategoryTotals,
    /// Trailing spend series ending at the reference month, oldest first.
    pub monthly_series: Vec<MonthlyAmount>,
    /// Current balance as a percentage of the savings goal.
    pub savings_progress_pct: f64,
    /// Sum of non-negative amounts in the reference month.
    pub income_this_month: f64,
    /// Pie layout of the non-zero category totals.
    pub category_segments: Vec<PieSegment>,
    /// Records that carried no usable date and were left out.
    pub skipped_undated: usize,
}

/// Computes the aggregation report as of `reference_date`.
///
/// Pure: the same inputs always produce the same report.
///
/// # Errors
///
/// Returns [`crate::error::BudgetError::InvalidArgument`] if
/// `options.monthly_series_window` is zero or larger than
/// [`MAX_SERIES_WINDOW`](super::MAX_SERIES_WINDOW).
#[tracing::instrument(
    skip_all,
    fields(reference = %reference_date, window = options.monthly_series_window)
)]
#[inline]
pub fn compute_aggregation_report(
    transactions: &[Transaction],
    budget_config: &BudgetConfig,
    reference_date: NaiveDate,
    options: &ReportOptions,
) -> Result<AggregationReport> {
    let monthly_series = monthly_series(
        transactions,
        reference_date,
        options.monthly_series_window,
    )?;

    let skipped_undated = transactions
        .iter()
        .filter(|tx| tx.occurred_at.is_none())
        .inspect(|tx| {
            tracing::trace!(
                id = tx.id.map(TransactionId::into_inner),
                "skipping record without a usable date"
            );
        })
        .count();

    let reference_month = YearMonth::from_date(reference_date);
    let category_totals = aggregate_categories(transactions, reference_month);
    let summary = BudgetSummary::new(&category_totals, budget_config);
    let category_segments = pie_segments(
        category_totals
            .non_zero()
            .map(|(category, amount)| (category.label(), amount)),
    );

    tracing::debug!(
        month = %reference_month,
        spent = summary.total_spent,
        remaining = summary.remaining_budget,
        skipped = skipped_undated,
        "computed aggregation report"
    );

    Ok(AggregationReport {
        reference_month,
        total_spent_this_month: summary.total_spent,
        remaining_budget: summary.remaining_budget,
        category_totals,
        monthly_series,
        savings_progress_pct: summary.savings_progress_pct,
        income_this_month: income_in_month(transactions, reference_month),
        category_segments,
        skipped_undated,
    })
}
