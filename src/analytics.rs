//! Budget aggregation engine.
//!
//! Everything here is a pure function of its inputs: transactions, a
//! [`BudgetConfig`](crate::models::BudgetConfig) and a caller-supplied
//! reference date. Nothing reads the clock or performs I/O.
//!
//! [`compute_aggregation_report`] combines the building blocks:
//!
//! - [`aggregate_categories`]: absolute spend per category for one month.
//! - [`monthly_series`]: trailing window of monthly spend, oldest first.
//! - [`BudgetSummary`]: remaining budget and savings progress.
//! - [`pie_segments`]: chart geometry for any labelled amounts.
//!
//! [`goal_progress`] covers the goals view.

mod categories;
mod goals;
mod period;
mod pie;
mod report;
mod series;
mod summary;

pub use categories::{CategoryTotals, aggregate_categories, income_in_month};
pub use goals::{GoalProgress, goal_contributions, goal_progress};
pub use period::YearMonth;
pub use pie::{PieSegment, START_ANGLE, pie_segments};
pub use report::{
    AggregationReport, DEFAULT_SERIES_WINDOW, ReportOptions, compute_aggregation_report,
};
pub use series::{MAX_SERIES_WINDOW, MonthlyAmount, monthly_series};
pub use summary::{BudgetSummary, savings_progress_pct};
