//! Remaining budget and savings progress.

use serde::Serialize;

use super::CategoryTotals;
use crate::models::BudgetConfig;

/// Headline figures for the reference month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Sum of the category totals.
    pub total_spent: f64,
    /// `monthly_budget - total_spent`; negative when over budget.
    pub remaining_budget: f64,
    /// Current balance as a percentage of the savings goal.
    pub savings_progress_pct: f64,
}

impl BudgetSummary {
    /// Derives the summary from a month's category totals.
    #[inline]
    #[must_use]
    pub fn new(totals: &CategoryTotals, config: &BudgetConfig) -> Self {
        let total_spent = totals.total();
        Self {
            total_spent,
            remaining_budget: config.monthly_budget - total_spent,
            savings_progress_pct: savings_progress_pct(
                config.current_balance,
                config.savings_goal_amount,
            ),
        }
    }

    /// Returns `true` when spending exceeded the monthly budget.
    #[inline]
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget < 0.0
    }
}

/// `current_balance / savings_goal * 100`, or `0.0` when the goal is not a
/// positive finite number. Not clamped or rounded.
#[inline]
#[must_use]
pub fn savings_progress_pct(current_balance: f64, savings_goal: f64) -> f64 {
    if savings_goal.is_finite() && savings_goal > 0.0 {
        current_balance / savings_goal * 100.0
    } else {
        0.0
    }
}
