//! Per-user budget configuration.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Budget limits and savings figures from a user's profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    /// Current account balance.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub current_balance: f64,
    /// Spending limit for one calendar month.
    #[serde(
        rename = "totalMonthlyBudget",
        alias = "monthlyBudget",
        default,
        deserialize_with = "lenient::amount"
    )]
    pub monthly_budget: f64,
    /// Overall savings goal the balance is measured against.
    #[serde(rename = "savingsGoal", default, deserialize_with = "lenient::amount")]
    pub savings_goal_amount: f64,
    /// Amount the user intends to put aside each month.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub monthly_savings_target: f64,
}
