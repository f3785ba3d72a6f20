//! User profile model.

use serde::{Deserialize, Serialize};

use super::{BudgetConfig, Deposit, Goal, Transaction, UserId, lenient};

/// A user record with its embedded purchases, deposits and goals.
///
/// The backend has stored the identifier under `user_id`, `userId` and
/// `id` at different times; deserialization accepts all three (first
/// present wins, in that order) and serialization writes `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    /// Normalized identifier.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Display name.
    pub full_name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Occupation, as entered at registration.
    pub occupation: Option<String>,
    /// Declared monthly income.
    pub monthly_income: f64,
    /// ISO currency code preferred for display.
    pub preferred_currency: Option<String>,
    /// Current account balance.
    pub current_balance: f64,
    /// Spending limit for one calendar month.
    #[serde(rename = "totalMonthlyBudget")]
    pub monthly_budget: f64,
    /// Overall savings goal.
    #[serde(rename = "savingsGoal")]
    pub savings_goal_amount: f64,
    /// Intended monthly savings.
    pub monthly_savings_target: f64,
    /// Purchase and income records.
    pub purchases: Vec<Transaction>,
    /// Deposit records.
    pub deposits: Vec<Deposit>,
    /// Financial goals.
    #[serde(rename = "financialGoals")]
    pub goals: Vec<Goal>,
}

impl User {
    /// Extracts the budget configuration used by the aggregation engine.
    #[inline]
    #[must_use]
    pub const fn budget_config(&self) -> BudgetConfig {
        BudgetConfig {
            current_balance: self.current_balance,
            monthly_budget: self.monthly_budget,
            savings_goal_amount: self.savings_goal_amount,
            monthly_savings_target: self.monthly_savings_target,
        }
    }
}

/// Raw wire shape of a user, before id normalization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    /// Identifier as written by the legacy data endpoint.
    #[serde(
        rename = "user_id",
        default,
        deserialize_with = "lenient::optional_id"
    )]
    snake_id: Option<UserId>,
    /// Identifier as written by the registration endpoint.
    #[serde(rename = "userId", default, deserialize_with = "lenient::optional_id")]
    camel_id: Option<UserId>,
    /// Identifier as used by older clients.
    #[serde(rename = "id", default, deserialize_with = "lenient::optional_id")]
    plain_id: Option<UserId>,
    /// Display name.
    #[serde(default)]
    full_name: Option<String>,
    /// Login email.
    #[serde(default)]
    email: Option<String>,
    /// Occupation.
    #[serde(default)]
    occupation: Option<String>,
    /// Declared monthly income.
    #[serde(default, deserialize_with = "lenient::amount")]
    monthly_income: f64,
    /// Preferred currency.
    #[serde(default)]
    preferred_currency: Option<String>,
    /// Budget figures, read with the same field names as [`BudgetConfig`].
    #[serde(flatten)]
    budget: BudgetConfig,
    /// Purchase and income records.
    #[serde(default)]
    purchases: Vec<Transaction>,
    /// Deposit records.
    #[serde(default)]
    deposits: Vec<Deposit>,
    /// Financial goals.
    #[serde(default)]
    financial_goals: Vec<Goal>,
}

impl From<UserRecord> for User {
    #[inline]
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.snake_id.or(record.camel_id).or(record.plain_id),
            full_name: record.full_name,
            email: record.email,
            occupation: record.occupation,
            monthly_income: record.monthly_income,
            preferred_currency: record.preferred_currency,
            current_balance: record.budget.current_balance,
            monthly_budget: record.budget.monthly_budget,
            savings_goal_amount: record.budget.savings_goal_amount,
            monthly_savings_target: record.budget.monthly_savings_target,
            purchases: record.purchases,
            deposits: record.deposits,
            goals: record.financial_goals,
        }
    }
}
