//! Savings goal progress.

use alloc::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Goal, GoalId, Transaction};

/// Progress of one goal, combined with the income allocated to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Goal identifier, if the backend assigned one.
    pub id: Option<GoalId>,
    /// Display title.
    pub title: String,
    /// Amount to reach.
    pub target_amount: f64,
    /// Amount saved so far, as stored on the goal.
    pub current_amount: f64,
    /// Sum of income records linked to this goal.
    pub linked_income: f64,
    /// `current_amount / target_amount`, unclamped.
    pub ratio: f64,
    /// `ratio * 100`.
    pub percentage: f64,
    /// Target date.
    pub target_date: Option<NaiveDateTime>,
}

/// Sums income (non-negative amounts) per linked goal.
#[inline]
#[must_use]
pub fn goal_contributions(transactions: &[Transaction]) -> BTreeMap<GoalId, f64> {
    let mut contributions = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| !tx.is_expense()) {
        if let Some(goal) = tx.goal_link {
            *contributions.entry(goal).or_insert(0.0_f64) += tx.amount;
        }
    }
    contributions
}

/// Computes progress for every goal, in input order.
#[inline]
#[must_use]
pub fn goal_progress(goals: &[Goal], transactions: &[Transaction]) -> Vec<GoalProgress> {
    let contributions = goal_contributions(transactions);
    goals
        .iter()
        .map(|goal| {
            let ratio = goal.progress_ratio();
            GoalProgress {
                id: goal.id,
                title: goal.title.clone(),
                target_amount: goal.target_amount,
                current_amount: goal.current_amount,
                linked_income: goal
                    .id
                    .and_then(|id| contributions.get(&id).copied())
                    .unwrap_or_default(),
                ratio,
                percentage: ratio * 100.0,
                target_date: goal.target_date,
            }
        })
        .collect()
}
