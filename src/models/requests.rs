//! Request and response bodies for the backend's write endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Category, DepositId, Goal, GoalId, TransactionId};

/// Body of `PATCH /api/data/purchase/{user_id}`.
///
/// Uses the same sign convention as [`super::Transaction`]: expenses carry
/// a negative `purchaseCost`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    /// Display name of the record.
    pub name: String,
    /// Category label; empty for income.
    pub purchase_category: String,
    /// Signed amount.
    pub purchase_cost: f64,
    /// When the transaction happened.
    pub purchase_date: NaiveDateTime,
    /// Goal an income is allocated to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
}

impl NewPurchase {
    /// Default display name when the user gave no note.
    pub const DEFAULT_NAME: &'static str = "Transaction";

    /// Builds an expense record. The sign of `amount` is ignored.
    #[inline]
    #[must_use]
    pub fn expense(
        note: Option<String>,
        category: Category,
        amount: f64,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            name: note.unwrap_or_else(|| Self::DEFAULT_NAME.to_owned()),
            purchase_category: category.label().to_owned(),
            purchase_cost: -amount.abs(),
            purchase_date: at,
            goal_id: None,
        }
    }

    /// Builds an income record, optionally allocated to a goal. The sign
    /// of `amount` is ignored.
    #[inline]
    #[must_use]
    pub fn income(
        note: Option<String>,
        amount: f64,
        at: NaiveDateTime,
        goal: Option<GoalId>,
    ) -> Self {
        Self {
            name: note.unwrap_or_else(|| Self::DEFAULT_NAME.to_owned()),
            purchase_category: String::new(),
            purchase_cost: amount.abs(),
            purchase_date: at,
            goal_id: goal,
        }
    }
}

/// Body of `DELETE /api/data/purchase/{user_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDeletion {
    /// Record to delete.
    pub purchase_id: TransactionId,
}

/// Body of `DELETE /api/data/deposit/{user_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositDeletion {
    /// Deposit to delete.
    pub deposit_id: DepositId,
}

/// Body of `PATCH /api/data/deposit/{user_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeposit {
    /// Amount to add to the balance; the backend rejects negatives.
    pub deposit_amount: f64,
}

/// Body of `PATCH /users/{user_id}/goals/{goal_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAmountUpdate {
    /// Amount added to the goal's current amount.
    pub amount_to_add: f64,
}

/// Body of `PATCH /users/email/{email}` when only the balance changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    /// New absolute balance.
    pub current_balance: f64,
}

/// Body of `POST /users/{user_id}/goals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    /// Display title.
    pub title: String,
    /// Amount to reach.
    pub target_amount: f64,
    /// Amount already saved.
    pub current_amount: f64,
    /// Target date.
    pub target_date: NaiveDate,
    /// Free-form category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generic acknowledgement returned by most write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Success message.
    #[serde(default)]
    pub message: Option<String>,
    /// Error description, on endpoints that report failures in the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the goal write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResponse {
    /// Success message.
    #[serde(default)]
    pub message: Option<String>,
    /// Goal as stored after the write.
    pub goal: Goal,
}

/// Envelope of `GET /users/{user_id}/goals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsEnvelope {
    /// The user's goals.
    #[serde(default)]
    pub goals: Vec<Goal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn expense_is_negative_with_label() {
        let purchase = NewPurchase::expense(None, Category::Food, 85.5, at());
        let json = serde_json::to_value(&purchase).unwrap();
        assert_eq!(json["name"], "Transaction");
        assert_eq!(json["purchaseCategory"], "Food");
        assert_eq!(json["purchaseCost"], -85.5);
        assert_eq!(json["purchaseDate"], "2024-03-05T12:00:00");
        assert!(json.get("goalId").is_none());
    }

    #[test]
    fn income_is_positive_with_goal() {
        let note = Some("Salary".to_owned());
        let purchase = NewPurchase::income(note, -3000.0, at(), Some(GoalId::new(1)));
        let json = serde_json::to_value(&purchase).unwrap();
        assert_eq!(json["purchaseCategory"], "");
        assert_eq!(json["purchaseCost"], 3000.0);
        assert_eq!(json["goalId"], 1);
    }

    #[test]
    fn small_bodies_use_backend_field_names() {
        let deletion = PurchaseDeletion {
            purchase_id: TransactionId::new(3),
        };
        let update = GoalAmountUpdate {
            amount_to_add: 50.0,
        };
        let balance = BalanceUpdate {
            current_balance: 10.5,
        };
        let deletion = serde_json::to_string(&deletion).unwrap();
        assert_eq!(deletion, r#"{"purchaseId":3}"#);
        let update = serde_json::to_string(&update).unwrap();
        assert_eq!(update, r#"{"amountToAdd":50.0}"#);
        let balance = serde_json::to_string(&balance).unwrap();
        assert_eq!(balance, r#"{"currentBalance":10.5}"#);
    }

    #[test]
    fn goals_envelope_tolerates_missing_list() {
        let envelope: GoalsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.goals.is_empty());
    }

    #[test]
    fn goal_response_reads_nested_goal() {
        let json = r#"{
            "message": "Goal updated successfully",
            "goal": {"goalId": 1, "title": "Car", "targetAmount": 100, "currentAmount": 60}
        }"#;
        let response: GoalResponse = serde_json::from_str(json).unwrap();
        assert!((response.goal.progress_ratio() - 0.6).abs() < 1e-12);
    }
}
