//! Financial goal model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{GoalId, lenient};

/// A savings goal the user is working towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Backend-assigned identifier.
    #[serde(
        rename = "goalId",
        alias = "id",
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<GoalId>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Amount to reach.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub target_amount: f64,
    /// Amount saved so far.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub current_amount: f64,
    /// Date by which the goal should be reached.
    #[serde(
        alias = "deadline",
        default,
        deserialize_with = "lenient::timestamp"
    )]
    pub target_date: Option<NaiveDateTime>,
    /// Free-form category label (not one of the spending categories).
    #[serde(default)]
    pub category: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion percentage as last computed by the backend.
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage_completed: Option<f64>,
}

impl Goal {
    /// Fraction of the target reached, `current / target`.
    ///
    /// Not clamped: an overfunded goal reports more than `1.0`. A
    /// non-positive target reports `0.0`.
    #[inline]
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount
        } else {
            0.0
        }
    }

    /// [`Self::progress_ratio`] expressed as a percentage.
    #[inline]
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        self.progress_ratio() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: f64, target: f64) -> Goal {
        Goal {
            id: Some(GoalId::new(0)),
            title: "Emergency Fund".to_owned(),
            target_amount: target,
            current_amount: current,
            target_date: None,
            category: Some("Savings".to_owned()),
            description: None,
            percentage_completed: None,
        }
    }

    #[test]
    fn deserialize_backend_goal() {
        let json = r#"{
            "goalId": 1,
            "title": "New Car",
            "targetAmount": 20000,
            "currentAmount": "5000",
            "deadline": "2026-01-01",
            "description": "Down payment",
            "percentageCompleted": 25
        }"#;
        let parsed: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, Some(GoalId::new(1)));
        assert!((parsed.current_amount - 5000.0).abs() < f64::EPSILON);
        assert!(parsed.target_date.is_some());
        assert_eq!(parsed.percentage_completed, Some(25.0));
    }

    #[test]
    fn accepts_client_side_id_field() {
        let parsed: Goal = serde_json::from_str(r#"{"id": 3, "title": "Vacation"}"#).unwrap();
        assert_eq!(parsed.id, Some(GoalId::new(3)));
    }

    #[test]
    fn progress_is_not_clamped() {
        assert!((goal(5000.0, 10_000.0).progress_ratio() - 0.5).abs() < 1e-12);
        assert!((goal(15_000.0, 10_000.0).progress_pct() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_target_reports_zero() {
        assert!((goal(100.0, 0.0).progress_ratio() - 0.0).abs() < f64::EPSILON);
        assert!((goal(100.0, -5.0).progress_pct() - 0.0).abs() < f64::EPSILON);
    }
}
