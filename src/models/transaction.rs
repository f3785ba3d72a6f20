//! Transaction (purchase) model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Category, GoalId, TransactionId, lenient};

/// A purchase or income record as stored by the backend.
///
/// Field names follow the backend's purchase records. Parsing is
/// permissive: an unreadable `purchaseCost` reads as `0.0`, an unreadable
/// `purchaseDate` reads as `None`, an unknown `purchaseCategory` reads as
/// [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend-assigned identifier. Absent on records not yet stored.
    #[serde(
        rename = "purchaseId",
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<TransactionId>,
    /// Free-text note (the record's display name).
    #[serde(rename = "name", default)]
    pub note: Option<String>,
    /// Signed amount: negative is an expense, zero or positive is income.
    #[serde(rename = "purchaseCost", default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    /// Spending category.
    #[serde(rename = "purchaseCategory", default)]
    pub category: Category,
    /// When the transaction happened, if the record carries a usable date.
    #[serde(
        rename = "purchaseDate",
        default,
        deserialize_with = "lenient::timestamp"
    )]
    pub occurred_at: Option<NaiveDateTime>,
    /// Goal this income was allocated to.
    #[serde(
        rename = "goalId",
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub goal_link: Option<GoalId>,
}

impl Transaction {
    /// Creates an unsaved transaction with no note and no goal link.
    #[inline]
    #[must_use]
    pub const fn new(amount: f64, category: Category, occurred_at: Option<NaiveDateTime>) -> Self {
        Self {
            id: None,
            note: None,
            amount,
            category,
            occurred_at,
            goal_link: None,
        }
    }

    /// Sets the backend identifier.
    #[inline]
    #[must_use]
    pub const fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Links the transaction to a goal.
    #[inline]
    #[must_use]
    pub const fn with_goal(mut self, goal: GoalId) -> Self {
        self.goal_link = Some(goal);
        self
    }

    /// Returns `true` for expenses (negative amounts).
    #[inline]
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Absolute spend of an expense; `0.0` for income.
    #[inline]
    #[must_use]
    pub fn spend(&self) -> f64 {
        if self.is_expense() { -self.amount } else { 0.0 }
    }

    /// Calendar date of the transaction, if known.
    #[inline]
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.occurred_at.map(|at| at.date())
    }
}
