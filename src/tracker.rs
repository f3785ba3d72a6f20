//! High-level budget tracker.
//!
//! Wraps the low-level HTTP client: fetches a user's records and feeds them
//! to the [`analytics`](crate::analytics) engine, and performs the
//! multi-step writes the app issues when recording income.

use crate::models::{Category, Goal, GoalId, NaiveDateTime, NewPurchase, UserId};

/// Step name of the purchase write.
const STEP_PURCHASE: &str = "record purchase";
/// Step name of the goal allocation.
const STEP_GOAL: &str = "update goal";
/// Step name of the balance update.
const STEP_BALANCE: &str = "update balance";
/// Steps completed before the balance update when a goal was updated too.
const STEP_PURCHASE_AND_GOAL: &str = "record purchase, update goal";

/// An expense to record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    /// Amount spent; the sign is ignored.
    pub amount: f64,
    /// Spending category.
    pub category: Category,
    /// Optional note, stored as the record's name.
    pub note: Option<String>,
    /// When the expense happened.
    pub occurred_at: NaiveDateTime,
}

impl ExpenseEntry {
    /// Creates an expense without a note.
    #[inline]
    #[must_use]
    pub const fn new(amount: f64, category: Category, occurred_at: NaiveDateTime) -> Self {
        Self {
            amount,
            category,
            note: None,
            occurred_at,
        }
    }

    /// Sets the note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Request body for the purchase endpoint.
    fn to_purchase(&self) -> NewPurchase {
        NewPurchase::expense(self.note.clone(), self.category, self.amount, self.occurred_at)
    }
}

/// Income to record, optionally allocated to a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeEntry {
    /// Amount received; the sign is ignored.
    pub amount: f64,
    /// Optional note, stored as the record's name.
    pub note: Option<String>,
    /// When the income arrived.
    pub occurred_at: NaiveDateTime,
    /// Goal the amount is added to.
    pub goal: Option<GoalId>,
}

impl IncomeEntry {
    /// Creates an income entry without a note or goal.
    #[inline]
    #[must_use]
    pub const fn new(amount: f64, occurred_at: NaiveDateTime) -> Self {
        Self {
            amount,
            note: None,
            occurred_at,
            goal: None,
        }
    }

    /// Sets the note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Allocates the income to a goal.
    #[inline]
    #[must_use]
    pub const fn with_goal(mut self, goal: GoalId) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Request body for the purchase endpoint.
    fn to_purchase(&self) -> NewPurchase {
        NewPurchase::income(self.note.clone(), self.amount, self.occurred_at, self.goal)
    }
}

/// Outcome of [`BudgetTracker::record_income`] (or its blocking
/// counterpart) when every step succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeReceipt {
    /// User the income was recorded for.
    pub user_id: UserId,
    /// Balance written in the final step.
    pub new_balance: f64,
    /// Goal as stored after the allocation, if one was linked.
    pub goal: Option<Goal>,
}

/// Generates a high-level tracker (async or blocking) around the matching
/// client.
macro_rules! define_tracker {
    (
        tracker_name: $tracker:ident,
        builder_name: $builder:ident,
        http_client: $http_client:ty,
        tracker_doc: $tracker_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
            /// Per-request timeout.
            timeout: Option<Duration>,
        }

        impl $builder {
            /// Overrides the base URL (for a remote backend or a mock server).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Sets a timeout applied to every request.
            #[inline]
            #[must_use]
            pub const fn timeout(mut self, timeout: Duration) -> Self {
                self.timeout = Some(timeout);
                self
            }

            /// Builds the tracker.
            ///
            /// # Errors
            ///
            /// Returns an error if the underlying client cannot be built.
            #[inline]
            pub fn build(self) -> Result<$tracker> {
                let mut http_builder = <$http_client>::builder();
                if let Some(url) = self.base_url {
                    http_builder = http_builder.base_url(url);
                }
                if let Some(timeout) = self.timeout {
                    http_builder = http_builder.timeout(timeout);
                }
                let client = http_builder.build()?;
                Ok($tracker { client })
            }
        }

        #[doc = $tracker_doc]
        #[derive(Debug)]
        pub struct $tracker {
            /// Low-level HTTP client.
            client: $http_client,
        }

        impl $tracker {
            /// Creates a new builder for configuring the tracker.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    base_url: None,
                    timeout: None,
                }
            }

            /// Wraps an already configured client.
            #[inline]
            #[must_use]
            pub const fn from_client(client: $http_client) -> Self {
                Self { client }
            }

            /// Fetches a user and computes their aggregation report as of
            /// `reference`.
            ///
            /// # Errors
            ///
            /// Returns an error if the fetch fails or `options` is invalid.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn report_for_user(
                &self,
                user_id: UserId,
                reference: NaiveDate,
                options: &ReportOptions,
            ) -> Result<AggregationReport> {
                let user = self.client.user(user_id) $( .$await_ext )? ?;
                Self::report(&user, reference, options)
            }

            /// Same as [`Self::report_for_user`], looking the user up by email.
            ///
            /// # Errors
            ///
            /// Returns an error if the fetch fails or `options` is invalid.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn report_for_email(
                &self,
                email: &str,
                reference: NaiveDate,
                options: &ReportOptions,
            ) -> Result<AggregationReport> {
                let user = self.client.user_by_email(email) $( .$await_ext )? ?;
                Self::report(&user, reference, options)
            }

            /// Fetches goals and purchases and computes progress per goal.
            ///
            /// # Errors
            ///
            /// Returns an error if either fetch fails.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn goal_progress(
                &self,
                user_id: UserId,
            ) -> Result<Vec<GoalProgress>> {
                let goals = self.client.goals(user_id) $( .$await_ext )? ?;
                let purchases = self.client.purchases(user_id) $( .$await_ext )? ?;
                Ok(goal_progress(&goals, &purchases))
            }

            /// Fetches purchases matching `filter`, most recent first.
            ///
            /// # Errors
            ///
            /// Returns an error if the fetch fails.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn history(
                &self,
                user_id: UserId,
                filter: &TransactionFilter,
            ) -> Result<Vec<Transaction>> {
                let purchases = self.client.purchases(user_id) $( .$await_ext )? ?;
                Ok(newest_first(filter.apply(&purchases)))
            }

            /// Records an expense as a negative-cost purchase.
            ///
            /// # Errors
            ///
            /// Returns an error if the backend rejects the record.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn record_expense(
                &self,
                user_id: UserId,
                entry: &ExpenseEntry,
            ) -> Result<MessageResponse> {
                tracing::debug!(category = %entry.category, "recording expense");
                self.client
                    .record_purchase(user_id, &entry.to_purchase())
                    $( .$await_ext )?
            }

            /// Records income for the user with this email.
            ///
            /// Issues up to three sequential writes: the purchase record,
            /// the goal allocation (if [`IncomeEntry::goal`] is set), and
            /// the balance update. The balance written is the balance read
            /// before the writes plus the income.
            ///
            /// # Errors
            ///
            /// Fails as is if the user lookup or the purchase write fails.
            /// Fails with [`BudgetError::PartialWrite`] if a later step
            /// fails, naming the steps that already took effect.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn record_income(
                &self,
                email: &str,
                entry: &IncomeEntry,
            ) -> Result<IncomeReceipt> {
                let user = self.client.user_by_email(email) $( .$await_ext )? ?;
                let user_id = user.id.ok_or_else(|| {
                    BudgetError::InvalidArgument(format!("user {email} has no id"))
                })?;
                let amount = entry.amount.abs();

                let recorded = self
                    .client
                    .record_purchase(user_id, &entry.to_purchase())
                    $( .$await_ext )?
                    ?;
                tracing::debug!(
                    user_id = %user_id,
                    message = ?recorded.message,
                    "income purchase recorded"
                );

                let goal = match entry.goal {
                    Some(goal_id) => Some(
                        self.client
                            .add_to_goal(user_id, goal_id, amount)
                            $( .$await_ext )?
                            .map_err(|source| BudgetError::PartialWrite {
                                completed: STEP_PURCHASE,
                                failed: STEP_GOAL,
                                source: Box::new(source),
                            })?,
                    ),
                    None => None,
                };

                let new_balance = user.current_balance + amount;
                let completed = if goal.is_some() {
                    STEP_PURCHASE_AND_GOAL
                } else {
                    STEP_PURCHASE
                };
                let updated = self
                    .client
                    .update_balance(email, new_balance)
                    $( .$await_ext )?
                    .map_err(|source| BudgetError::PartialWrite {
                        completed,
                        failed: STEP_BALANCE,
                        source: Box::new(source),
                    })?;
                tracing::debug!(
                    user_id = %user_id,
                    new_balance,
                    message = ?updated.message,
                    "income recorded"
                );

                Ok(IncomeReceipt {
                    user_id,
                    new_balance,
                    goal,
                })
            }

            /// Deletes a purchase record.
            ///
            /// # Errors
            ///
            /// Returns an error if the backend rejects the deletion.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id, purchase_id = %purchase_id))]
            pub $($async_kw)? fn delete_purchase(
                &self,
                user_id: UserId,
                purchase_id: TransactionId,
            ) -> Result<MessageResponse> {
                self.client.delete_purchase(user_id, purchase_id) $( .$await_ext )?
            }

            /// Returns a reference to the underlying HTTP client.
            #[inline]
            #[must_use]
            pub const fn client(&self) -> &$http_client {
                &self.client
            }

            /// Runs the engine on a fetched user record.
            fn report(
                user: &User,
                reference: NaiveDate,
                options: &ReportOptions,
            ) -> Result<AggregationReport> {
                compute_aggregation_report(
                    &user.purchases,
                    &user.budget_config(),
                    reference,
                    options,
                )
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_tracker {
    //! Async high-level tracker.

    use core::time::Duration;

    use super::{
        ExpenseEntry, IncomeEntry, IncomeReceipt, STEP_BALANCE, STEP_GOAL, STEP_PURCHASE,
        STEP_PURCHASE_AND_GOAL,
    };
    use crate::analytics::{
        AggregationReport, GoalProgress, ReportOptions, compute_aggregation_report, goal_progress,
    };
    use crate::client::BudgetClient;
    use crate::error::{BudgetError, Result};
    use crate::filter::{TransactionFilter, newest_first};
    use crate::models::{MessageResponse, NaiveDate, Transaction, TransactionId, User, UserId};

    define_tracker! {
        tracker_name: BudgetTracker,
        builder_name: BudgetTrackerBuilder,
        http_client: BudgetClient,
        tracker_doc: "High-level async budget tracker.\n\nUse [`BudgetTracker::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BudgetTracker`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_tracker {
    //! Blocking high-level tracker.

    use core::time::Duration;

    use super::{
        ExpenseEntry, IncomeEntry, IncomeReceipt, STEP_BALANCE, STEP_GOAL, STEP_PURCHASE,
        STEP_PURCHASE_AND_GOAL,
    };
    use crate::analytics::{
        AggregationReport, GoalProgress, ReportOptions, compute_aggregation_report, goal_progress,
    };
    use crate::client::BudgetBlockingClient;
    use crate::error::{BudgetError, Result};
    use crate::filter::{TransactionFilter, newest_first};
    use crate::models::{MessageResponse, NaiveDate, Transaction, TransactionId, User, UserId};

    define_tracker! {
        tracker_name: BudgetTrackerBlocking,
        builder_name: BudgetTrackerBlockingBuilder,
        http_client: BudgetBlockingClient,
        tracker_doc: "High-level blocking budget tracker.\n\nUse [`BudgetTrackerBlocking::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BudgetTrackerBlocking`].",
    }
}

#[cfg(feature = "async")]
pub use async_tracker::{BudgetTracker, BudgetTrackerBuilder};
#[cfg(feature = "blocking")]
pub use blocking_tracker::{BudgetTrackerBlocking, BudgetTrackerBlockingBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn expense_entry_builds_negative_purchase() {
        let entry = ExpenseEntry::new(42.0, Category::Transport, at()).with_note("Taxi");
        let purchase = entry.to_purchase();
        assert!((purchase.purchase_cost + 42.0).abs() < f64::EPSILON);
        assert_eq!(purchase.purchase_category, "Transport");
        assert_eq!(purchase.name, "Taxi");
    }

    #[test]
    fn income_entry_builds_positive_purchase_with_goal() {
        let entry = IncomeEntry::new(-250.0, at()).with_goal(GoalId::new(2));
        let purchase = entry.to_purchase();
        assert!((purchase.purchase_cost - 250.0).abs() < f64::EPSILON);
        assert_eq!(purchase.purchase_category, "");
        assert_eq!(purchase.goal_id, Some(GoalId::new(2)));
        assert_eq!(purchase.name, NewPurchase::DEFAULT_NAME);
    }

    #[cfg(feature = "async")]
    #[test]
    fn async_builder_accepts_custom_url() {
        let tracker = BudgetTracker::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        assert_eq!(tracker.client().base_url().port(), Some(9));
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn blocking_builder_rejects_bad_url() {
        let result = BudgetTrackerBlocking::builder().base_url("::").build();
        assert!(result.is_err());
    }
}
