//! Transaction history filtering and ordering.

use core::cmp::Reverse;

use crate::models::{Category, GoalId, NaiveDate, Transaction};

/// Which side of the ledger a filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Negative amounts.
    Expense,
    /// Zero or positive amounts.
    Income,
}

/// Composable filter over a user's transaction history.
///
/// Use builder-style methods to chain criteria. A transaction must satisfy
/// every criterion that is set.
///
/// # Examples
///
/// ```
/// use budgetkit::filter::TransactionFilter;
/// use budgetkit::models::{Category, NaiveDate};
///
/// let filter = TransactionFilter::new()
///     .date_range(
///         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     )
///     .category(Category::Food)
///     .note("coffee");
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Start date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// End date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Spending category.
    pub category: Option<Category>,
    /// Linked goal.
    pub goal: Option<GoalId>,
    /// Note substring (case-insensitive).
    pub note: Option<String>,
    /// Minimum absolute amount.
    pub min_amount: Option<f64>,
    /// Maximum absolute amount.
    pub max_amount: Option<f64>,
    /// Expenses or income only.
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to transactions within the given date range (inclusive).
    ///
    /// Undated transactions never match a date bound.
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Restricts to transactions on or after `from`.
    #[inline]
    #[must_use]
    pub const fn since(mut self, from: NaiveDate) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Restricts to transactions on or before `to`.
    #[inline]
    #[must_use]
    pub const fn until(mut self, to: NaiveDate) -> Self {
        self.date_to = Some(to);
        self
    }

    /// Restricts to transactions in the given category.
    #[inline]
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to transactions linked to the given goal.
    #[inline]
    #[must_use]
    pub const fn goal(mut self, goal: GoalId) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Restricts to transactions whose note contains the given substring
    /// (case-insensitive).
    #[inline]
    #[must_use]
    pub fn note<T: Into<String>>(mut self, text: T) -> Self {
        self.note = Some(text.into());
        self
    }

    /// Restricts to transactions whose absolute amount lies in `[min, max]`.
    #[inline]
    #[must_use]
    pub const fn amount_range(mut self, min: f64, max: f64) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    /// Keeps expenses only.
    #[inline]
    #[must_use]
    pub const fn expenses_only(mut self) -> Self {
        self.kind = Some(TransactionKind::Expense);
        self
    }

    /// Keeps income only.
    #[inline]
    #[must_use]
    pub const fn income_only(mut self) -> Self {
        self.kind = Some(TransactionKind::Income);
        self
    }

    /// Returns `true` if the transaction satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_date(tx)
            && self.category.is_none_or(|category| tx.category == category)
            && self.goal.is_none_or(|goal| tx.goal_link == Some(goal))
            && self.matches_note(tx)
            && self.matches_amount(tx)
            && self.matches_kind(tx)
    }

    /// Returns the matching transactions, in input order.
    #[inline]
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }

    /// Checks date range criteria.
    fn matches_date(&self, tx: &Transaction) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        tx.date().is_some_and(|date| {
            self.date_from.is_none_or(|from| date >= from)
                && self.date_to.is_none_or(|to| date <= to)
        })
    }

    /// Checks note criteria.
    fn matches_note(&self, tx: &Transaction) -> bool {
        self.note.as_ref().is_none_or(|needle| {
            let needle_lower = needle.to_lowercase();
            tx.note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(&needle_lower))
        })
    }

    /// Checks amount criteria against the absolute amount.
    fn matches_amount(&self, tx: &Transaction) -> bool {
        let magnitude = tx.amount.abs();
        self.min_amount.is_none_or(|min| magnitude >= min)
            && self.max_amount.is_none_or(|max| magnitude <= max)
    }

    /// Checks expense/income criteria.
    fn matches_kind(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|kind| match kind {
            TransactionKind::Expense => tx.is_expense(),
            TransactionKind::Income => !tx.is_expense(),
        })
    }
}

/// Orders transactions by date, most recent first. Undated records go last;
/// ties keep their input order.
#[inline]
#[must_use]
pub fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by_key(|tx| (tx.occurred_at.is_none(), Reverse(tx.occurred_at)));
    transactions
}
