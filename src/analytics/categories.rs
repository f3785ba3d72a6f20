//! Per-category spend for a single month.

use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};

use super::YearMonth;
use crate::models::{Category, Transaction};

/// Absolute spend per [`Category`], always carrying every category.
///
/// Serializes as a JSON object keyed by category label in
/// [`Category::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals([f64; Category::COUNT]);

impl CategoryTotals {
    /// Spend recorded for `category`.
    #[inline]
    #[must_use]
    pub fn get(&self, category: Category) -> f64 {
        self.0.get(category.index()).copied().unwrap_or_default()
    }

    /// Adds `amount` to the total of `category`.
    #[inline]
    pub fn add(&mut self, category: Category, amount: f64) {
        if let Some(slot) = self.0.get_mut(category.index()) {
            *slot += amount;
        }
    }

    /// Every category with its total, in [`Category::ALL`] order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Categories with a non-zero total, in [`Category::ALL`] order.
    #[inline]
    pub fn non_zero(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.iter().filter(|&(_, amount)| amount > 0.0_f64)
    }

    /// Sum over all categories, added in [`Category::ALL`] order.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Serialize for CategoryTotals {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(category.label(), &amount)?;
        }
        map.end()
    }
}

/// Sums the absolute value of every expense dated in `month`, per category.
///
/// Income is excluded. Records without a usable date are skipped.
#[inline]
#[must_use]
pub fn aggregate_categories(transactions: &[Transaction], month: YearMonth) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions {
        if tx.is_expense() && tx.date().is_some_and(|date| month.contains(date)) {
            totals.add(tx.category, tx.spend());
        }
    }
    totals
}

/// Sums non-negative amounts dated in `month`.
#[inline]
#[must_use]
pub fn income_in_month(transactions: &[Transaction], month: YearMonth) -> f64 {
    transactions
        .iter()
        .filter(|tx| !tx.is_expense() && tx.date().is_some_and(|date| month.contains(date)))
        .map(|tx| tx.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn tx(amount: f64, category: Category, date: &str) -> Transaction {
        let at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Transaction::new(amount, category, Some(at))
    }

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn empty_input_has_all_categories_at_zero() {
        let totals = aggregate_categories(&[], march());
        assert_eq!(totals.iter().count(), Category::COUNT);
        assert!(totals.iter().all(|(_, amount)| amount.abs() < 1e-12));
        assert_eq!(totals.non_zero().count(), 0);
    }

    #[test]
    fn sums_expenses_only_within_month() {
        let transactions = vec![
            tx(-85.5, Category::Food, "2024-03-05"),
            tx(-10.0, Category::Food, "2024-03-20"),
            tx(3000.0, Category::Income, "2024-03-01"),
            tx(-15.99, Category::Entertainment, "2024-03-10"),
            tx(-99.0, Category::Food, "2024-02-29"),
            tx(-7.0, Category::Food, "2023-03-05"),
        ];
        let totals = aggregate_categories(&transactions, march());
        assert!((totals.get(Category::Food) - 95.5).abs() < 1e-9);
        assert!((totals.get(Category::Entertainment) - 15.99).abs() < 1e-9);
        assert!((totals.get(Category::Income) - 0.0).abs() < f64::EPSILON);
        assert!((totals.total() - 111.49).abs() < 1e-9);
    }

    #[test]
    fn undated_records_are_skipped() {
        let transactions = vec![
            Transaction::new(-40.0, Category::Bills, None),
            tx(-5.0, Category::Bills, "2024-03-02"),
        ];
        let totals = aggregate_categories(&transactions, march());
        assert!((totals.get(Category::Bills) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_amount_contributes_nothing() {
        let totals = aggregate_categories(&[tx(0.0, Category::Health, "2024-03-02")], march());
        assert!((totals.get(Category::Health) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn income_counts_non_negative_amounts() {
        let transactions = vec![
            tx(3000.0, Category::Income, "2024-03-01"),
            tx(0.0, Category::Other, "2024-03-02"),
            tx(-20.0, Category::Food, "2024-03-02"),
            tx(500.0, Category::Other, "2024-04-01"),
        ];
        assert!((income_in_month(&transactions, march()) - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_every_label() {
        let mut totals = CategoryTotals::default();
        totals.add(Category::Shopping, 12.5);
        let json = serde_json::to_value(totals).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), Category::COUNT);
        assert_eq!(object["Shopping"], 12.5);
        assert_eq!(object["Other"], 0.0);
    }
}
