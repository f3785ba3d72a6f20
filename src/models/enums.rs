//! Enumeration types for constrained values.

use core::convert::Infallible;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Spending classification of a transaction.
///
/// The set is fixed: every report carries a total for each variant. Labels
/// the backend sends that match none of the variants (including empty or
/// missing labels) land in [`Category::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Fuel, transit, ride share.
    Transport,
    /// Streaming, cinema, games.
    Entertainment,
    /// Rent, utilities, subscriptions.
    Bills,
    /// General retail.
    Shopping,
    /// Medical and pharmacy.
    Health,
    /// Courses, books, tuition.
    Education,
    /// Explicitly tagged income.
    Income,
    /// Anything else, including unrecognized labels.
    #[default]
    Other,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 9;

    /// Every category in canonical (display) order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Bills,
        Self::Shopping,
        Self::Health,
        Self::Education,
        Self::Income,
        Self::Other,
    ];

    /// Returns the label used by the backend and the UI.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }

    /// Parses a label, ignoring case and surrounding whitespace.
    ///
    /// Unrecognized labels map to [`Category::Other`].
    #[inline]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or(Self::Other)
    }

    /// Position of the category in [`Category::ALL`].
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Food => 0,
            Self::Transport => 1,
            Self::Entertainment => 2,
            Self::Bills => 3,
            Self::Shopping => 4,
            Self::Health => 5,
            Self::Education => 6,
            Self::Income => 7,
            Self::Other => 8,
        }
    }
}

impl core::fmt::Display for Category {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl<'de> Deserialize<'de> for Category {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::category(deserializer)
    }
}
