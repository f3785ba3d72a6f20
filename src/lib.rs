//! Budget aggregation engine and typed client for a personal budgeting
//! backend.
//!
//! The crate is layered:
//!
//! - [`models`]: typed records for the backend's JSON (users, purchases,
//!   deposits, goals), normalized at the boundary.
//! - [`analytics`]: the pure aggregation engine (category totals, trailing
//!   monthly series, budget summary, pie geometry, goal progress).
//! - [`filter`]: transaction history filtering and ordering.
//! - `client` / `tracker`: HTTP access to the backend (behind the `async`
//!   and `blocking` features) and a high-level wrapper that feeds fetched
//!   records into the engine.
//!
//! # Example
//!
//! ```
//! use budgetkit::analytics::{ReportOptions, compute_aggregation_report};
//! use budgetkit::models::{BudgetConfig, NaiveDate, Transaction};
//!
//! let transactions: Vec<Transaction> = serde_json::from_str(
//!     r#"[{"purchaseCost": -42.0, "purchaseCategory": "Food", "purchaseDate": "2024-03-05"}]"#,
//! )
//! .unwrap();
//! let config = BudgetConfig {
//!     monthly_budget: 500.0,
//!     ..BudgetConfig::default()
//! };
//! let reference = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let report =
//!     compute_aggregation_report(&transactions, &config, reference, &ReportOptions::default())
//!         .unwrap();
//! assert!((report.remaining_budget - 458.0).abs() < 1e-9);
//! ```

extern crate alloc;

pub mod analytics;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
pub mod error;
pub mod filter;
pub mod models;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod tracker;
