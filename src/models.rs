//! Data models for the budgeting backend's entities.
//!
//! This module contains strongly-typed representations of users,
//! purchases, deposits and goals, newtype ID wrappers, the fixed spending
//! [`Category`] set, and request/response bodies for the write endpoints.
//! Deserialization normalizes the backend's loosely typed JSON once, at
//! the boundary.

mod budget;
mod deposit;
mod enums;
mod goal;
mod ids;
mod lenient;
mod requests;
mod transaction;
mod user;

pub use budget::BudgetConfig;
pub use chrono::{NaiveDate, NaiveDateTime};
pub use deposit::Deposit;
pub use enums::Category;
pub use goal::Goal;
pub use ids::{DepositId, GoalId, TransactionId, UserId};
pub use requests::{
    BalanceUpdate, DepositDeletion, GoalAmountUpdate, GoalResponse, GoalsEnvelope,
    MessageResponse, NewDeposit, NewGoal, NewPurchase, PurchaseDeletion,
};
pub use transaction::Transaction;
pub use user::User;
