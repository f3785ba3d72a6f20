//! Newtype wrappers for entity identifiers.
//!
//! The backend numbers users, purchases, deposits and goals with plain
//! integers; the wrappers keep them from being mixed up at compile time.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping an `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Identifier of a user (`user_id` / `userId` on the wire).
    UserId
}

define_id! {
    /// Identifier of a purchase or income record (`purchaseId`).
    TransactionId
}

define_id! {
    /// Identifier of a deposit record (`depositId`).
    DepositId
}

define_id! {
    /// Identifier of a financial goal (`goalId`).
    GoalId
}
