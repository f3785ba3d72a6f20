//! Deposit model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{DepositId, lenient};

/// Money added to the user's balance outside of purchase records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// Backend-assigned identifier.
    #[serde(
        rename = "depositId",
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<DepositId>,
    /// Deposited amount.
    #[serde(rename = "depositAmount", default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    /// When the backend recorded the deposit.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_deposit() {
        let json = r#"{
            "depositId": 2,
            "depositAmount": "150.25",
            "timestamp": "2024-06-10T09:00:00.000001"
        }"#;
        let deposit: Deposit = serde_json::from_str(json).unwrap();
        assert_eq!(deposit.id, Some(DepositId::new(2)));
        assert!((deposit.amount - 150.25).abs() < f64::EPSILON);
        assert!(deposit.timestamp.is_some());
    }

    #[test]
    fn missing_amount_reads_zero() {
        let deposit: Deposit = serde_json::from_str(r#"{"depositId": 0}"#).unwrap();
        assert!((deposit.amount - 0.0).abs() < f64::EPSILON);
        assert!(deposit.timestamp.is_none());
    }
}
