//! Balance DTOs
//!
//! Responses for balance queries. Balances are derived on demand, never
//! persisted.

use credits_services::Balance;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Balance response for one credit line
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    /// Credit line identifier
    pub credit_id: Uuid,

    /// Type label
    #[serde(rename = "type")]
    pub credit_type: String,

    /// Credit limit
    pub credit_limit: Decimal,

    /// Used amount (limit minus available)
    pub used: Decimal,

    /// Available amount (payments total minus consumptions total)
    pub available: Decimal,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            credit_id: balance.credit_id,
            credit_type: balance.credit_type,
            credit_limit: balance.credit_limit,
            used: balance.used,
            available: balance.available,
        }
    }
}
