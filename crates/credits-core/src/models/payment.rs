//! Payment model
//!
//! A reduction of outstanding debt on a credit line. Payments increase the
//! available balance and are append-only. Unlike consumptions, payments are
//! accepted without a sign or limit check.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier (assigned by the database on insert)
    pub id: Uuid,

    /// Owning credit line identifier
    pub credit_id: Uuid,

    /// Paid amount
    pub amount: Decimal,

    /// Creation timestamp, server-assigned at payment time
    pub created_date: DateTime<Utc>,
}

impl Payment {
    /// Build a payment for a credit line, stamped with the current time.
    /// The id is assigned by the persistence gateway on insert.
    pub fn new(credit_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::nil(),
            credit_id,
            amount,
            created_date: Utc::now(),
        }
    }
}
