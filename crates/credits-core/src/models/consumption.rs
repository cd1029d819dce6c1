//! Consumption model
//!
//! A charge against a credit line. Consumptions decrease the available
//! balance and are append-only: they are never mutated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Consumption entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumption {
    /// Unique identifier (assigned by the database on insert)
    pub id: Uuid,

    /// Owning credit line identifier
    pub credit_id: Uuid,

    /// Charged amount
    pub amount: Decimal,

    /// Registration timestamp, server-assigned at charge time
    pub register_date: DateTime<Utc>,
}

impl Consumption {
    /// Build a consumption for a credit line, stamped with the current time.
    /// The id is assigned by the persistence gateway on insert.
    pub fn new(credit_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::nil(),
            credit_id,
            amount,
            register_date: Utc::now(),
        }
    }
}
