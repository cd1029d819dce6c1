//! Credit line model
//!
//! Represents a revolving credit line tied to one customer. Personal
//! customers are capped at a single credit line; business customers may
//! hold any number.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Credit line type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreditType {
    /// Personal credit line - at most one per customer
    #[default]
    Personal,
    /// Business credit line - no cardinality cap
    Business,
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditType::Personal => write!(f, "PERSONAL"),
            CreditType::Business => write!(f, "BUSINESS"),
        }
    }
}

impl CreditType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "personal" => Some(CreditType::Personal),
            "business" => Some(CreditType::Business),
            _ => None,
        }
    }
}

/// Credit line entity
///
/// Immutable after creation: there is no update or delete operation.
/// Consumptions and payments reference it by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    /// Unique identifier (assigned by the database on insert)
    pub id: Uuid,

    /// Credit line type
    pub credit_type: CreditType,

    /// Owning customer identifier
    pub customer_id: String,

    /// Credit limit, must be non-negative
    pub credit_limit: Decimal,

    /// Associated card number, if any
    pub card_number: Option<String>,

    /// Creation timestamp
    pub register_date: DateTime<Utc>,
}

impl Default for Credit {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            credit_type: CreditType::Personal,
            customer_id: String::new(),
            credit_limit: Decimal::ZERO,
            card_number: None,
            register_date: Utc::now(),
        }
    }
}
