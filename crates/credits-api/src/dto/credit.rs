//! Credit line DTOs
//!
//! Request types for credit creation, consumption charges, and payments.
//! Fields stay optional here: the service runs the required-field checks in
//! order so callers get a descriptive message instead of a bare
//! deserialization error.

use credits_core::models::CreditType;
use credits_services::{ChargeConsumption, CreateCredit, RecordPayment};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Credit line creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCreditRequest {
    /// Credit line type (personal/business)
    pub credit_type: Option<CreditType>,

    /// Owning customer identifier
    #[validate(length(max = 64))]
    pub customer_id: Option<String>,

    /// Credit limit
    pub credit_limit: Option<Decimal>,

    /// Associated card number, if any
    #[validate(length(max = 32))]
    pub card_number: Option<String>,
}

impl From<CreateCreditRequest> for CreateCredit {
    fn from(req: CreateCreditRequest) -> Self {
        Self {
            credit_type: req.credit_type,
            customer_id: req.customer_id,
            credit_limit: req.credit_limit,
            card_number: req.card_number,
        }
    }
}

/// Consumption charge request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChargeConsumptionRequest {
    /// Owning credit line identifier
    pub credit_id: Option<Uuid>,

    /// Charged amount
    pub amount: Option<Decimal>,
}

impl From<ChargeConsumptionRequest> for ChargeConsumption {
    fn from(req: ChargeConsumptionRequest) -> Self {
        Self {
            credit_id: req.credit_id,
            amount: req.amount,
        }
    }
}

/// Payment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    /// Owning credit line identifier
    pub credit_id: Option<Uuid>,

    /// Paid amount
    pub amount: Option<Decimal>,
}

impl From<RecordPaymentRequest> for RecordPayment {
    fn from(req: RecordPaymentRequest) -> Self {
        Self {
            credit_id: req.credit_id,
            amount: req.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_credit_request_deserializes() {
        let req: CreateCreditRequest = serde_json::from_str(
            r#"{"credit_type": "personal", "customer_id": "c1", "credit_limit": "100.00"}"#,
        )
        .unwrap();

        assert_eq!(req.credit_type, Some(CreditType::Personal));
        assert_eq!(req.customer_id.as_deref(), Some("c1"));
        assert_eq!(req.credit_limit, Some(dec!(100.00)));
        assert!(req.card_number.is_none());
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let req: CreateCreditRequest = serde_json::from_str("{}").unwrap();
        assert!(req.credit_type.is_none());
        assert!(req.customer_id.is_none());
        assert!(req.credit_limit.is_none());

        let cmd = CreateCredit::from(req);
        assert!(cmd.customer_id.is_none());
    }

    #[test]
    fn test_charge_request_conversion() {
        let id = Uuid::new_v4();
        let req = ChargeConsumptionRequest {
            credit_id: Some(id),
            amount: Some(dec!(25.50)),
        };

        let cmd = ChargeConsumption::from(req);
        assert_eq!(cmd.credit_id, Some(id));
        assert_eq!(cmd.amount, Some(dec!(25.50)));
    }
}
