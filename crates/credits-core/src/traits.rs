//! Repository traits for the persistence gateway
//!
//! The service layer depends on these traits only; the Postgres
//! implementations live in `credits-db` and tests substitute in-memory
//! doubles.

use crate::error::AppError;
use crate::models::{Consumption, Credit, CreditType, Payment};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Credit line storage
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Persist a new credit line; the returned entity carries the assigned id
    async fn create(&self, credit: &Credit) -> Result<Credit, AppError>;

    /// Point lookup by identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credit>, AppError>;

    /// List all credit lines owned by a customer with the given type
    async fn find_all_by_customer_and_type(
        &self,
        customer_id: &str,
        credit_type: CreditType,
    ) -> Result<Vec<Credit>, AppError>;
}

/// Consumption storage
#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    /// Persist a new consumption; the returned entity carries the assigned id
    async fn create(&self, consumption: &Consumption) -> Result<Consumption, AppError>;

    /// Sum consumption amounts for a credit line, 0 when none exist
    async fn sum_by_credit_id(&self, credit_id: Uuid) -> Result<Decimal, AppError>;
}

/// Payment storage
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new payment; the returned entity carries the assigned id
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;

    /// Sum payment amounts for a credit line, 0 when none exist
    async fn sum_by_credit_id(&self, credit_id: Uuid) -> Result<Decimal, AppError>;
}
