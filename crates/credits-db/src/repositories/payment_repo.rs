//! Payment repository implementation
//!
//! PostgreSQL-backed storage for payments with a sum aggregation over
//! amounts grouped by credit line.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credits_core::{models::Payment, traits::PaymentRepository, AppError, AppResult};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of PaymentRepository
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new payment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self, payment))]
    async fn create(&self, payment: &Payment) -> AppResult<Payment> {
        debug!(
            "Creating payment of {} for credit {}",
            payment.amount, payment.credit_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, PaymentRow>(
            r#"
            INSERT INTO payments (credit_id, amount, created_date)
            VALUES ($1, $2, $3)
            RETURNING id, credit_id, amount, created_date
            "#,
        )
        .bind(payment.credit_id)
        .bind(payment.amount)
        .bind(payment.created_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating payment: {}", e);
            AppError::Database(format!("Failed to create payment: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn sum_by_credit_id(&self, credit_id: Uuid) -> AppResult<Decimal> {
        debug!("Summing payments for credit: {}", credit_id);

        let result: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM payments
            WHERE credit_id = $1
            "#,
        )
        .bind(credit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error summing payments for {}: {}", credit_id, e);
            AppError::Database(format!("Failed to sum payments: {}", e))
        })?;

        Ok(result.0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    credit_id: Uuid,
    amount: Decimal,
    created_date: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            credit_id: row.credit_id,
            amount: row.amount,
            created_date: row.created_date,
        }
    }
}
