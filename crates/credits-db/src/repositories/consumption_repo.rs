//! Consumption repository implementation
//!
//! PostgreSQL-backed storage for consumptions with a sum aggregation over
//! amounts grouped by credit line.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credits_core::{models::Consumption, traits::ConsumptionRepository, AppError, AppResult};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of ConsumptionRepository
pub struct PgConsumptionRepository {
    pool: PgPool,
}

impl PgConsumptionRepository {
    /// Create a new consumption repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsumptionRepository for PgConsumptionRepository {
    #[instrument(skip(self, consumption))]
    async fn create(&self, consumption: &Consumption) -> AppResult<Consumption> {
        debug!(
            "Creating consumption of {} for credit {}",
            consumption.amount, consumption.credit_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, ConsumptionRow>(
            r#"
            INSERT INTO consumptions (credit_id, amount, register_date)
            VALUES ($1, $2, $3)
            RETURNING id, credit_id, amount, register_date
            "#,
        )
        .bind(consumption.credit_id)
        .bind(consumption.amount)
        .bind(consumption.register_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating consumption: {}", e);
            AppError::Database(format!("Failed to create consumption: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn sum_by_credit_id(&self, credit_id: Uuid) -> AppResult<Decimal> {
        debug!("Summing consumptions for credit: {}", credit_id);

        let result: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM consumptions
            WHERE credit_id = $1
            "#,
        )
        .bind(credit_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error summing consumptions for {}: {}", credit_id, e);
            AppError::Database(format!("Failed to sum consumptions: {}", e))
        })?;

        Ok(result.0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ConsumptionRow {
    id: Uuid,
    credit_id: Uuid,
    amount: Decimal,
    register_date: DateTime<Utc>,
}

impl From<ConsumptionRow> for Consumption {
    fn from(row: ConsumptionRow) -> Self {
        Self {
            id: row.id,
            credit_id: row.credit_id,
            amount: row.amount,
            register_date: row.register_date,
        }
    }
}
