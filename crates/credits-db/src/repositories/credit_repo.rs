//! Credit line repository implementation
//!
//! PostgreSQL-backed storage for credit lines. Ids and registration
//! timestamps are assigned by the database on insert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credits_core::{
    models::{Credit, CreditType},
    traits::CreditRepository,
    AppError, AppResult,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of CreditRepository
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    /// Create a new credit repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database credit type string to enum
    fn parse_credit_type(s: &str) -> CreditType {
        CreditType::from_str(s).unwrap_or(CreditType::Personal)
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    #[instrument(skip(self, credit))]
    async fn create(&self, credit: &Credit) -> AppResult<Credit> {
        debug!("Creating credit line for customer: {}", credit.customer_id);

        let row = sqlx::query_as::<sqlx::Postgres, CreditRow>(
            r#"
            INSERT INTO credits (credit_type, customer_id, credit_limit, card_number)
            VALUES ($1, $2, $3, $4)
            RETURNING
                id, credit_type, customer_id, credit_limit,
                card_number, register_date
            "#,
        )
        .bind(credit.credit_type.to_string())
        .bind(&credit.customer_id)
        .bind(credit.credit_limit)
        .bind(&credit.card_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating credit line: {}", e);
            AppError::Database(format!("Failed to create credit: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Credit>> {
        debug!("Finding credit line by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, CreditRow>(
            r#"
            SELECT
                id, credit_type, customer_id, credit_limit,
                card_number, register_date
            FROM credits
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding credit {}: {}", id, e);
            AppError::Database(format!("Failed to find credit: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all_by_customer_and_type(
        &self,
        customer_id: &str,
        credit_type: CreditType,
    ) -> AppResult<Vec<Credit>> {
        debug!(
            "Listing credit lines for customer {} with type {}",
            customer_id, credit_type
        );

        let rows = sqlx::query_as::<sqlx::Postgres, CreditRow>(
            r#"
            SELECT
                id, credit_type, customer_id, credit_limit,
                card_number, register_date
            FROM credits
            WHERE customer_id = $1 AND credit_type = $2
            ORDER BY register_date
            "#,
        )
        .bind(customer_id)
        .bind(credit_type.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing credits for {}: {}", customer_id, e);
            AppError::Database(format!("Failed to fetch credits: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct CreditRow {
    id: Uuid,
    credit_type: String,
    customer_id: String,
    credit_limit: Decimal,
    card_number: Option<String>,
    register_date: DateTime<Utc>,
}

impl From<CreditRow> for Credit {
    fn from(row: CreditRow) -> Self {
        Self {
            id: row.id,
            credit_type: PgCreditRepository::parse_credit_type(&row.credit_type),
            customer_id: row.customer_id,
            credit_limit: row.credit_limit,
            card_number: row.card_number,
            register_date: row.register_date,
        }
    }
}
