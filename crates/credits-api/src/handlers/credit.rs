//! Credit line handlers
//!
//! HTTP handlers for credit creation, consumption charges, payments, and
//! balance queries.

use crate::dto::{
    ApiResponse, BalanceResponse, ChargeConsumptionRequest, CreateCreditRequest, CreatedResponse,
    RecordPaymentRequest,
};
use actix_web::{web, HttpResponse};
use credits_core::models::CreditType;
use credits_core::AppError;
use credits_db::{PgConsumptionRepository, PgCreditRepository, PgPaymentRepository};
use credits_services::CreditService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use validator::Validate;

type PgCreditService =
    CreditService<PgCreditRepository, PgConsumptionRepository, PgPaymentRepository>;

/// Build a credit service over the shared connection pool
fn credit_service(pool: &PgPool) -> PgCreditService {
    CreditService::new(
        Arc::new(PgCreditRepository::new(pool.clone())),
        Arc::new(PgConsumptionRepository::new(pool.clone())),
        Arc::new(PgPaymentRepository::new(pool.clone())),
    )
}

/// Create a new credit line
///
/// POST /api/v1/credits
#[instrument(skip(pool, req))]
pub async fn create_credit(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCreditRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Credit creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(customer_id = ?req.customer_id, "Creating credit line");

    let id = credit_service(pool.get_ref())
        .create_credit(req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        CreatedResponse::new(id),
        "Credit created successfully",
    )))
}

/// Charge a consumption against a credit line
///
/// POST /api/v1/credits/consumptions
#[instrument(skip(pool, req))]
pub async fn charge_consumption(
    pool: web::Data<PgPool>,
    req: web::Json<ChargeConsumptionRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Consumption validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(credit_id = ?req.credit_id, amount = ?req.amount, "Charging consumption");

    let id = credit_service(pool.get_ref())
        .charge_consumption(req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        CreatedResponse::new(id),
        "Consumption charged successfully",
    )))
}

/// Record a payment on a credit line
///
/// POST /api/v1/credits/payments
#[instrument(skip(pool, req))]
pub async fn record_payment(
    pool: web::Data<PgPool>,
    req: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Payment validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(credit_id = ?req.credit_id, amount = ?req.amount, "Recording payment");

    let id = credit_service(pool.get_ref())
        .record_payment(req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        CreatedResponse::new(id),
        "Payment recorded successfully",
    )))
}

/// Get the balance for one credit line
///
/// GET /api/v1/credits/{credit_id}/balance
#[instrument(skip(pool))]
pub async fn balance_by_credit(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let credit_id = path.into_inner();
    debug!(%credit_id, "Getting balance");

    let balance = credit_service(pool.get_ref())
        .balance_by_credit_id(credit_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BalanceResponse::from(balance))))
}

/// Get balances for every credit line owned by a customer with a given type
///
/// GET /api/v1/credits/balances/{customer_id}/{credit_type}
#[instrument(skip(pool))]
pub async fn balances_by_customer(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, credit_type) = path.into_inner();

    let credit_type = CreditType::from_str(&credit_type).ok_or_else(|| {
        warn!("Invalid credit type in path: {}", credit_type);
        AppError::Validation(format!("Invalid credit type: {}", credit_type))
    })?;

    debug!(%customer_id, %credit_type, "Getting balances by customer and type");

    let balances = credit_service(pool.get_ref())
        .balances_by_customer_and_type(&customer_id, credit_type)
        .await?;

    let response: Vec<BalanceResponse> = balances.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/credits")
            .route("", web::post().to(create_credit))
            .route("/consumptions", web::post().to(charge_consumption))
            .route("/payments", web::post().to(record_payment))
            .route(
                "/balances/{customer_id}/{credit_type}",
                web::get().to(balances_by_customer),
            )
            .route("/{credit_id}/balance", web::get().to(balance_by_credit)),
    );
}
