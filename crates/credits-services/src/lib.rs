//! Business logic services for the credits backend
//!
//! This crate contains the credit service that orchestrates validation,
//! cardinality rule enforcement, balance computation, and persistence.
//!
//! # Architecture
//!
//! - The service owns its repositories behind `Arc` and is generic over the
//!   repository traits, so tests substitute in-memory doubles
//! - Preconditions run as an ordered check chain; the first failure aborts
//!   the operation before any persistence call
//! - All operations are instrumented with tracing

pub mod credit_service;
pub mod validation;

pub use credit_service::{
    Balance, ChargeConsumption, CreateCredit, CreditService, RecordPayment,
};
pub use validation::check;
