//! Credits Backend Database Layer
//!
//! This crate provides PostgreSQL database access and repository
//! implementations for the credits backend. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for credits, consumptions, and payments
//! - Sum aggregations over amounts grouped by credit line

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use credits_core::{AppError, AppResult};
pub use sqlx::PgPool;
