//! API layer for the credits backend
//!
//! HTTP handlers and DTOs for credit lines, consumptions, payments, and
//! balance queries.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

pub use dto::ApiResponse;
pub use handlers::configure_credits;
