//! Credits Backend Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the credits backend. It includes:
//!
//! - Domain models (Credit, Consumption, Payment)
//! - Repository traits for the persistence gateway
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
