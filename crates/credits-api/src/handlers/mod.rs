//! HTTP request handlers

pub mod credit;

pub use credit::configure as configure_credits;
