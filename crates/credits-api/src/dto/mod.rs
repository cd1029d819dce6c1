//! Data Transfer Objects (DTOs) for API requests and responses

pub mod balance;
pub mod common;
pub mod credit;

pub use balance::*;
pub use common::*;
pub use credit::*;
