//! Domain models for the credits backend

pub mod consumption;
pub mod credit;
pub mod payment;

pub use consumption::Consumption;
pub use credit::{Credit, CreditType};
pub use payment::Payment;
