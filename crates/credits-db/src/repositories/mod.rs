//! Repository implementations

pub mod consumption_repo;
pub mod credit_repo;
pub mod payment_repo;

pub use consumption_repo::PgConsumptionRepository;
pub use credit_repo::PgCreditRepository;
pub use payment_repo::PgPaymentRepository;
