//! Credit service
//!
//! Orchestrates validation, the personal-customer cardinality rule, balance
//! computation, and persistence for credit lines, consumptions, and
//! payments.

use credits_core::{
    models::{Consumption, Credit, CreditType, Payment},
    traits::{ConsumptionRepository, CreditRepository, PaymentRepository},
    AppError, AppResult,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::validation::check;

/// Credit line creation command
///
/// Fields are optional so the required-field checks in the service can fail
/// with a descriptive message instead of a bare deserialization error.
#[derive(Debug, Clone, Default)]
pub struct CreateCredit {
    pub credit_type: Option<CreditType>,
    pub customer_id: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub card_number: Option<String>,
}

/// Consumption charge command
#[derive(Debug, Clone, Default)]
pub struct ChargeConsumption {
    pub credit_id: Option<Uuid>,
    pub amount: Option<Decimal>,
}

/// Payment command
#[derive(Debug, Clone, Default)]
pub struct RecordPayment {
    pub credit_id: Option<Uuid>,
    pub amount: Option<Decimal>,
}

/// Derived balance for a credit line, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub credit_id: Uuid,
    pub credit_type: String,
    pub credit_limit: Decimal,
    pub used: Decimal,
    pub available: Decimal,
}

/// Type label carried on every balance
const BALANCE_TYPE_LABEL: &str = "Credit";

/// Credit service
///
/// Generic over the repository traits so tests can inject in-memory
/// doubles. Repositories are shared behind `Arc`.
pub struct CreditService<C, N, P> {
    credit_repo: Arc<C>,
    consumption_repo: Arc<N>,
    payment_repo: Arc<P>,
}

impl<C, N, P> CreditService<C, N, P>
where
    C: CreditRepository,
    N: ConsumptionRepository,
    P: PaymentRepository,
{
    /// Create a new credit service
    pub fn new(credit_repo: Arc<C>, consumption_repo: Arc<N>, payment_repo: Arc<P>) -> Self {
        Self {
            credit_repo,
            consumption_repo,
            payment_repo,
        }
    }

    /// Create a credit line and return its assigned id.
    ///
    /// Personal customers are capped at exactly one credit line; business
    /// customers have no cap.
    #[instrument(skip(self, request))]
    pub async fn create_credit(&self, request: CreateCredit) -> AppResult<Uuid> {
        check(
            &request,
            |r| r.customer_id.as_deref().map_or(true, str::is_empty),
            "Customer ID is required",
        )?;
        check(&request, |r| r.credit_type.is_none(), "Credit type is required")?;
        check(
            &request,
            |r| r.credit_limit.is_none(),
            "Credit limit is required",
        )?;
        check(
            &request,
            |r| r.credit_limit.is_some_and(|limit| limit < Decimal::ZERO),
            "Credit limit must be greater than zero (0)",
        )?;

        // Presence is guaranteed by the checks above
        let customer_id = request.customer_id.unwrap_or_default();
        let credit_type = request.credit_type.unwrap_or_default();
        let credit_limit = request.credit_limit.unwrap_or_default();

        let existing = self
            .credit_repo
            .find_all_by_customer_and_type(&customer_id, credit_type)
            .await?;
        if !existing.is_empty() && credit_type == CreditType::Personal {
            debug!(
                customer_id = %customer_id,
                "Rejecting second personal credit line"
            );
            return Err(AppError::validation(
                "Personal customer already has a credit",
            ));
        }

        let credit = Credit {
            credit_type,
            customer_id,
            credit_limit,
            card_number: request.card_number,
            ..Default::default()
        };
        let created = self.credit_repo.create(&credit).await?;

        info!(
            id = %created.id,
            customer_id = %created.customer_id,
            credit_type = %created.credit_type,
            "Credit line created"
        );

        Ok(created.id)
    }

    /// Charge a consumption against a credit line and return its id.
    ///
    /// The amount check is `amount < 0`, so a zero-amount charge is
    /// permitted. The charge must not exceed the available limit.
    #[instrument(skip(self, request))]
    pub async fn charge_consumption(&self, request: ChargeConsumption) -> AppResult<Uuid> {
        check(
            &request,
            |r| r.amount.is_none(),
            "Consumption amount is required",
        )?;
        check(
            &request,
            |r| r.credit_id.is_none(),
            "Consumption Credit ID is required",
        )?;
        check(
            &request,
            |r| r.amount.is_some_and(|amount| amount < Decimal::ZERO),
            "Consumption amount must be greater than zero",
        )?;

        let credit_id = request.credit_id.unwrap_or_default();
        let amount = request.amount.unwrap_or_default();

        let credit = self
            .credit_repo
            .find_by_id(credit_id)
            .await?
            .ok_or_else(|| AppError::validation("Credit not found"))?;

        let used = self.credit_used(credit.id).await?;
        let available = credit.credit_limit - used;
        if amount > available {
            debug!(
                credit_id = %credit.id,
                %amount,
                %available,
                "Rejecting consumption over available limit"
            );
            return Err(AppError::Validation(format!(
                "Not enough line of credit, for charge: {}, available: {}",
                amount, available
            )));
        }

        let consumption = Consumption::new(credit.id, amount);
        let saved = self.consumption_repo.create(&consumption).await?;

        info!(
            id = %saved.id,
            credit_id = %saved.credit_id,
            amount = %saved.amount,
            "Consumption charged"
        );

        Ok(saved.id)
    }

    /// Record a payment on a credit line and return its id.
    ///
    /// Payments carry no sign or limit check: any amount is accepted once
    /// the credit line is found.
    #[instrument(skip(self, request))]
    pub async fn record_payment(&self, request: RecordPayment) -> AppResult<Uuid> {
        check(&request, |r| r.amount.is_none(), "Payment amount is required")?;
        check(
            &request,
            |r| r.credit_id.is_none(),
            "Payment Credit ID is required",
        )?;

        let credit_id = request.credit_id.unwrap_or_default();
        let amount = request.amount.unwrap_or_default();

        let credit = self
            .credit_repo
            .find_by_id(credit_id)
            .await?
            .ok_or_else(|| AppError::validation("Credit not found"))?;

        let payment = Payment::new(credit.id, amount);
        let saved = self.payment_repo.create(&payment).await?;

        info!(
            id = %saved.id,
            credit_id = %saved.credit_id,
            amount = %saved.amount,
            "Payment recorded"
        );

        Ok(saved.id)
    }

    /// Compute the balance for one credit line.
    #[instrument(skip(self))]
    pub async fn balance_by_credit_id(&self, credit_id: Uuid) -> AppResult<Balance> {
        let credit = self
            .credit_repo
            .find_by_id(credit_id)
            .await?
            .ok_or_else(|| AppError::validation("Credit not found"))?;

        let available = self.credit_used(credit.id).await?;

        Ok(Balance {
            credit_id: credit.id,
            credit_type: BALANCE_TYPE_LABEL.to_string(),
            credit_limit: credit.credit_limit,
            used: credit.credit_limit - available,
            available,
        })
    }

    /// Compute balances for every credit line owned by a customer with the
    /// given type. An empty match yields an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn balances_by_customer_and_type(
        &self,
        customer_id: &str,
        credit_type: CreditType,
    ) -> AppResult<Vec<Balance>> {
        let credits = self
            .credit_repo
            .find_all_by_customer_and_type(customer_id, credit_type)
            .await?;

        let mut balances = Vec::with_capacity(credits.len());
        for credit in credits {
            balances.push(self.balance_by_credit_id(credit.id).await?);
        }

        Ok(balances)
    }

    /// Net usage for a credit line: payments total minus consumptions total,
    /// each 0 when no rows exist.
    ///
    /// Balance queries expose this value directly as `available` and derive
    /// `used` as the limit minus it; the charge path derives its available
    /// limit as `limit - used`. The collapsed naming mirrors the aggregate
    /// formula the records are kept under.
    async fn credit_used(&self, credit_id: Uuid) -> AppResult<Decimal> {
        let consumed = self.consumption_repo.sum_by_credit_id(credit_id).await?;
        let paid = self.payment_repo.sum_by_credit_id(credit_id).await?;
        Ok(-consumed + paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    #[derive(Default)]
    struct MockCreditRepository {
        credits: Mutex<Vec<Credit>>,
    }

    #[async_trait]
    impl CreditRepository for MockCreditRepository {
        async fn create(&self, credit: &Credit) -> AppResult<Credit> {
            let mut saved = credit.clone();
            saved.id = Uuid::new_v4();
            self.credits.lock().push(saved.clone());
            Ok(saved)
        }

        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Credit>> {
            Ok(self.credits.lock().iter().find(|c| c.id == id).cloned())
        }

        async fn find_all_by_customer_and_type(
            &self,
            customer_id: &str,
            credit_type: CreditType,
        ) -> AppResult<Vec<Credit>> {
            Ok(self
                .credits
                .lock()
                .iter()
                .filter(|c| c.customer_id == customer_id && c.credit_type == credit_type)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MockConsumptionRepository {
        rows: Mutex<Vec<Consumption>>,
    }

    #[async_trait]
    impl ConsumptionRepository for MockConsumptionRepository {
        async fn create(&self, consumption: &Consumption) -> AppResult<Consumption> {
            let mut saved = consumption.clone();
            saved.id = Uuid::new_v4();
            self.rows.lock().push(saved.clone());
            Ok(saved)
        }

        async fn sum_by_credit_id(&self, credit_id: Uuid) -> AppResult<Decimal> {
            Ok(self
                .rows
                .lock()
                .iter()
                .filter(|c| c.credit_id == credit_id)
                .map(|c| c.amount)
                .sum())
        }
    }

    #[derive(Default)]
    struct MockPaymentRepository {
        rows: Mutex<Vec<Payment>>,
    }

    #[async_trait]
    impl PaymentRepository for MockPaymentRepository {
        async fn create(&self, payment: &Payment) -> AppResult<Payment> {
            let mut saved = payment.clone();
            saved.id = Uuid::new_v4();
            self.rows.lock().push(saved.clone());
            Ok(saved)
        }

        async fn sum_by_credit_id(&self, credit_id: Uuid) -> AppResult<Decimal> {
            Ok(self
                .rows
                .lock()
                .iter()
                .filter(|p| p.credit_id == credit_id)
                .map(|p| p.amount)
                .sum())
        }
    }

    type MockService =
        CreditService<MockCreditRepository, MockConsumptionRepository, MockPaymentRepository>;

    fn service() -> MockService {
        CreditService::new(
            Arc::new(MockCreditRepository::default()),
            Arc::new(MockConsumptionRepository::default()),
            Arc::new(MockPaymentRepository::default()),
        )
    }

    fn personal_credit(customer_id: &str, limit: Decimal) -> CreateCredit {
        CreateCredit {
            credit_type: Some(CreditType::Personal),
            customer_id: Some(customer_id.to_string()),
            credit_limit: Some(limit),
            card_number: None,
        }
    }

    fn business_credit(customer_id: &str, limit: Decimal) -> CreateCredit {
        CreateCredit {
            credit_type: Some(CreditType::Business),
            customer_id: Some(customer_id.to_string()),
            credit_limit: Some(limit),
            card_number: None,
        }
    }

    #[tokio::test]
    async fn test_personal_customer_capped_at_one_credit() {
        let service = service();

        let id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();
        assert!(!id.is_nil());

        let err = service
            .create_credit(personal_credit("c1", dec!(200)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Personal customer already has a credit");
    }

    #[tokio::test]
    async fn test_business_customer_allows_multiple_credits() {
        let service = service();

        let first = service
            .create_credit(business_credit("b1", dec!(1000)))
            .await
            .unwrap();
        let second = service
            .create_credit(business_credit("b1", dec!(2000)))
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_credit_required_field_checks_run_in_order() {
        let service = service();

        let err = service.create_credit(CreateCredit::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer ID is required");

        let err = service
            .create_credit(CreateCredit {
                customer_id: Some("c1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Credit type is required");

        let err = service
            .create_credit(CreateCredit {
                customer_id: Some("c1".to_string()),
                credit_type: Some(CreditType::Personal),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Credit limit is required");

        let err = service
            .create_credit(personal_credit("c1", dec!(-1)))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Credit limit must be greater than zero (0)"
        );
    }

    #[tokio::test]
    async fn test_empty_customer_id_is_rejected() {
        let service = service();

        let err = service
            .create_credit(personal_credit("", dec!(100)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Customer ID is required");
    }

    #[tokio::test]
    async fn test_charge_consumption_within_limit() {
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        let consumption_id = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(50)),
            })
            .await
            .unwrap();

        assert!(!consumption_id.is_nil());
    }

    #[tokio::test]
    async fn test_zero_amount_charge_is_permitted() {
        // The amount check is strictly `amount < 0`, so zero passes.
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        let result = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(Decimal::ZERO),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_negative_charge_is_rejected() {
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        let err = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(-10)),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Consumption amount must be greater than zero"
        );
    }

    #[tokio::test]
    async fn test_charge_unknown_credit_fails() {
        let service = service();

        let err = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(Uuid::new_v4()),
                amount: Some(dec!(10)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Credit not found");
    }

    #[tokio::test]
    async fn test_charge_required_field_checks_run_in_order() {
        let service = service();

        let err = service
            .charge_consumption(ChargeConsumption::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Consumption amount is required");

        let err = service
            .charge_consumption(ChargeConsumption {
                amount: Some(dec!(10)),
                credit_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Consumption Credit ID is required");
    }

    #[tokio::test]
    async fn test_charge_over_available_limit_fails() {
        // available = limit - (payments - consumptions); a recorded payment
        // of 50 against a 100 limit leaves 50 of charge headroom.
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        service
            .record_payment(RecordPayment {
                credit_id: Some(credit_id),
                amount: Some(dec!(50)),
            })
            .await
            .unwrap();

        let err = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(60)),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Not enough line of credit"));
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("50"));

        // A charge exactly at the available amount still succeeds
        let result = service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(50)),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_payment_accepts_any_amount() {
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        // Payments carry no sign or limit check
        for amount in [dec!(50), dec!(-25), dec!(100000)] {
            let result = service
                .record_payment(RecordPayment {
                    credit_id: Some(credit_id),
                    amount: Some(amount),
                })
                .await;
            assert!(result.is_ok(), "payment of {} should be accepted", amount);
        }
    }

    #[tokio::test]
    async fn test_payment_unknown_credit_fails() {
        let service = service();

        let err = service
            .record_payment(RecordPayment {
                credit_id: Some(Uuid::new_v4()),
                amount: Some(dec!(10)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Credit not found");
    }

    #[tokio::test]
    async fn test_payment_required_field_checks_run_in_order() {
        let service = service();

        let err = service
            .record_payment(RecordPayment::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment amount is required");

        let err = service
            .record_payment(RecordPayment {
                amount: Some(dec!(10)),
                credit_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment Credit ID is required");
    }

    #[tokio::test]
    async fn test_balance_formula() {
        // Limit 100, consumed 50, paid 100:
        // available = 100 - 50 = 50, used = limit - available = 50.
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();

        service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(50)),
            })
            .await
            .unwrap();
        service
            .record_payment(RecordPayment {
                credit_id: Some(credit_id),
                amount: Some(dec!(100)),
            })
            .await
            .unwrap();

        let balance = service.balance_by_credit_id(credit_id).await.unwrap();
        assert_eq!(balance.credit_id, credit_id);
        assert_eq!(balance.credit_type, "Credit");
        assert_eq!(balance.credit_limit, dec!(100));
        assert_eq!(balance.available, dec!(50));
        assert_eq!(balance.used, dec!(50));
    }

    #[tokio::test]
    async fn test_balance_unknown_credit_fails() {
        let service = service();

        let err = service
            .balance_by_credit_id(Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Credit not found");
    }

    #[tokio::test]
    async fn test_balances_by_customer_and_type() {
        let service = service();
        let first = service
            .create_credit(business_credit("b1", dec!(1000)))
            .await
            .unwrap();
        let second = service
            .create_credit(business_credit("b1", dec!(2000)))
            .await
            .unwrap();

        let balances = service
            .balances_by_customer_and_type("b1", CreditType::Business)
            .await
            .unwrap();
        assert_eq!(balances.len(), 2);
        let ids: Vec<Uuid> = balances.iter().map(|b| b.credit_id).collect();
        assert!(ids.contains(&first));
        assert!(ids.contains(&second));

        // No personal credits for this customer: empty list, not an error
        let balances = service
            .balances_by_customer_and_type("b1", CreditType::Personal)
            .await
            .unwrap();
        assert!(balances.is_empty());
    }

    #[tokio::test]
    async fn test_balance_query_is_idempotent() {
        let service = service();
        let credit_id = service
            .create_credit(personal_credit("c1", dec!(100)))
            .await
            .unwrap();
        service
            .charge_consumption(ChargeConsumption {
                credit_id: Some(credit_id),
                amount: Some(dec!(30)),
            })
            .await
            .unwrap();

        let first = service.balance_by_credit_id(credit_id).await.unwrap();
        let second = service.balance_by_credit_id(credit_id).await.unwrap();
        assert_eq!(first, second);
    }
}
