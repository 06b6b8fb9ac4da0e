use chrono::Utc;
use escape_core::payment::{PaymentAdapter, PaymentIntent, PaymentMethod, PaymentStatus};
use std::sync::Arc;

/// Routes payment processing through the configured adapter. Lives between
/// the service and the gateway so adapter selection (by currency, by
/// method) stays out of the booking flow.
pub struct PaymentOrchestrator {
    adapter: Arc<dyn PaymentAdapter>,
}

impl PaymentOrchestrator {
    pub fn new(adapter: Arc<dyn PaymentAdapter>) -> Self {
        Self { adapter }
    }

    pub async fn process_payment(
        &self,
        intent: &PaymentIntent,
        method: PaymentMethod,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
        // Here we could pick different adapters per method/currency
        self.adapter.process_payment(intent, method).await
    }
}

/// Simulated gateway: sleeps for the configured latency, then settles.
pub struct MockPaymentAdapter {
    latency: std::time::Duration,
    decline_all: bool,
}

impl MockPaymentAdapter {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            latency: std::time::Duration::from_millis(latency_ms),
            decline_all: false,
        }
    }

    /// A gateway that declines every charge, for exercising failure paths
    pub fn declining() -> Self {
        Self {
            latency: std::time::Duration::from_millis(0),
            decline_all: true,
        }
    }
}

#[async_trait::async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn process_payment(
        &self,
        intent: &PaymentIntent,
        method: PaymentMethod,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
        tokio::time::sleep(self.latency).await;

        let mut settled = intent.clone();
        if self.decline_all {
            settled.status = PaymentStatus::Failed;
            tracing::info!(intent_id = %settled.id, ?method, "mock gateway declined payment");
            return Ok(settled);
        }

        settled.status = PaymentStatus::Succeeded;
        settled.reference = Some(format!(
            "pay_{}_{:04x}",
            Utc::now().timestamp_millis(),
            rand::random::<u16>()
        ));
        tracing::info!(intent_id = %settled.id, ?method, "mock gateway settled payment");

        Ok(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn intent() -> PaymentIntent {
        PaymentIntent {
            id: "order_rcptid_1".to_string(),
            booking_id: Uuid::new_v4(),
            amount: 3600,
            currency: "INR".to_string(),
            status: PaymentStatus::Processing,
            reference: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn mock_gateway_settles_with_payment_reference() {
        let orchestrator = PaymentOrchestrator::new(Arc::new(MockPaymentAdapter::new(0)));

        let settled = orchestrator
            .process_payment(&intent(), PaymentMethod::Upi)
            .await
            .unwrap();

        assert_eq!(settled.status, PaymentStatus::Succeeded);
        assert!(settled.reference.unwrap().starts_with("pay_"));
    }

    #[tokio::test]
    async fn declining_gateway_reports_failure_without_reference() {
        let orchestrator = PaymentOrchestrator::new(Arc::new(MockPaymentAdapter::declining()));

        let settled = orchestrator
            .process_payment(&intent(), PaymentMethod::Card)
            .await
            .unwrap();

        assert_eq!(settled.status, PaymentStatus::Failed);
        assert!(settled.reference.is_none());
    }
}
