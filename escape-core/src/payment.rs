use async_trait::async_trait;
use chrono::{DateTime, Utc};
use escape_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Upi,
    Card,
    Netbanking,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    RequiresPaymentMethod,
    Processing,
    Succeeded,
    Failed,
}

/// Form input collected by the payment sheet. Ephemeral: validated before
/// confirmation, discarded when the flow completes or is abandoned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub upi_id: Masked<String>,
    pub card_number: Masked<String>,
    pub card_name: String,
    pub expiry: String,
    pub cvv: Masked<String>,
    pub bank: String,
    pub customer_id: String,
}

impl PaymentDetails {
    /// Method-specific field validation. Pure, no side effects; a failed
    /// check never advances the booking flow.
    pub fn is_valid_for(&self, method: Option<PaymentMethod>) -> bool {
        match method {
            Some(PaymentMethod::Upi) => self.upi_id.0.contains('@'),
            Some(PaymentMethod::Card) => {
                let digits = self.card_number.0.chars().filter(|c| c.is_ascii_digit()).count();
                digits >= 12
                    && self.cvv.0.len() == 3
                    && self.cvv.0.chars().all(|c| c.is_ascii_digit())
                    && self.card_name.chars().count() > 2
            }
            Some(PaymentMethod::Netbanking) => {
                !self.bank.is_empty() && self.customer_id.chars().count() > 3
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String, // order reference the gateway charges against
    pub booking_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub reference: Option<String>, // gateway payment id, set once settled
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Run the payment with the provider. On success the returned intent
    /// carries Succeeded status and the provider's payment reference.
    async fn process_payment(
        &self,
        intent: &PaymentIntent,
        method: PaymentMethod,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PaymentDetails {
        PaymentDetails::default()
    }

    #[test]
    fn upi_requires_at_sign() {
        let mut d = details();
        d.upi_id = Masked("x@y".to_string());
        assert!(d.is_valid_for(Some(PaymentMethod::Upi)));

        d.upi_id = Masked("xy".to_string());
        assert!(!d.is_valid_for(Some(PaymentMethod::Upi)));
    }

    #[test]
    fn card_rules() {
        let mut d = details();
        d.card_number = Masked("4111111111111111".to_string());
        d.cvv = Masked("123".to_string());
        d.card_name = "Jane Doe".to_string();
        assert!(d.is_valid_for(Some(PaymentMethod::Card)));

        d.cvv = Masked("12".to_string());
        assert!(!d.is_valid_for(Some(PaymentMethod::Card)));

        d.cvv = Masked("123".to_string());
        d.card_number = Masked("4111".to_string());
        assert!(!d.is_valid_for(Some(PaymentMethod::Card)));

        d.card_number = Masked("4111111111111111".to_string());
        d.card_name = "JD".to_string();
        assert!(!d.is_valid_for(Some(PaymentMethod::Card)));
    }

    #[test]
    fn netbanking_rules() {
        let mut d = details();
        d.bank = "hdfc".to_string();
        d.customer_id = "cust_42".to_string();
        assert!(d.is_valid_for(Some(PaymentMethod::Netbanking)));

        d.bank.clear();
        assert!(!d.is_valid_for(Some(PaymentMethod::Netbanking)));

        d.bank = "sbi".to_string();
        d.customer_id = "c42".to_string();
        assert!(!d.is_valid_for(Some(PaymentMethod::Netbanking)));
    }

    #[test]
    fn no_method_is_invalid() {
        let mut d = details();
        d.upi_id = Masked("x@y".to_string());
        assert!(!d.is_valid_for(None));
    }
}
