use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status in the lifecycle. Transitions are one-directional:
/// Tentative -> Confirmed, Tentative -> Cancelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Tentative,
    Confirmed,
    Cancelled,
}

/// One user's reservation for one slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub experience_id: Uuid,
    pub slot_id: Uuid,
    pub user_id: String,
    pub status: BookingStatus,
    pub participants: u32,
    pub total_amount: i64,
    pub currency: String,
    pub order_reference: Option<String>,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// A fresh tentative reservation. The amount stays 0 until the payment
    /// order is created.
    pub fn new(
        user_id: String,
        experience_id: Uuid,
        slot_id: Uuid,
        participants: u32,
        currency: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            experience_id,
            slot_id,
            user_id,
            status: BookingStatus::Tentative,
            participants,
            total_amount: 0,
            currency,
            order_reference: None,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_tentative(&self) -> bool {
        self.status == BookingStatus::Tentative
    }

    /// Record the payment order created for this booking
    pub fn attach_order(&mut self, reference: String, amount: i64) {
        self.order_reference = Some(reference);
        self.total_amount = amount;
        self.updated_at = Utc::now();
    }

    /// Transition: Tentative -> Confirmed
    pub fn confirm(&mut self, payment_reference: String) {
        self.status = BookingStatus::Confirmed;
        self.payment_reference = Some(payment_reference);
        self.updated_at = Utc::now();
    }

    /// Transition: Tentative -> Cancelled
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
    }
}
