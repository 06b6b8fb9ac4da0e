use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct SlotReservedEvent {
    pub booking_id: Uuid,
    pub experience_id: Uuid,
    pub slot_id: Uuid,
    pub user_id: String,
    pub participants: u32,
    pub reserved_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub slot_id: Uuid,
    pub user_id: String,
    pub total_amount: i64,
    pub payment_reference: String,
    pub confirmed_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingCancelledEvent {
    pub booking_id: Uuid,
    pub slot_id: Uuid,
    pub participants: u32,
    pub cancelled_at: i64,
}

/// Fan-out envelope for the in-process broadcast channel
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    SlotReserved(SlotReservedEvent),
    BookingConfirmed(BookingConfirmedEvent),
    BookingCancelled(BookingCancelledEvent),
}
