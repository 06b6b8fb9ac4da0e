use escape_booking::BookingError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Core(#[from] escape_core::CoreError),

    #[error("Experience not found: {0}")]
    ExperienceNotFound(Uuid),

    #[error("Slot not found: {0}")]
    SlotNotFound(Uuid),

    #[error("Invalid payment details")]
    InvalidPaymentDetails,

    #[error("No payment order exists for booking {0}")]
    OrderNotInitialized(Uuid),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Payment gateway failure: {0}")]
    Gateway(String),

    #[error("User store failure: {0}")]
    Store(String),
}

impl ServiceError {
    pub(crate) fn store(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ServiceError::Store(e.to_string())
    }
}
