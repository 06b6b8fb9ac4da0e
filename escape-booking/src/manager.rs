use crate::ledger::BookingLedger;
use crate::models::{Booking, BookingStatus};
use chrono::{DateTime, Utc};
use escape_catalog::{ExperienceCatalog, InventoryError, SlotInventory};
use uuid::Uuid;

/// Drives a single booking from slot selection to confirmation: reserve,
/// create payment order, confirm. Owns the ledger and the seat inventory so
/// every check-and-decrement happens under one `&mut self`.
pub struct BookingLifecycleManager {
    ledger: BookingLedger,
    inventory: SlotInventory,
    currency: String,
}

impl BookingLifecycleManager {
    pub fn new(inventory: SlotInventory, currency: impl Into<String>) -> Self {
        Self {
            ledger: BookingLedger::new(),
            inventory,
            currency: currency.into(),
        }
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn inventory(&self) -> &SlotInventory {
        &self.inventory
    }

    /// Hold seats and append a tentative booking. Rejects a zero participant
    /// count and any count beyond the slot's remaining seats; a rejected
    /// reservation moves no seats and appends nothing.
    pub fn reserve(
        &mut self,
        user_id: &str,
        experience_id: Uuid,
        slot_id: Uuid,
        participants: u32,
    ) -> Result<Booking, BookingError> {
        if participants == 0 {
            return Err(BookingError::InvalidParticipants);
        }

        self.inventory
            .reserve(&slot_id, participants)
            .map_err(|e| match e {
                InventoryError::NotFound(_) => BookingError::SlotNotFound(slot_id.to_string()),
                InventoryError::InsufficientSeats {
                    requested,
                    available,
                } => BookingError::CapacityExceeded {
                    requested,
                    available,
                },
                other => BookingError::Inventory(other),
            })?;

        let booking = Booking::new(
            user_id.to_string(),
            experience_id,
            slot_id,
            participants,
            self.currency.clone(),
        );
        tracing::info!(
            booking_id = %booking.id,
            %slot_id,
            participants,
            "slot reserved, booking tentative"
        );
        self.ledger.append(booking.clone());

        Ok(booking)
    }

    /// Create the payment order for a tentative booking: records the amount
    /// and a generated order reference on the record and returns the
    /// reference for the gateway hand-off.
    pub fn create_order(&mut self, booking_id: &Uuid, amount: i64) -> Result<String, BookingError> {
        let booking = self
            .ledger
            .find_mut(booking_id)
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

        if !booking.is_tentative() {
            return Err(BookingError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "ORDER_CREATED".to_string(),
            });
        }

        let reference = generate_order_reference(booking_id);
        booking.attach_order(reference.clone(), amount);
        tracing::info!(%booking_id, amount, reference = %reference, "payment order created");

        Ok(reference)
    }

    /// Transition: Tentative -> Confirmed. Commits the held seats and stamps
    /// the payment reference onto the record.
    pub fn confirm(
        &mut self,
        booking_id: &Uuid,
        payment_reference: &str,
    ) -> Result<Booking, BookingError> {
        let (slot_id, participants) = {
            let booking = self
                .ledger
                .find(booking_id)
                .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

            if !booking.is_tentative() {
                return Err(BookingError::InvalidTransition {
                    from: format!("{:?}", booking.status),
                    to: "CONFIRMED".to_string(),
                });
            }
            (booking.slot_id, booking.participants)
        };

        self.inventory.commit(&slot_id, participants)?;

        let booking = self
            .ledger
            .find_mut(booking_id)
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;
        booking.confirm(payment_reference.to_string());
        tracing::info!(%booking_id, payment_reference, "booking confirmed");

        Ok(booking.clone())
    }

    /// Transition: Tentative -> Cancelled. Releases the held seats back to
    /// the pool.
    pub fn cancel(&mut self, booking_id: &Uuid) -> Result<Booking, BookingError> {
        let (slot_id, participants) = {
            let booking = self
                .ledger
                .find(booking_id)
                .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

            if !booking.is_tentative() {
                return Err(BookingError::InvalidTransition {
                    from: format!("{:?}", booking.status),
                    to: "CANCELLED".to_string(),
                });
            }
            (booking.slot_id, booking.participants)
        };

        self.inventory.release(&slot_id, participants)?;

        let booking = self
            .ledger
            .find_mut(booking_id)
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;
        booking.cancel();
        tracing::info!(%booking_id, "booking cancelled");

        Ok(booking.clone())
    }

    /// A user's confirmed bookings, newest first
    pub fn confirmed_for_user(&self, user_id: &str) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .ledger
            .bookings_for_user(user_id)
            .into_iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    /// A user's confirmed bookings partitioned by slot start time relative
    /// to `now`. Bookings whose slot cannot be resolved in the catalog are
    /// left out of both sides.
    pub fn history(
        &self,
        user_id: &str,
        catalog: &ExperienceCatalog,
        now: DateTime<Utc>,
    ) -> BookingHistory {
        let mut history = BookingHistory::default();

        for booking in self.confirmed_for_user(user_id) {
            match catalog.slot_start(&booking.slot_id) {
                Some(starts_at) if starts_at >= now => history.upcoming.push(booking),
                Some(_) => history.past.push(booking),
                None => {}
            }
        }

        history
    }
}

/// Confirmed bookings split around the evaluation instant
#[derive(Debug, Default, Clone)]
pub struct BookingHistory {
    pub upcoming: Vec<Booking>,
    pub past: Vec<Booking>,
}

fn generate_order_reference(booking_id: &Uuid) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let short_id = &booking_id.simple().to_string()[..8];
    format!("order_rcptid_{}_{}", timestamp, short_id)
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Participant count must be at least 1")]
    InvalidParticipants,

    #[error("Capacity exceeded: requested {requested}, available {available}")]
    CapacityExceeded { requested: u32, available: u32 },

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
