use crate::models::{Booking, BookingStatus};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Append-mostly in-memory collection of every booking created during the
/// process lifetime. Owned exclusively by the lifecycle manager; records are
/// never physically deleted, and nothing here survives a restart.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: HashMap<Uuid, Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn append(&mut self, booking: Booking) {
        tracing::debug!(booking_id = %booking.id, "booking appended to ledger");
        self.bookings.insert(booking.id, booking);
    }

    pub fn find(&self, id: &Uuid) -> Option<&Booking> {
        self.bookings.get(id)
    }

    pub fn find_mut(&mut self, id: &Uuid) -> Option<&mut Booking> {
        self.bookings.get_mut(id)
    }

    /// Mutate an existing record's status in place. Transition legality is
    /// the manager's job; the ledger only applies the update.
    pub fn update_status(
        &mut self,
        id: &Uuid,
        status: BookingStatus,
        payment_reference: Option<String>,
    ) -> Option<&Booking> {
        let booking = self.bookings.get_mut(id)?;
        booking.status = status;
        if payment_reference.is_some() {
            booking.payment_reference = payment_reference;
        }
        booking.updated_at = Utc::now();
        Some(booking)
    }

    /// Copies of one user's bookings, unordered
    pub fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        self.bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Ids of tentative bookings created before the cutoff
    pub fn tentative_before(&self, cutoff: DateTime<Utc>) -> Vec<Uuid> {
        self.bookings
            .values()
            .filter(|b| b.status == BookingStatus::Tentative && b.created_at < cutoff)
            .map(|b| b.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_for(user: &str) -> Booking {
        Booking::new(
            user.to_string(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            1,
            "INR".to_string(),
        )
    }

    #[test]
    fn append_and_find() {
        let mut ledger = BookingLedger::new();
        let booking = booking_for("u_1");
        let id = booking.id;
        ledger.append(booking);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.find(&id).unwrap().user_id, "u_1");
        assert!(ledger.find(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn update_status_keeps_existing_payment_reference() {
        let mut ledger = BookingLedger::new();
        let booking = booking_for("u_1");
        let id = booking.id;
        ledger.append(booking);

        ledger.update_status(&id, BookingStatus::Confirmed, Some("pay_9".to_string()));
        // a re-applied update without a reference must not erase the audit trail
        ledger.update_status(&id, BookingStatus::Confirmed, None);

        let stored = ledger.find(&id).unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.payment_reference.as_deref(), Some("pay_9"));

        assert!(ledger
            .update_status(&Uuid::new_v4(), BookingStatus::Confirmed, None)
            .is_none());
    }

    #[test]
    fn filter_by_user_returns_copies() {
        let mut ledger = BookingLedger::new();
        ledger.append(booking_for("u_1"));
        ledger.append(booking_for("u_1"));
        ledger.append(booking_for("u_2"));

        let mut mine = ledger.bookings_for_user("u_1");
        assert_eq!(mine.len(), 2);

        // mutating the copies must not touch the ledger
        for b in mine.iter_mut() {
            b.cancel();
        }
        assert!(ledger
            .bookings_for_user("u_1")
            .iter()
            .all(|b| b.status == BookingStatus::Tentative));
    }
}
