use crate::manager::BookingLifecycleManager;
use crate::models::Booking;
use chrono::{DateTime, Duration, Utc};

/// Retention policy for abandoned payment flows: a tentative booking older
/// than the hold window is cancelled and its seats released. Records stay in
/// the ledger; nothing is physically deleted.
impl BookingLifecycleManager {
    pub fn expire_abandoned(&mut self, now: DateTime<Utc>, hold: Duration) -> Vec<Booking> {
        let cutoff = now - hold;
        let stale = self.ledger().tentative_before(cutoff);
        let mut expired = Vec::new();

        for booking_id in stale {
            match self.cancel(&booking_id) {
                Ok(booking) => expired.push(booking),
                Err(e) => {
                    tracing::warn!(%booking_id, error = %e, "failed to expire tentative booking")
                }
            }
        }

        if !expired.is_empty() {
            tracing::info!(expired = expired.len(), "swept abandoned tentative bookings");
        }

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use escape_catalog::{experience::Slot, SlotInventory};
    use uuid::Uuid;

    #[test]
    fn sweep_cancels_only_stale_tentative_bookings() {
        let slot = Slot::new(Utc::now() + Duration::days(1), 10, 1500);
        let slot_id = slot.id;
        let mut inventory = SlotInventory::new();
        inventory.track(&slot);
        let mut manager = BookingLifecycleManager::new(inventory, "INR");

        let stale = manager.reserve("u_1", Uuid::new_v4(), slot_id, 2).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let fresh = manager.reserve("u_1", Uuid::new_v4(), slot_id, 1).unwrap();
        let paid = manager.reserve("u_1", Uuid::new_v4(), slot_id, 1).unwrap();
        manager.confirm(&paid.id, "pay_1").unwrap();

        // only the first booking predates the hold window
        let expired = manager.expire_abandoned(Utc::now(), Duration::milliseconds(50));

        assert_eq!(expired.len(), 1);
        assert_eq!(
            manager.ledger().find(&stale.id).unwrap().status,
            BookingStatus::Cancelled
        );
        assert_eq!(
            manager.ledger().find(&fresh.id).unwrap().status,
            BookingStatus::Tentative
        );
        assert_eq!(
            manager.ledger().find(&paid.id).unwrap().status,
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn sweep_releases_held_seats() {
        let slot = Slot::new(Utc::now() + Duration::days(1), 6, 1500);
        let slot_id = slot.id;
        let mut inventory = SlotInventory::new();
        inventory.track(&slot);
        let mut manager = BookingLifecycleManager::new(inventory, "INR");

        manager.reserve("u_1", Uuid::new_v4(), slot_id, 4).unwrap();
        assert_eq!(manager.inventory().available(&slot_id), Some(2));

        // everything tentative is stale relative to a future instant
        let expired = manager.expire_abandoned(Utc::now() + Duration::days(1), Duration::seconds(900));

        assert_eq!(expired.len(), 1);
        assert_eq!(manager.inventory().available(&slot_id), Some(6));
    }

    #[test]
    fn sweep_with_nothing_stale_is_a_noop() {
        let slot = Slot::new(Utc::now() + Duration::days(1), 6, 1500);
        let slot_id = slot.id;
        let mut inventory = SlotInventory::new();
        inventory.track(&slot);
        let mut manager = BookingLifecycleManager::new(inventory, "INR");

        manager.reserve("u_1", Uuid::new_v4(), slot_id, 1).unwrap();
        let expired = manager.expire_abandoned(Utc::now(), Duration::seconds(900));

        assert!(expired.is_empty());
        assert_eq!(manager.inventory().available(&slot_id), Some(5));
    }
}
