use crate::experience::Slot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Seat counters for one slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSeats {
    pub slot_id: Uuid,
    pub seats_available: u32,
    pub total_seats: u32,
    pub seats_reserved: u32,
}

/// In-memory seat accounting. Reservations move seats from available to
/// reserved; confirmation commits them; cancellation releases them. All
/// movement happens under `&mut self`, so a caller holding exclusive access
/// gets an atomic check-and-decrement.
#[derive(Debug, Default)]
pub struct SlotInventory {
    seats: HashMap<Uuid, SlotSeats>,
}

impl SlotInventory {
    pub fn new() -> Self {
        Self {
            seats: HashMap::new(),
        }
    }

    /// Start tracking a slot at its catalog counters
    pub fn track(&mut self, slot: &Slot) {
        self.seats.insert(
            slot.id,
            SlotSeats {
                slot_id: slot.id,
                seats_available: slot.seats_available,
                total_seats: slot.total_seats,
                seats_reserved: 0,
            },
        );
    }

    pub fn get(&self, slot_id: &Uuid) -> Option<&SlotSeats> {
        self.seats.get(slot_id)
    }

    pub fn available(&self, slot_id: &Uuid) -> Option<u32> {
        self.seats.get(slot_id).map(|s| s.seats_available)
    }

    /// Hold seats for a tentative booking
    pub fn reserve(&mut self, slot_id: &Uuid, quantity: u32) -> Result<(), InventoryError> {
        let seats = self
            .seats
            .get_mut(slot_id)
            .ok_or_else(|| InventoryError::NotFound(slot_id.to_string()))?;

        if seats.seats_available < quantity {
            return Err(InventoryError::InsufficientSeats {
                requested: quantity,
                available: seats.seats_available,
            });
        }

        seats.seats_available -= quantity;
        seats.seats_reserved += quantity;
        tracing::debug!(%slot_id, quantity, available = seats.seats_available, "seats reserved");

        Ok(())
    }

    /// Return held seats to the pool (abandoned or cancelled booking)
    pub fn release(&mut self, slot_id: &Uuid, quantity: u32) -> Result<(), InventoryError> {
        let seats = self
            .seats
            .get_mut(slot_id)
            .ok_or_else(|| InventoryError::NotFound(slot_id.to_string()))?;

        let returned = quantity.min(seats.seats_reserved);
        seats.seats_available = (seats.seats_available + returned).min(seats.total_seats);
        seats.seats_reserved -= returned;

        Ok(())
    }

    /// Consume held seats for good (booking confirmed)
    pub fn commit(&mut self, slot_id: &Uuid, quantity: u32) -> Result<(), InventoryError> {
        let seats = self
            .seats
            .get_mut(slot_id)
            .ok_or_else(|| InventoryError::NotFound(slot_id.to_string()))?;

        if seats.seats_reserved < quantity {
            return Err(InventoryError::InsufficientReserved {
                requested: quantity,
                reserved: seats.seats_reserved,
            });
        }

        seats.seats_reserved -= quantity;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Slot not tracked: {0}")]
    NotFound(String),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: u32 },

    #[error("Insufficient reserved seats: requested {requested}, reserved {reserved}")]
    InsufficientReserved { requested: u32, reserved: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn tracked_slot(inventory: &mut SlotInventory, seats: u32) -> Uuid {
        let slot = Slot::new(Utc::now() + Duration::days(1), seats, 1800);
        inventory.track(&slot);
        slot.id
    }

    #[test]
    fn reserve_commit_lifecycle() {
        let mut inventory = SlotInventory::new();
        let slot_id = tracked_slot(&mut inventory, 10);

        inventory.reserve(&slot_id, 2).unwrap();
        assert_eq!(inventory.get(&slot_id).unwrap().seats_available, 8);
        assert_eq!(inventory.get(&slot_id).unwrap().seats_reserved, 2);

        inventory.commit(&slot_id, 2).unwrap();
        assert_eq!(inventory.get(&slot_id).unwrap().seats_available, 8);
        assert_eq!(inventory.get(&slot_id).unwrap().seats_reserved, 0);
    }

    #[test]
    fn release_returns_seats_to_pool() {
        let mut inventory = SlotInventory::new();
        let slot_id = tracked_slot(&mut inventory, 5);

        inventory.reserve(&slot_id, 3).unwrap();
        inventory.release(&slot_id, 3).unwrap();

        let seats = inventory.get(&slot_id).unwrap();
        assert_eq!(seats.seats_available, 5);
        assert_eq!(seats.seats_reserved, 0);
    }

    #[test]
    fn oversell_is_rejected() {
        let mut inventory = SlotInventory::new();
        let slot_id = tracked_slot(&mut inventory, 2);

        let err = inventory.reserve(&slot_id, 3).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientSeats { requested: 3, available: 2 }
        ));

        // the failed attempt must not move any counters
        assert_eq!(inventory.get(&slot_id).unwrap().seats_available, 2);
    }

    #[test]
    fn commit_more_than_reserved_is_rejected() {
        let mut inventory = SlotInventory::new();
        let slot_id = tracked_slot(&mut inventory, 4);

        inventory.reserve(&slot_id, 1).unwrap();
        assert!(inventory.commit(&slot_id, 2).is_err());
    }
}
