use crate::error::ServiceError;
use chrono::Utc;
use escape_booking::{
    Booking, BookingError, BookingHistory, BookingLifecycleManager, PaymentOrchestrator,
};
use escape_catalog::{Experience, ExperienceCatalog, SlotInventory};
use escape_core::identity::{generate_user_id, validate_email, User, UserStore, GUEST_EMAIL};
use escape_core::payment::{
    PaymentAdapter, PaymentDetails, PaymentIntent, PaymentMethod, PaymentStatus,
};
use escape_shared::models::events::{
    BookingCancelledEvent, BookingConfirmedEvent, DomainEvent, SlotReservedEvent,
};
use escape_shared::{Category, Masked};
use escape_store::{BusinessRules, Config};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use uuid::Uuid;

/// Composition root the presentation layer talks to. Owns the lifecycle
/// manager behind an async mutex (one writer at a time gives the seat
/// accounting its atomic check-and-decrement), shares the read-only catalog,
/// and fans lifecycle events out over a broadcast channel.
pub struct EscapeService {
    catalog: Arc<ExperienceCatalog>,
    manager: Arc<Mutex<BookingLifecycleManager>>,
    users: Arc<dyn UserStore>,
    current_user: Arc<RwLock<User>>,
    orchestrator: PaymentOrchestrator,
    events_tx: broadcast::Sender<DomainEvent>,
    rules: BusinessRules,
}

impl EscapeService {
    pub async fn new(
        config: &Config,
        catalog: ExperienceCatalog,
        users: Arc<dyn UserStore>,
        adapter: Arc<dyn PaymentAdapter>,
    ) -> Result<Self, ServiceError> {
        let current_user = match users.load().await.map_err(ServiceError::store)? {
            Some(user) => user,
            None => User::guest(),
        };
        tracing::info!(user_id = %current_user.id, "identity loaded");

        let mut inventory = SlotInventory::new();
        for experience in catalog.iter() {
            for slot in &experience.slots {
                inventory.track(slot);
            }
        }

        let manager =
            BookingLifecycleManager::new(inventory, config.payment.currency.clone());
        let (events_tx, _) = broadcast::channel(100);

        Ok(Self {
            catalog: Arc::new(catalog),
            manager: Arc::new(Mutex::new(manager)),
            users,
            current_user: Arc::new(RwLock::new(current_user)),
            orchestrator: PaymentOrchestrator::new(adapter),
            events_tx,
            rules: config.business_rules.clone(),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events_tx.subscribe()
    }

    pub fn business_rules(&self) -> &BusinessRules {
        &self.rules
    }

    // --- identity ---

    pub async fn current_user(&self) -> User {
        self.current_user.read().await.clone()
    }

    pub async fn signup(&self, name: &str, email: &str) -> Result<User, ServiceError> {
        validate_email(email)?;

        let mut user = self.current_user.write().await;
        let previous = user.clone();

        user.id = generate_user_id();
        user.name = name.to_string();
        user.email = Masked(email.to_string());
        user.favorites.clear();
        user.following.clear();

        if let Err(e) = self.users.save(&user).await {
            *user = previous;
            return Err(ServiceError::store(e));
        }
        Ok(user.clone())
    }

    /// Promotes the guest identity on first login; an already-promoted user
    /// just gets the current record back.
    pub async fn login(&self, email: &str) -> Result<User, ServiceError> {
        validate_email(email)?;

        let mut user = self.current_user.write().await;

        if user.is_guest() && email != GUEST_EMAIL {
            let previous = user.clone();
            user.name = display_name_from_email(email);
            user.email = Masked(email.to_string());
            user.id = generate_user_id();

            if let Err(e) = self.users.save(&user).await {
                *user = previous;
                return Err(ServiceError::store(e));
            }
        }
        Ok(user.clone())
    }

    pub async fn update_interests(
        &self,
        user_id: &str,
        interests: Vec<Category>,
    ) -> Result<User, ServiceError> {
        let mut user = self.current_user.write().await;

        if user.id == user_id {
            let previous = std::mem::replace(&mut user.interests, interests);
            if let Err(e) = self.users.save(&user).await {
                user.interests = previous;
                return Err(ServiceError::store(e));
            }
        }
        Ok(user.clone())
    }

    // --- social ---

    /// Optimistic flip, persisted write-through; the flip is reverted when
    /// persistence fails so display state never diverges from the record.
    pub async fn toggle_favorite(&self, experience_id: Uuid) -> Result<bool, ServiceError> {
        let mut user = self.current_user.write().await;
        let new_state = user.toggle_favorite(experience_id);

        if let Err(e) = self.users.save(&user).await {
            user.toggle_favorite(experience_id);
            return Err(ServiceError::store(e));
        }
        Ok(new_state)
    }

    pub async fn toggle_follow(&self, host_name: &str) -> Result<bool, ServiceError> {
        let mut user = self.current_user.write().await;
        let new_state = user.toggle_follow(host_name);

        if let Err(e) = self.users.save(&user).await {
            user.toggle_follow(host_name);
            return Err(ServiceError::store(e));
        }
        Ok(new_state)
    }

    pub async fn favorites(&self) -> Vec<Experience> {
        let user = self.current_user.read().await;
        user.favorites
            .iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect()
    }

    // --- catalog ---

    pub fn experiences(&self) -> Vec<Experience> {
        self.catalog.list().into_iter().cloned().collect()
    }

    pub fn experience(&self, id: &Uuid) -> Option<Experience> {
        self.catalog.get(id).cloned()
    }

    pub fn experience_by_slot(&self, slot_id: &Uuid) -> Option<Experience> {
        self.catalog.find_by_slot(slot_id).cloned()
    }

    // --- booking flow ---

    pub async fn reserve_slot(
        &self,
        experience_id: Uuid,
        slot_id: Uuid,
        participants: u32,
    ) -> Result<Booking, ServiceError> {
        let (owner, _) = self
            .catalog
            .slot(&slot_id)
            .ok_or(ServiceError::SlotNotFound(slot_id))?;
        if owner.id != experience_id {
            return Err(ServiceError::SlotNotFound(slot_id));
        }

        let user_id = self.current_user.read().await.id.clone();
        let booking = self
            .manager
            .lock()
            .await
            .reserve(&user_id, experience_id, slot_id, participants)?;

        let _ = self.events_tx.send(DomainEvent::SlotReserved(SlotReservedEvent {
            booking_id: booking.id,
            experience_id,
            slot_id,
            user_id,
            participants,
            reserved_at: Utc::now().timestamp(),
        }));

        Ok(booking)
    }

    /// Creates the payment order for a tentative booking. The amount is
    /// derived here, from the slot price and the reserved participant count.
    pub async fn create_payment_order(&self, booking_id: &Uuid) -> Result<String, ServiceError> {
        let mut manager = self.manager.lock().await;

        let (slot_id, participants) = {
            let booking = manager
                .ledger()
                .find(booking_id)
                .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;
            (booking.slot_id, booking.participants)
        };

        let (_, slot) = self
            .catalog
            .slot(&slot_id)
            .ok_or(ServiceError::SlotNotFound(slot_id))?;
        let amount = slot.price * i64::from(participants);

        Ok(manager.create_order(booking_id, amount)?)
    }

    pub fn validate_payment_details(
        &self,
        method: Option<PaymentMethod>,
        details: &PaymentDetails,
    ) -> bool {
        details.is_valid_for(method)
    }

    /// Runs the full payment leg: field validation, gateway charge against
    /// the recorded order, then confirmation with the gateway's reference.
    pub async fn submit_payment(
        &self,
        booking_id: &Uuid,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> Result<Booking, ServiceError> {
        if !details.is_valid_for(Some(method)) {
            return Err(ServiceError::InvalidPaymentDetails);
        }

        // snapshot under the lock, charge outside it
        let intent = {
            let manager = self.manager.lock().await;
            let booking = manager
                .ledger()
                .find(booking_id)
                .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;
            let order_reference = booking
                .order_reference
                .clone()
                .ok_or(ServiceError::OrderNotInitialized(*booking_id))?;

            PaymentIntent {
                id: order_reference,
                booking_id: *booking_id,
                amount: booking.total_amount,
                currency: booking.currency.clone(),
                status: PaymentStatus::Processing,
                reference: None,
                created_at: Utc::now(),
            }
        };

        let settled = self
            .orchestrator
            .process_payment(&intent, method)
            .await
            .map_err(|e| ServiceError::Gateway(e.to_string()))?;

        if settled.status != PaymentStatus::Succeeded {
            return Err(ServiceError::PaymentDeclined(format!("{:?}", settled.status)));
        }
        let reference = settled
            .reference
            .ok_or_else(|| ServiceError::Gateway("settled payment carried no reference".to_string()))?;

        let confirmed = self.manager.lock().await.confirm(booking_id, &reference)?;

        let _ = self
            .events_tx
            .send(DomainEvent::BookingConfirmed(BookingConfirmedEvent {
                booking_id: confirmed.id,
                slot_id: confirmed.slot_id,
                user_id: confirmed.user_id.clone(),
                total_amount: confirmed.total_amount,
                payment_reference: reference,
                confirmed_at: Utc::now().timestamp(),
            }));

        Ok(confirmed)
    }

    // --- queries ---

    pub async fn user_bookings(&self, user_id: &str) -> Vec<Booking> {
        self.manager.lock().await.confirmed_for_user(user_id)
    }

    pub async fn booking_history(&self, user_id: &str) -> BookingHistory {
        self.manager
            .lock()
            .await
            .history(user_id, &self.catalog, Utc::now())
    }

    // --- housekeeping ---

    /// Cancels tentative bookings that outlived the configured hold window;
    /// returns how many were swept.
    pub async fn expire_abandoned(&self) -> usize {
        let hold = chrono::Duration::seconds(self.rules.tentative_hold_seconds as i64);
        let cancelled = self.manager.lock().await.expire_abandoned(Utc::now(), hold);

        for booking in &cancelled {
            let _ = self
                .events_tx
                .send(DomainEvent::BookingCancelled(BookingCancelledEvent {
                    booking_id: booking.id,
                    slot_id: booking.slot_id,
                    participants: booking.participants,
                    cancelled_at: Utc::now().timestamp(),
                }));
        }

        cancelled.len()
    }
}

fn display_name_from_email(email: &str) -> String {
    let name = email.split('@').next().unwrap_or(email);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_capitalizes_email_prefix() {
        assert_eq!(display_name_from_email("jane@escape.app"), "Jane");
        assert_eq!(display_name_from_email("j@x"), "J");
    }
}
