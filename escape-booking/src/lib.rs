pub mod expiry;
pub mod ledger;
pub mod manager;
pub mod models;
pub mod orchestrator;

pub use ledger::BookingLedger;
pub use manager::{BookingError, BookingHistory, BookingLifecycleManager};
pub use models::{Booking, BookingStatus};
pub use orchestrator::{MockPaymentAdapter, PaymentOrchestrator};
