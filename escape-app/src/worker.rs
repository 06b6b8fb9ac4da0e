use crate::service::EscapeService;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

/// Long-running housekeeping loop: every sweep interval, cancel tentative
/// bookings that outlived the hold window. Spawn with tokio::spawn; the loop
/// ends when the runtime shuts down.
pub async fn run_expiry_worker(service: Arc<EscapeService>) {
    let every = Duration::from_secs(service.business_rules().expiry_sweep_seconds);
    let mut ticker = interval(every);

    info!(sweep_seconds = every.as_secs(), "expiry worker started");

    loop {
        ticker.tick().await;
        let expired = service.expire_abandoned().await;
        if expired > 0 {
            info!(expired, "expiry sweep cancelled abandoned bookings");
        }
    }
}
