pub mod app_config;
pub mod user_store;

pub use app_config::{BusinessRules, Config, PaymentConfig, StorageConfig};
pub use user_store::{FileUserStore, StoreError};
