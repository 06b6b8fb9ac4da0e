pub mod models;
pub mod pii;

pub use models::category::Category;
pub use pii::Masked;
