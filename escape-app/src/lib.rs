pub mod error;
pub mod service;
pub mod worker;

pub use error::ServiceError;
pub use service::EscapeService;
