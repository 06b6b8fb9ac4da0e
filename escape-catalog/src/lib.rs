pub mod catalog;
pub mod experience;
pub mod inventory;

pub use catalog::ExperienceCatalog;
pub use experience::{Experience, Review, Slot};
pub use inventory::{InventoryError, SlotInventory};
