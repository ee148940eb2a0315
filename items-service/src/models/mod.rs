//! Domain models for items-service.

mod item;

pub use item::{Item, SEED_ITEMS};
