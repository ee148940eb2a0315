pub mod database;
pub mod init;
pub mod store;

pub use database::PgStore;
pub use init::{initialize_store, InitOutcome};
pub use store::{ItemStore, SeedOutcome, StoreError, StoreErrorKind};
