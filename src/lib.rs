// Library Crate Root
// lib.rs

pub mod api;
pub mod config;
pub mod database;
pub mod quotes;
pub mod sync;

// pub use = re-export at crate root
pub use api::{create_router, AppState};
pub use config::SyncConfig;
pub use database::{Database, DatabaseError};
pub use quotes::{FetchError, HttpQuoteClient, Quote, QuoteClient};
pub use sync::{PriceSyncScheduler, ReconcileOutcome, SyncEngine, SyncReport};
