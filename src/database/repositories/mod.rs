/// Repository pattern implementations
///
/// The sync engine and API handlers depend on the repository traits, not on
/// Diesel or the connection pool directly.
pub mod price_record_repository;

pub use price_record_repository::{PriceRecordRepository, PriceRecordRepositoryImpl};
