/// Upstream quote provider integration
///
/// One outbound HTTP request per tracked symbol, parsed into a normalized
/// quote or reported as a fetch error. No retries here; the polling cadence
/// is the only retry mechanism.
pub mod client;
pub mod models;

pub use client::{FetchError, HttpQuoteClient, QuoteClient};
pub use models::Quote;
