use crate::database::repositories::PriceRecordRepository;
use crate::database::models::NewPriceRecord;
use crate::database::DatabaseError;
use crate::quotes::{FetchError, QuoteClient};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Why a reconciliation left the store untouched
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Result of reconciling one tracked symbol
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// No record existed; one was created from the fetched quote
    Created,
    /// An existing record's price fields were overwritten
    Updated,
    /// The store was left untouched
    Skipped(SkipReason),
}

impl std::fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// Reconciler - brings one symbol's stored record in line with its latest quote
///
/// Read existing record, fetch quote, create-or-update. An upstream failure
/// never propagates past this boundary and never mutates the store: an
/// existing record keeps its last good values until the next successful fetch.
pub struct Reconciler {
    repository: Arc<dyn PriceRecordRepository>,
    quote_client: Arc<dyn QuoteClient>,
    // Per-symbol mutual exclusion: two concurrent reconciliations for the
    // same symbol must not interleave their read and write steps.
    symbol_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Reconciler {
    pub fn new(
        repository: Arc<dyn PriceRecordRepository>,
        quote_client: Arc<dyn QuoteClient>,
    ) -> Self {
        Self {
            repository,
            quote_client,
            symbol_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, symbol: &str) -> Arc<Mutex<()>> {
        self.symbol_locks
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Reconcile one tracked symbol
    ///
    /// Holds the symbol's lock across the whole read-fetch-write sequence.
    /// Distinct symbols reconcile fully independently.
    pub async fn reconcile(&self, symbol: &str) -> ReconcileOutcome {
        let lock = self.lock_for(symbol);
        let _guard = lock.lock().await;

        let existing = match self.repository.find_by_name(symbol) {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!("Failed to load stored record for '{}': {}", symbol, e);
                return ReconcileOutcome::Skipped(SkipReason::Store(e));
            }
        };

        let quote = match self.quote_client.fetch(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                // A failed fetch must never null out or zero an existing
                // record; the next tick is the retry.
                tracing::warn!(
                    "Quote fetch for '{}' failed, leaving stored record untouched: {}",
                    symbol,
                    e
                );
                return ReconcileOutcome::Skipped(SkipReason::Fetch(e));
            }
        };

        match existing {
            None => {
                let new_record = NewPriceRecord::new(symbol, quote.price, quote.base_price);
                match self.repository.insert(new_record) {
                    Ok(record) => {
                        tracing::info!(
                            "Created price record '{}' (id {}): price={}, base_price={}",
                            symbol,
                            record.id,
                            record.price,
                            record.base_price
                        );
                        ReconcileOutcome::Created
                    }
                    Err(e) => {
                        tracing::error!("Failed to create record for '{}': {}", symbol, e);
                        ReconcileOutcome::Skipped(SkipReason::Store(e))
                    }
                }
            }
            Some(record) => {
                match self
                    .repository
                    .update_prices(record.id, quote.price, quote.base_price)
                {
                    Ok(updated) => {
                        tracing::info!(
                            "Updated price record '{}' (id {}): price={}, base_price={}",
                            symbol,
                            updated.id,
                            updated.price,
                            updated.base_price
                        );
                        ReconcileOutcome::Updated
                    }
                    Err(e) => {
                        tracing::error!("Failed to update record for '{}': {}", symbol, e);
                        ReconcileOutcome::Skipped(SkipReason::Store(e))
                    }
                }
            }
        }
    }
}
