//! In-memory collaborators for sync engine tests.

use crate::database::models::{NewPriceRecord, PriceRecord};
use crate::database::repositories::PriceRecordRepository;
use crate::database::DatabaseError;
use crate::quotes::{FetchError, Quote, QuoteClient};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory price store implementing the repository trait
pub struct InMemoryPriceStore {
    records: Mutex<Vec<PriceRecord>>,
    next_id: AtomicI64,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a record directly, bypassing the repository interface
    pub fn seed(&self, name: &str, price: i64, base_price: i64) -> PriceRecord {
        let record = self.make_record(name, price, base_price);
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn make_record(&self, name: &str, price: i64, base_price: i64) -> PriceRecord {
        let now = Utc::now();
        PriceRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            price,
            base_price,
            created_at: now,
            updated_at: now,
            last_synced_at: None,
        }
    }
}

#[async_trait::async_trait]
impl PriceRecordRepository for InMemoryPriceStore {
    fn find_by_id(&self, record_id: i64) -> Result<Option<PriceRecord>, DatabaseError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == record_id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<PriceRecord>, DatabaseError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.name == name).cloned())
    }

    fn get_all(&self, limit: i64, offset: i64) -> Result<Vec<PriceRecord>, DatabaseError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn insert(&self, new_record: NewPriceRecord) -> Result<PriceRecord, DatabaseError> {
        let record = self.make_record(&new_record.name, new_record.price, new_record.base_price);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    fn update_prices(
        &self,
        record_id: i64,
        price: i64,
        base_price: i64,
    ) -> Result<PriceRecord, DatabaseError> {
        let mut records = self.records.lock().unwrap();
        let record = records.iter_mut().find(|r| r.id == record_id).ok_or_else(|| {
            DatabaseError::NotFound(format!("price record with id {} not found", record_id))
        })?;

        record.price = price;
        record.base_price = base_price;
        record.updated_at = Utc::now();
        record.last_synced_at = Some(record.updated_at);
        Ok(record.clone())
    }
}

enum FetchKind {
    Quote { price: i64, base_price: i64 },
    Fail,
    Panic,
}

/// One scripted response for the quote client
pub struct ScriptedFetch {
    kind: FetchKind,
    delay: Duration,
}

impl ScriptedFetch {
    pub fn quote(price: i64, base_price: i64) -> Self {
        Self {
            kind: FetchKind::Quote { price, base_price },
            delay: Duration::ZERO,
        }
    }

    pub fn fail() -> Self {
        Self {
            kind: FetchKind::Fail,
            delay: Duration::ZERO,
        }
    }

    pub fn panic() -> Self {
        Self {
            kind: FetchKind::Panic,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Quote client that replays scripted responses per symbol, in order
///
/// An unscripted fetch fails, so tests never silently succeed on a symbol
/// they forgot to script.
pub struct ScriptedQuoteClient {
    scripts: Mutex<HashMap<String, VecDeque<ScriptedFetch>>>,
}

impl ScriptedQuoteClient {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
        }
    }

    pub fn script(&self, symbol: &str, fetch: ScriptedFetch) {
        self.scripts
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push_back(fetch);
    }
}

#[async_trait::async_trait]
impl QuoteClient for ScriptedQuoteClient {
    async fn fetch(&self, symbol: &str) -> Result<Quote, FetchError> {
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(|queue| queue.pop_front());

        let scripted = match scripted {
            Some(scripted) => scripted,
            None => {
                return Err(FetchError::Malformed {
                    symbol: symbol.to_string(),
                    reason: "no scripted response".to_string(),
                })
            }
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        match scripted.kind {
            FetchKind::Quote { price, base_price } => Ok(Quote {
                symbol: symbol.to_string(),
                price,
                base_price,
            }),
            FetchKind::Fail => Err(FetchError::Status {
                url: format!("https://quotes.example.com/api/v1/item?q={}", symbol),
                status: 500,
                body: "upstream unavailable".to_string(),
            }),
            FetchKind::Panic => panic!("scripted quote client panic for '{}'", symbol),
        }
    }
}
