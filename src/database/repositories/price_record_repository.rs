use crate::database::connection::{DatabaseError, PgPooledConnection};
use crate::database::models::{NewPriceRecord, PriceRecord};
use crate::database::schema::price_records;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

/// Price record repository trait - defines interface for price record operations
///
/// The sync engine depends on this trait, never on the concrete store.
#[async_trait::async_trait]
pub trait PriceRecordRepository: Send + Sync {
    /// Find record by store-assigned id
    fn find_by_id(&self, record_id: i64) -> Result<Option<PriceRecord>, DatabaseError>;

    /// Find record by symbol name (the logical store key)
    fn find_by_name(&self, name: &str) -> Result<Option<PriceRecord>, DatabaseError>;

    /// Get all records with limit/offset pagination
    fn get_all(&self, limit: i64, offset: i64) -> Result<Vec<PriceRecord>, DatabaseError>;

    /// Insert a new record
    fn insert(&self, new_record: NewPriceRecord) -> Result<PriceRecord, DatabaseError>;

    /// Overwrite price fields of an existing record
    ///
    /// Also stamps `updated_at` and `last_synced_at`. Returns
    /// `DatabaseError::NotFound` when no record with `record_id` exists.
    fn update_prices(
        &self,
        record_id: i64,
        price: i64,
        base_price: i64,
    ) -> Result<PriceRecord, DatabaseError>;
}

/// Concrete implementation of PriceRecordRepository
///
/// Uses the PostgreSQL connection pool; each call acquires its own scoped
/// connection and releases it on every exit path.
pub struct PriceRecordRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync>,
}

impl PriceRecordRepositoryImpl {
    /// Create new price record repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

#[async_trait::async_trait]
impl PriceRecordRepository for PriceRecordRepositoryImpl {
    fn find_by_id(&self, record_id: i64) -> Result<Option<PriceRecord>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        price_records::table
            .filter(price_records::id.eq(record_id))
            .first::<PriceRecord>(&mut conn)
            .optional()
            .map_err(DatabaseError::from)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<PriceRecord>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        price_records::table
            .filter(price_records::name.eq(name))
            .first::<PriceRecord>(&mut conn)
            .optional()
            .map_err(DatabaseError::from)
    }

    fn get_all(&self, limit: i64, offset: i64) -> Result<Vec<PriceRecord>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        price_records::table
            .order(price_records::id.asc())
            .limit(limit)
            .offset(offset)
            .load::<PriceRecord>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn insert(&self, new_record: NewPriceRecord) -> Result<PriceRecord, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::insert_into(price_records::table)
            .values(&new_record)
            .get_result::<PriceRecord>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn update_prices(
        &self,
        record_id: i64,
        price: i64,
        base_price: i64,
    ) -> Result<PriceRecord, DatabaseError> {
        let mut conn = (self.get_conn)()?;
        let now = Utc::now();

        diesel::update(price_records::table)
            .filter(price_records::id.eq(record_id))
            .set((
                price_records::price.eq(price),
                price_records::base_price.eq(base_price),
                price_records::updated_at.eq(now),
                price_records::last_synced_at.eq(Some(now)),
            ))
            .get_result::<PriceRecord>(&mut conn)
            .optional()?
            .ok_or_else(|| {
                DatabaseError::NotFound(format!("price record with id {} not found", record_id))
            })
    }
}
