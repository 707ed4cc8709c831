use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Price record entity - the stored price of one tracked symbol
///
/// Keyed logically by `name` (unique): at most one record per tracked symbol
/// exists at any time. The sync engine creates a record on the first
/// successful reconciliation and overwrites `price`/`base_price` on every
/// subsequent one; records are never deleted by the engine.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::price_records)]
pub struct PriceRecord {
    /// Store-assigned surrogate id
    pub id: i64,

    /// Tracked symbol name (e.g., "euro", "dollar")
    pub name: String,

    /// Last quoted price
    pub price: i64,

    /// Last quoted base price
    pub base_price: i64,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the last successful sync from the upstream provider
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// New price record for insertion
#[derive(Debug, Clone, Insertable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::price_records)]
pub struct NewPriceRecord {
    pub name: String,
    pub price: i64,
    pub base_price: i64,
}

impl NewPriceRecord {
    pub fn new(name: impl Into<String>, price: i64, base_price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            base_price,
        }
    }
}
