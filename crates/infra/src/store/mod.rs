//! Stock record persistence.
//!
//! The service only sees the [`StockStore`] capability trait; concrete stores
//! are in-memory (dev/test) and Postgres (feature `postgres`).

use std::sync::Arc;

use thiserror::Error;

use sockwarehouse_core::StockId;
use sockwarehouse_inventory::StockRecord;

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryStockStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStockStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// `save` was given an id the store does not know.
    #[error("stock record {0} does not exist")]
    MissingRecord(StockId),

    /// A persisted row could not be mapped back into a record.
    #[error("corrupt stock record: {0}")]
    Corrupt(String),

    /// The backend failed (connection, query, poisoned lock).
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Persistence capability over stock records.
///
/// No ordering guarantee on returned sequences; results are unbounded.
#[async_trait::async_trait]
pub trait StockStore: Send + Sync {
    /// Exact match on (color, cotton part); color comparison is case-sensitive.
    async fn find_by_key(&self, color: &str, cotton_part: i32) -> Result<Option<StockRecord>, StoreError>;

    /// Records of `color` whose cotton part is strictly greater than `cotton_part`.
    async fn find_by_color_and_cotton_above(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError>;

    /// Records of `color` whose cotton part is strictly less than `cotton_part`.
    async fn find_by_color_and_cotton_below(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError>;

    async fn find_by_id(&self, id: StockId) -> Result<Option<StockRecord>, StoreError>;

    /// Insert when `record.id` is `None` (assigning an id), otherwise overwrite
    /// every field of the record with that id.
    async fn save(&self, record: StockRecord) -> Result<StockRecord, StoreError>;
}

#[async_trait::async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn find_by_key(&self, color: &str, cotton_part: i32) -> Result<Option<StockRecord>, StoreError> {
        (**self).find_by_key(color, cotton_part).await
    }

    async fn find_by_color_and_cotton_above(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        (**self).find_by_color_and_cotton_above(color, cotton_part).await
    }

    async fn find_by_color_and_cotton_below(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        (**self).find_by_color_and_cotton_below(color, cotton_part).await
    }

    async fn find_by_id(&self, id: StockId) -> Result<Option<StockRecord>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, record: StockRecord) -> Result<StockRecord, StoreError> {
        (**self).save(record).await
    }
}
