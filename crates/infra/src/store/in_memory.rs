use std::sync::RwLock;

use sockwarehouse_core::StockId;
use sockwarehouse_inventory::{CottonComparison, StockRecord};

use super::{StockStore, StoreError};

/// In-memory stock store for tests/dev.
///
/// Rows are kept in insertion order, so when edits create duplicate keys
/// `find_by_key` returns the oldest one.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    inner: RwLock<Vec<StockRecord>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row (test/debug helper).
    pub fn all(&self) -> Vec<StockRecord> {
        match self.inner.read() {
            Ok(rows) => rows.clone(),
            Err(_) => vec![],
        }
    }

    fn filter(&self, color: &str, comparison: CottonComparison, cotton_part: i32) -> Result<Vec<StockRecord>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .filter(|r| r.color == color && comparison.matches(r.cotton_part, cotton_part))
            .cloned()
            .collect())
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("in-memory stock store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl StockStore for InMemoryStockStore {
    async fn find_by_key(&self, color: &str, cotton_part: i32) -> Result<Option<StockRecord>, StoreError> {
        Ok(self
            .filter(color, CottonComparison::Equal, cotton_part)?
            .into_iter()
            .next())
    }

    async fn find_by_color_and_cotton_above(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        self.filter(color, CottonComparison::GreaterThan, cotton_part)
    }

    async fn find_by_color_and_cotton_below(
        &self,
        color: &str,
        cotton_part: i32,
    ) -> Result<Vec<StockRecord>, StoreError> {
        self.filter(color, CottonComparison::LessThan, cotton_part)
    }

    async fn find_by_id(&self, id: StockId) -> Result<Option<StockRecord>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn save(&self, mut record: StockRecord) -> Result<StockRecord, StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        match record.id {
            None => {
                record.id = Some(StockId::new());
                rows.push(record.clone());
            }
            Some(id) => {
                let slot = rows
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or(StoreError::MissingRecord(id))?;
                *slot = record.clone();
            }
        }
        Ok(record)
    }
}
