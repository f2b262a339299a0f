//! Inventory application service.
//!
//! Applies the stock rules on top of a [`StockStore`]:
//!
//! ```text
//! income   -> lowercase color -> find-or-create by key -> add      -> save
//! outcome  -> find by key (caller casing) -> guard stock -> subtract -> save
//! total    -> lowercase color -> sum (moreThan/lessThan) or single quantity (equal)
//! update   -> find by id -> overwrite all fields verbatim -> save
//! batch    -> check file -> decode UTF-8 -> per line: parse -> income
//! ```
//!
//! Every call is independent. Nothing here locks across store calls, so two
//! concurrent movements on one key can lose an update (last write wins). Batch
//! lines each persist on their own; a failing line leaves earlier lines applied.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use sockwarehouse_core::{DomainError, StockId};
use sockwarehouse_inventory::{
    parse_batch_line, BatchUpload, CottonComparison, StockDelta, StockEvent, StockRecord,
};
use sockwarehouse_observability::{Observation, ObservationLevel, Observer};

use crate::store::{StockStore, StoreError};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unexpected failure while reading or applying a batch file.
    #[error("failed to process batch file: {0}")]
    BatchProcessing(#[source] BoxError),
}

impl ServiceError {
    fn batch(err: impl Into<BoxError>) -> Self {
        ServiceError::BatchProcessing(err.into())
    }
}

/// Result of a successful batch upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub file_name: Option<String>,
    pub lines_applied: usize,
}

pub struct InventoryService<S, O> {
    store: S,
    observer: O,
}

impl<S, O> InventoryService<S, O>
where
    S: StockStore,
    O: Observer,
{
    pub fn new(store: S, observer: O) -> Self {
        Self { store, observer }
    }

    fn emit(&self, event: StockEvent) {
        let level = if event.is_failure() {
            ObservationLevel::Warn
        } else {
            ObservationLevel::Info
        };
        let observation = Observation::new(event.event_type(), &event)
            .with_level(level)
            .at(event.occurred_at());
        self.observer.observe(&observation);
    }

    /// Add stock for a key, creating the record on first income.
    #[tracing::instrument(skip(self), fields(color = %delta.color, cotton_part = delta.cotton_part))]
    pub async fn register_income(&self, delta: &StockDelta) -> Result<StockRecord, ServiceError> {
        self.apply_income(delta.normalized()).await
    }

    /// `delta` must already carry a lowercased color.
    async fn apply_income(&self, delta: StockDelta) -> Result<StockRecord, ServiceError> {
        let mut record = self
            .store
            .find_by_key(&delta.color, delta.cotton_part)
            .await?
            .unwrap_or_else(|| StockRecord::empty(delta.color.clone(), delta.cotton_part));

        record.receive(delta.quantity)?;
        let saved = self.store.save(record).await?;

        self.emit(StockEvent::IncomeRegistered {
            id: saved.id,
            color: saved.color.clone(),
            cotton_part: saved.cotton_part,
            quantity: delta.quantity,
            stock_after: saved.quantity,
            occurred_at: Utc::now(),
        });
        Ok(saved)
    }

    /// Remove stock from an existing key.
    ///
    /// The lookup uses the color exactly as the caller sent it, unlike income,
    /// so `"Red"` will not find a record stored as `"red"`.
    #[tracing::instrument(skip(self), fields(color = %delta.color, cotton_part = delta.cotton_part))]
    pub async fn register_outcome(&self, delta: &StockDelta) -> Result<StockRecord, ServiceError> {
        let mut record = self
            .store
            .find_by_key(&delta.color, delta.cotton_part)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "no socks with color={} and cottonPart={}",
                    delta.color, delta.cotton_part
                ))
            })?;

        record.release(delta.quantity)?;
        let saved = self.store.save(record).await?;

        self.emit(StockEvent::OutcomeRegistered {
            id: saved.id,
            color: saved.color.clone(),
            cotton_part: saved.cotton_part,
            quantity: delta.quantity,
            stock_after: saved.quantity,
            occurred_at: Utc::now(),
        });
        Ok(saved)
    }

    /// Total stock of `color` whose cotton part compares to `cotton_part`.
    #[tracing::instrument(skip(self))]
    pub async fn total_socks(
        &self,
        color: &str,
        comparison: CottonComparison,
        cotton_part: i32,
    ) -> Result<u64, ServiceError> {
        let color = sockwarehouse_inventory::normalize_color(color);

        let total = match comparison {
            CottonComparison::GreaterThan => sum_quantities(
                self.store
                    .find_by_color_and_cotton_above(&color, cotton_part)
                    .await?,
            ),
            CottonComparison::LessThan => sum_quantities(
                self.store
                    .find_by_color_and_cotton_below(&color, cotton_part)
                    .await?,
            ),
            CottonComparison::Equal => self
                .store
                .find_by_key(&color, cotton_part)
                .await?
                .map(|r| u64::from(r.quantity))
                .unwrap_or(0),
        };

        self.emit(StockEvent::TotalQueried {
            color,
            comparison,
            cotton_part,
            total,
            occurred_at: Utc::now(),
        });
        Ok(total)
    }

    /// Overwrite color, cotton part and quantity of an existing record.
    ///
    /// Values are stored verbatim: no lowercasing and no check that the new
    /// key is free, so this can create a second record for an existing key.
    #[tracing::instrument(skip(self, delta))]
    pub async fn update_socks(&self, id: StockId, delta: &StockDelta) -> Result<StockRecord, ServiceError> {
        let mut record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("no socks with id={id}")))?;

        record.overwrite(delta);
        let saved = self.store.save(record).await?;

        self.emit(StockEvent::RecordUpdated {
            id,
            color: saved.color.clone(),
            cotton_part: saved.cotton_part,
            quantity: saved.quantity,
            occurred_at: Utc::now(),
        });
        Ok(saved)
    }

    /// Apply every line of a CSV upload as an income, in file order.
    ///
    /// Stops at the first bad line. Lines already applied stay applied.
    #[tracing::instrument(skip(self, upload), fields(file_name = ?upload.file_name, size = upload.content.len()))]
    pub async fn upload_batch(&self, upload: &BatchUpload) -> Result<BatchSummary, ServiceError> {
        self.emit(StockEvent::BatchStarted {
            file_name: upload.file_name.clone(),
            size_bytes: upload.content.len(),
            occurred_at: Utc::now(),
        });

        let mut lines_applied = 0;
        match self.apply_batch(upload, &mut lines_applied).await {
            Ok(()) => {
                self.emit(StockEvent::BatchCompleted {
                    file_name: upload.file_name.clone(),
                    lines_applied,
                    occurred_at: Utc::now(),
                });
                Ok(BatchSummary {
                    file_name: upload.file_name.clone(),
                    lines_applied,
                })
            }
            Err(e) => {
                self.emit(StockEvent::BatchRejected {
                    file_name: upload.file_name.clone(),
                    lines_applied,
                    reason: e.to_string(),
                    occurred_at: Utc::now(),
                });
                Err(e)
            }
        }
    }

    async fn apply_batch(&self, upload: &BatchUpload, lines_applied: &mut usize) -> Result<(), ServiceError> {
        upload.validate()?;

        let text = std::str::from_utf8(&upload.content).map_err(ServiceError::batch)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (idx, line) in text.lines().enumerate() {
            let delta = parse_batch_line(idx + 1, line)?;
            match self.apply_income(delta).await {
                Ok(_) => *lines_applied += 1,
                Err(ServiceError::Store(e)) => return Err(ServiceError::batch(e)),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn sum_quantities(records: Vec<StockRecord>) -> u64 {
    records.iter().map(|r| u64::from(r.quantity)).sum()
}
