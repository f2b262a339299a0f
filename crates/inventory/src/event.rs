use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sockwarehouse_core::StockId;

use crate::comparison::CottonComparison;

/// Facts emitted by inventory operations, for observability.
///
/// These are not an event-sourcing log; the stock record table stays the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockEvent {
    IncomeRegistered {
        id: Option<StockId>,
        color: String,
        cotton_part: i32,
        quantity: u32,
        stock_after: u32,
        occurred_at: DateTime<Utc>,
    },
    OutcomeRegistered {
        id: Option<StockId>,
        color: String,
        cotton_part: i32,
        quantity: u32,
        stock_after: u32,
        occurred_at: DateTime<Utc>,
    },
    TotalQueried {
        color: String,
        comparison: CottonComparison,
        cotton_part: i32,
        total: u64,
        occurred_at: DateTime<Utc>,
    },
    RecordUpdated {
        id: StockId,
        color: String,
        cotton_part: i32,
        quantity: u32,
        occurred_at: DateTime<Utc>,
    },
    BatchStarted {
        file_name: Option<String>,
        size_bytes: usize,
        occurred_at: DateTime<Utc>,
    },
    BatchCompleted {
        file_name: Option<String>,
        lines_applied: usize,
        occurred_at: DateTime<Utc>,
    },
    BatchRejected {
        file_name: Option<String>,
        lines_applied: usize,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
}

impl StockEvent {
    /// Stable event name (e.g. "inventory.stock.income_registered").
    pub fn event_type(&self) -> &'static str {
        match self {
            StockEvent::IncomeRegistered { .. } => "inventory.stock.income_registered",
            StockEvent::OutcomeRegistered { .. } => "inventory.stock.outcome_registered",
            StockEvent::TotalQueried { .. } => "inventory.stock.total_queried",
            StockEvent::RecordUpdated { .. } => "inventory.stock.record_updated",
            StockEvent::BatchStarted { .. } => "inventory.batch.started",
            StockEvent::BatchCompleted { .. } => "inventory.batch.completed",
            StockEvent::BatchRejected { .. } => "inventory.batch.rejected",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::IncomeRegistered { occurred_at, .. }
            | StockEvent::OutcomeRegistered { occurred_at, .. }
            | StockEvent::TotalQueried { occurred_at, .. }
            | StockEvent::RecordUpdated { occurred_at, .. }
            | StockEvent::BatchStarted { occurred_at, .. }
            | StockEvent::BatchCompleted { occurred_at, .. }
            | StockEvent::BatchRejected { occurred_at, .. } => *occurred_at,
        }
    }

    /// Failures are worth a louder log line than routine stock movements.
    pub fn is_failure(&self) -> bool {
        matches!(self, StockEvent::BatchRejected { .. })
    }
}
