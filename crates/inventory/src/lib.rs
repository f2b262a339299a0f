//! Sock inventory domain module.
//!
//! This crate contains the business rules for sock stock, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod batch;
pub mod comparison;
pub mod event;
pub mod record;

pub use batch::{parse_batch_line, BatchUpload, BATCH_FILE_EXTENSION};
pub use comparison::CottonComparison;
pub use event::StockEvent;
pub use record::{normalize_color, StockDelta, StockRecord};
