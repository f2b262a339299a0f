//! Infrastructure layer: stock persistence and the inventory service.

pub mod service;
pub mod store;


pub use service::{BatchSummary, InventoryService, ServiceError};
pub use store::{InMemoryStockStore, StockStore, StoreError};
#[cfg(feature = "postgres")]
pub use store::PostgresStockStore;
