//! `sockwarehouse-core`: shared domain building blocks.
//!
//! Error taxonomy and identifiers; no I/O lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::StockId;
