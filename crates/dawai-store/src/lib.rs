//! File-partitioned record store for invoice documents
//!
//! Invoices are stored as JSON arrays in day-scoped files
//! (`<root>/MM-YY/DD-MM.json`). The file an invoice lives in is fixed at
//! creation; updates are applied in place wherever the id is found.
//!
//! Provides:
//! - Path resolution for period directories and files
//! - A tolerant document codec (corrupt or missing files read as empty)
//! - Create / read / update (upsert) / delete (confirmation-gated) / list
//! - Cross-file filtering by date, patient name, and mobile number

mod codec;
mod paths;
mod query;
mod record;
mod store;

pub use codec::*;
pub use paths::*;
pub use query::*;
pub use record::*;
pub use store::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
