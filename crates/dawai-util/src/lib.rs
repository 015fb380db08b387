//! Shared utilities for dawai-invoices
//!
//! This crate provides:
//! - The `InvoiceId` type
//! - Time utilities (wall-clock now, epoch-millisecond helpers)
//! - Default path for the invoice data directory

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
