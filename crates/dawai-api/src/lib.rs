//! Boundary types for the dawai-invoices GUI layer
//!
//! The GUI and IPC glue live outside this repository. This crate defines what
//! crosses that boundary:
//! - The listing view returned by invoice queries
//! - The confirmation gate the store consults before destructive actions

mod confirm;
mod views;

pub use confirm::*;
pub use views::*;
