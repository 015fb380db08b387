//! Strongly-typed invoice identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for store-assigned invoice ids
const ID_PREFIX: &str = "invoice";

/// Unique identifier for an invoice record.
///
/// Store-assigned ids have the form `invoice-<unix_ms>`. Callers may also
/// supply their own ids (the upsert path accepts arbitrary strings), so the
/// inner value is not validated against the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a store-assigned id from a creation timestamp.
    ///
    /// Two calls in the same millisecond yield the same id; the store does
    /// not guard against this (see DESIGN.md).
    pub fn generate(at_millis: i64) -> Self {
        Self(format!("{ID_PREFIX}-{at_millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InvoiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InvoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
