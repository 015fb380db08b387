//! Invoice record model
//!
//! Records are open JSON objects. The store reserves `id` and `createdAt`;
//! everything else (patient name, items, totals) is carried opaquely and
//! only probed opportunistically for filtering.

use dawai_util::InvoiceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key: record identifier
pub const ID_FIELD: &str = "id";

/// Reserved key: creation timestamp in epoch milliseconds
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A single invoice record as persisted inside a period file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,

    /// Set once at creation; absent on records inserted via the upsert path
    /// unless the caller supplied one.
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,

    /// All other fields, opaque to the store
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceRecord {
    /// Build a freshly created record. Reserved keys in `fields` are dropped;
    /// the store-assigned values always win.
    pub fn new(id: InvoiceId, created_at: i64, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        fields.remove(CREATED_AT_FIELD);
        Self {
            id,
            created_at: Some(created_at),
            extra: fields,
        }
    }

    /// Build a record from caller-supplied fields (the update/upsert path).
    ///
    /// A `createdAt` in `fields` is honored; an `id` is not, the id argument
    /// is authoritative.
    pub fn from_fields(id: InvoiceId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        let created_at = fields.remove(CREATED_AT_FIELD).and_then(|v| v.as_i64());
        Self {
            id,
            created_at,
            extra: fields,
        }
    }

    /// Shallow-merge caller fields into this record, preserving the id.
    /// An incoming `createdAt` replaces the existing one; other incoming
    /// keys overwrite same-named fields.
    pub fn merge_fields(&mut self, mut fields: Map<String, Value>) {
        fields.remove(ID_FIELD);
        if let Some(created_at) = fields.remove(CREATED_AT_FIELD).and_then(|v| v.as_i64()) {
            self.created_at = Some(created_at);
        }
        self.extra.extend(fields);
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.extra.get("patientName").and_then(Value::as_str)
    }

    pub fn mobile(&self) -> Option<&str> {
        self.extra.get("mobile").and_then(Value::as_str)
    }

    /// The record as a plain JSON object, the shape persisted on disk.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        if let Some(created_at) = self.created_at {
            map.insert(CREATED_AT_FIELD.to_string(), Value::from(created_at));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}
