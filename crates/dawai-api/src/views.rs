//! View types returned across the GUI boundary

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in an invoice listing.
///
/// Field names on the wire (`title`, `lastEditTime`, `data`) are fixed by the
/// existing GUI layer and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListing {
    /// The record's id
    pub title: String,

    /// The record's `createdAt` timestamp in epoch milliseconds, or 0 when
    /// the record carries none
    #[serde(rename = "lastEditTime")]
    pub last_edit_time: i64,

    /// The full record as stored
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_wire_field_names() {
        let listing = InvoiceListing {
            title: "invoice-1718000000123".into(),
            last_edit_time: 1718000000123,
            data: json!({"id": "invoice-1718000000123", "patientName": "Asha Rao"}),
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["title"], "invoice-1718000000123");
        assert_eq!(json["lastEditTime"], 1718000000123i64);
        assert_eq!(json["data"]["patientName"], "Asha Rao");
    }

    #[test]
    fn listing_round_trips() {
        let listing = InvoiceListing {
            title: "invoice-1".into(),
            last_edit_time: 0,
            data: json!({"id": "invoice-1"}),
        };

        let json = serde_json::to_string(&listing).unwrap();
        let parsed: InvoiceListing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, "invoice-1");
        assert_eq!(parsed.last_edit_time, 0);
    }
}
