//! Cross-file invoice filtering
//!
//! Filters are AND-combined and each is skipped when absent. The date filter
//! is an exact single-day match applied at the file level (it selects the one
//! `DD-MM.json` name for that date), not a range. Filtering happens after
//! full file loads; fine at a few hundred records per day, not beyond.

use chrono::NaiveDate;

use crate::InvoiceRecord;

/// Filter set for a listing query.
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    /// Restrict results to the period file of this calendar day
    pub date: Option<NaiveDate>,

    /// Case-insensitive substring match against `patientName`
    pub patient_name: Option<String>,

    /// Plain substring match against `mobile`
    pub mobile: Option<String>,
}

impl InvoiceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Parse the date-filter string the GUI sends (`YYYY-MM-DD`).
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    /// Whether a record passes the patient-name and mobile filters.
    ///
    /// A record lacking the probed field does not match a present filter.
    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        let patient_match = match &self.patient_name {
            None => true,
            Some(filter) => record
                .patient_name()
                .map(|name| name.to_lowercase().contains(&filter.to_lowercase()))
                .unwrap_or(false),
        };

        let mobile_match = match &self.mobile {
            None => true,
            Some(filter) => record
                .mobile()
                .map(|mobile| mobile.contains(filter.as_str()))
                .unwrap_or(false),
        };

        patient_match && mobile_match
    }
}
