//! Raw service-history record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::parse_date;

/// One row of the service-history ledger, as ingested.
///
/// Fields keep the looseness of the source data: the date is free text
/// until parsed, mileage may be absent or zero, prices may be blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// License plate, the join key to vehicle identities
    pub license_plate: String,
    /// Service date as written in the source, e.g. "15.03.2023"
    pub date: String,
    /// Odometer reading at service time, 0 or None when not recorded
    #[serde(default)]
    pub mileage: Option<f64>,
    /// Free-text description of the work performed
    #[serde(default)]
    pub work_description: String,
    /// Free-text list of parts used
    #[serde(default)]
    pub parts_used: String,
    /// Total price including VAT, 0 when not priced
    #[serde(default)]
    pub total_with_vat: f64,
}

impl ServiceRecord {
    /// Parsed service date, `None` for blank or malformed cells.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Positive odometer reading, `None` when missing, zero or negative.
    /// Zero is the source's "not recorded" placeholder, not a real reading.
    #[must_use]
    pub fn valid_mileage(&self) -> Option<f64> {
        self.mileage.filter(|m| m.is_finite() && *m > 0.0)
    }

    /// Combined searchable text of the record, lowercased.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.work_description.len() + self.parts_used.len() + 1,
        );
        text.push_str(&self.work_description.to_lowercase());
        text.push(' ');
        text.push_str(&self.parts_used.to_lowercase());
        text
    }
}
