//! Maintenance regulation model.
//!
//! A regulation row says: for vehicles matching a model pattern, a part
//! should be serviced every N kilometres / months / years, with warning
//! and critical override thresholds. Rows carry a priority so brand or
//! license-plate specific rows can shadow generic wildcard rows.

use serde::{Deserialize, Serialize};

use crate::error::IngestErrorKind;
use crate::model::Part;

/// Unit in which a regulation interval is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Interval in odometer kilometres
    Mileage,
    /// Interval in calendar months
    Month,
    /// Interval in calendar years
    Year,
}

impl PeriodType {
    /// Parse the spreadsheet period-type column.
    pub fn parse(raw: &str) -> Result<Self, IngestErrorKind> {
        let normalized = raw.trim().to_lowercase();
        if normalized.contains("пробіг") {
            Ok(Self::Mileage)
        } else if normalized.contains("місяць") || normalized.contains("місяц") {
            Ok(Self::Month)
        } else if normalized.contains("рік") || normalized.contains("рок") {
            Ok(Self::Year)
        } else {
            Err(IngestErrorKind::UnknownPeriodType(raw.trim().to_string()))
        }
    }
}

/// Normal service interval for a regulation row.
///
/// `Chain` is the sentinel for chain-driven engines: the timing drive is
/// not scheduled for replacement at all, and dependent parts follow suit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceInterval {
    /// Chain drive, no scheduled replacement
    Chain,
    /// Replace every N units of the row's period type
    Every(f64),
}

impl ServiceInterval {
    /// Parse the normal-interval cell. Empty and zero cells mean "no
    /// interval defined" and yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.to_lowercase().contains("ланцюг") {
            return Some(Self::Chain);
        }
        let value: f64 = raw.replace(' ', "").replace(',', ".").parse().ok()?;
        if value <= 0.0 {
            None
        } else {
            Some(Self::Every(value))
        }
    }

    /// Numeric interval, `None` for the chain sentinel.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Chain => None,
            Self::Every(v) => Some(*v),
        }
    }

    #[must_use]
    pub const fn is_chain(&self) -> bool {
        matches!(self, Self::Chain)
    }
}

/// A single maintenance regulation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regulation {
    /// Part this row applies to
    pub part: Part,
    /// Model pattern: a regex fragment, or `*` for "any model"
    pub model_pattern: String,
    /// Exact license plate this row is pinned to, if any
    pub license_plate: Option<String>,
    /// Inclusive production-year range
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    /// Unit of the intervals below
    pub period_type: PeriodType,
    /// Normal interval, `None` when the cell is empty
    pub normal: Option<ServiceInterval>,
    /// Warning threshold override, `None` when empty or zero
    pub warning: Option<f64>,
    /// Critical threshold override, `None` when empty or zero
    pub critical: Option<f64>,
    /// Selection priority, lower wins; unspecified rows get 2
    pub priority: u8,
}

impl Regulation {
    /// Default priority for rows without an explicit value.
    pub const DEFAULT_PRIORITY: u8 = 2;

    /// Whether the row's model pattern is the match-anything wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        let p = self.model_pattern.trim();
        p == "*" || p == ".*"
    }

    /// Whether a production year falls inside the row's year range.
    /// Open bounds match everything on their side.
    #[must_use]
    pub fn year_matches(&self, year: Option<i32>) -> bool {
        match (self.year_from, self.year_to) {
            (None, None) => true,
            (from, to) => {
                let Some(year) = year else {
                    return false;
                };
                from.is_none_or(|f| year >= f) && to.is_none_or(|t| year <= t)
            }
        }
    }
}
