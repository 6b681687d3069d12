//! Aggregated per-vehicle state.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Part, ServiceRecord};
use crate::utils::date::elapsed_phrase;

/// Static identity of a vehicle from the fleet registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub license_plate: String,
    /// Model string, e.g. "Mercedes-Benz Sprinter 313"
    pub model: String,
    /// Production year, if known
    #[serde(default)]
    pub year: Option<i32>,
    /// Home city of the vehicle
    #[serde(default)]
    pub city: String,
    /// Free-text condition grade from a photo inspection, e.g. "Добрий"
    #[serde(default)]
    pub photo_grade: String,
}

/// Classification of a part's current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    Good,
    Warning,
    Critical,
}

impl PartStatus {
    /// Whether the part needs attention (warning or critical).
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        !matches!(self, Self::Good)
    }
}

/// Latest relevant service event for one part of one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSnapshot {
    /// Date of the service event
    pub date: NaiveDate,
    /// Odometer reading at the event
    pub mileage: f64,
    /// Kilometres driven since the event
    pub mileage_diff: f64,
    /// Days elapsed since the event
    pub days_diff: i64,
    /// Work description from the source record
    pub work_description: String,
    /// Classified condition, filled by the classifier pass
    pub status: PartStatus,
}

impl PartSnapshot {
    /// Humanized elapsed time since the event, "2р 3міс" form.
    #[must_use]
    pub fn elapsed(&self, today: NaiveDate) -> String {
        elapsed_phrase(self.date, today)
    }
}

/// A vehicle with its aggregated service state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub identity: VehicleIdentity,
    /// Highest odometer reading seen anywhere in the history
    pub current_mileage: f64,
    /// Per-part latest snapshot; `None` when no record ever matched
    pub parts: IndexMap<Part, Option<PartSnapshot>>,
    /// Full raw history, newest first
    pub history: Vec<ServiceRecord>,
}

impl Vehicle {
    /// Lowercased model string, the form all model matching runs on.
    #[must_use]
    pub fn model_lower(&self) -> String {
        self.identity.model.to_lowercase()
    }

    /// Vehicle age in years at `today`, `None` when the year is unknown.
    #[must_use]
    pub fn age_years(&self, today: NaiveDate) -> Option<i32> {
        use chrono::Datelike;
        self.identity.year.map(|y| (today.year() - y).max(0))
    }

    /// Snapshot for a part, flattening the double option.
    #[must_use]
    pub fn snapshot(&self, part: Part) -> Option<&PartSnapshot> {
        self.parts.get(&part).and_then(|s| s.as_ref())
    }

    /// Parts currently classified at the given status.
    pub fn parts_with_status(&self, status: PartStatus) -> impl Iterator<Item = Part> + '_ {
        self.parts.iter().filter_map(move |(part, snap)| {
            snap.as_ref()
                .filter(|s| s.status == status)
                .map(|_| *part)
        })
    }

    /// Count of parts at the given status.
    #[must_use]
    pub fn count_with_status(&self, status: PartStatus) -> usize {
        self.parts_with_status(status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        let mut parts = IndexMap::new();
        parts.insert(
            Part::OilService,
            Some(PartSnapshot {
                date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                mileage: 90000.0,
                mileage_diff: 12000.0,
                days_diff: 200,
                work_description: "ТО".to_string(),
                status: PartStatus::Warning,
            }),
        );
        parts.insert(Part::TimingBelt, None);
        Vehicle {
            identity: VehicleIdentity {
                license_plate: "AA1111BB".to_string(),
                model: "Mercedes-Benz Sprinter 313".to_string(),
                year: Some(2015),
                city: "Київ".to_string(),
                photo_grade: "Добрий".to_string(),
            },
            current_mileage: 102000.0,
            parts,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_snapshot_flattening() {
        let v = vehicle();
        assert!(v.snapshot(Part::OilService).is_some());
        assert!(v.snapshot(Part::TimingBelt).is_none());
        assert!(v.snapshot(Part::Clutch).is_none());
    }

    #[test]
    fn test_status_counts() {
        let v = vehicle();
        assert_eq!(v.count_with_status(PartStatus::Warning), 1);
        assert_eq!(v.count_with_status(PartStatus::Critical), 0);
    }

    #[test]
    fn test_snapshot_elapsed_phrase() {
        let v = vehicle();
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let snap = v.snapshot(Part::OilService).unwrap();
        assert_eq!(snap.elapsed(today), "1р 3міс");
    }

    #[test]
    fn test_age() {
        let v = vehicle();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(v.age_years(today), Some(9));
    }
}
