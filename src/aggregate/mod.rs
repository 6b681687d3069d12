//! Service-history aggregation.
//!
//! Folds the raw service ledger into one [`Vehicle`] per license plate:
//! the highest odometer reading seen becomes the current mileage, and
//! for every recognized part the snapshot with the highest mileage (a
//! later date breaking exact ties) becomes the part's latest state.

use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{FleetError, Result};
use crate::model::{
    Part, PartSnapshot, PartStatus, ServiceRecord, Vehicle, VehicleIdentity,
};

/// Aggregate raw records into per-vehicle state.
///
/// `today` anchors all elapsed-time computations, keeping the pass
/// deterministic. Records for unknown plates are dropped; records with
/// unusable dates or odometer readings stay in raw history but never
/// form snapshots.
pub fn aggregate(
    records: &[ServiceRecord],
    identities: &[VehicleIdentity],
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<Vec<Vehicle>> {
    if records.is_empty() {
        return Err(FleetError::MissingInput {
            collection: "service records",
        });
    }
    if identities.is_empty() {
        return Err(FleetError::MissingInput {
            collection: "vehicle identities",
        });
    }

    let mut vehicles: HashMap<String, Vehicle> = identities
        .iter()
        .map(|identity| {
            let mut parts = IndexMap::with_capacity(Part::ALL.len());
            for part in Part::ALL {
                parts.insert(part, None);
            }
            (
                identity.license_plate.trim().to_uppercase(),
                Vehicle {
                    identity: identity.clone(),
                    current_mileage: 0.0,
                    parts,
                    history: Vec::new(),
                },
            )
        })
        .collect();

    for record in records {
        let key = record.license_plate.trim().to_uppercase();
        let Some(vehicle) = vehicles.get_mut(&key) else {
            debug!(plate = %record.license_plate, "record for unknown vehicle dropped");
            continue;
        };

        vehicle.history.push(record.clone());

        if let Some(mileage) = record.valid_mileage() {
            if mileage > vehicle.current_mileage {
                vehicle.current_mileage = mileage;
            }

            if let Some(part) = config.part_for_text(&record.search_text()) {
                if let Some(date) = record.parsed_date() {
                    if date <= today {
                        update_snapshot(vehicle, part, date, mileage, record);
                    }
                }
            }
        }
    }

    let mut result: Vec<Vehicle> = vehicles.into_values().collect();

    for vehicle in &mut result {
        // Diffs are relative to the final current mileage, so they are
        // filled only after the whole history has been folded.
        for snapshot in vehicle.parts.values_mut().flatten() {
            snapshot.mileage_diff = (vehicle.current_mileage - snapshot.mileage).max(0.0);
            snapshot.days_diff = (today - snapshot.date).num_days();
        }

        // Newest first; undated records sink to the end.
        vehicle.history.sort_by(|a, b| {
            b.parsed_date()
                .cmp(&a.parsed_date())
        });
    }

    result.sort_by(|a, b| {
        (a.identity.city.as_str(), a.identity.license_plate.as_str())
            .cmp(&(b.identity.city.as_str(), b.identity.license_plate.as_str()))
    });

    Ok(result)
}

/// Keep the snapshot with the highest mileage; on an exact mileage tie
/// the later date wins.
fn update_snapshot(
    vehicle: &mut Vehicle,
    part: Part,
    date: NaiveDate,
    mileage: f64,
    record: &ServiceRecord,
) {
    let slot = vehicle.parts.entry(part).or_insert(None);
    let replace = match slot {
        None => true,
        Some(existing) => {
            mileage > existing.mileage || (mileage == existing.mileage && date > existing.date)
        }
    };
    if replace {
        *slot = Some(PartSnapshot {
            date,
            mileage,
            mileage_diff: 0.0,
            days_diff: 0,
            work_description: record.work_description.clone(),
            status: PartStatus::Good,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(plate: &str, city: &str) -> VehicleIdentity {
        VehicleIdentity {
            license_plate: plate.to_string(),
            model: "Peugeot 301".to_string(),
            year: Some(2017),
            city: city.to_string(),
            photo_grade: String::new(),
        }
    }

    fn record(plate: &str, date: &str, mileage: f64, work: &str) -> ServiceRecord {
        ServiceRecord {
            license_plate: plate.to_string(),
            date: date.to_string(),
            mileage: Some(mileage),
            work_description: work.to_string(),
            parts_used: String::new(),
            total_with_vat: 1000.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_empty_inputs_error() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![record("AA1111BB", "01.01.2024", 90000.0, "ТО")];

        assert!(matches!(
            aggregate(&[], &ids, &config, today()),
            Err(FleetError::MissingInput { collection: "service records" })
        ));
        assert!(matches!(
            aggregate(&recs, &[], &config, today()),
            Err(FleetError::MissingInput { collection: "vehicle identities" })
        ));
    }

    #[test]
    fn test_highest_mileage_wins() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![
            record("AA1111BB", "01.05.2024", 80000.0, "заміна масла"),
            record("AA1111BB", "01.02.2024", 95000.0, "заміна масла"),
        ];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        let snap = fleet[0].snapshot(Part::OilService).unwrap();
        // The older record with higher mileage wins over the newer one
        assert_eq!(snap.mileage, 95000.0);
        assert_eq!(fleet[0].current_mileage, 95000.0);
    }

    #[test]
    fn test_date_breaks_mileage_tie() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![
            record("AA1111BB", "01.03.2024", 90000.0, "заміна масла"),
            record("AA1111BB", "01.01.2024", 90000.0, "заміна масла"),
        ];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        let snap = fleet[0].snapshot(Part::OilService).unwrap();
        assert_eq!(snap.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_zero_mileage_filtered() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let mut rec = record("AA1111BB", "01.01.2024", 0.0, "заміна масла");
        rec.mileage = Some(0.0);
        let fleet = aggregate(&[rec], &ids, &config, today()).unwrap();
        assert!(fleet[0].snapshot(Part::OilService).is_none());
        assert_eq!(fleet[0].current_mileage, 0.0);
        assert_eq!(fleet[0].history.len(), 1);
    }

    #[test]
    fn test_unparseable_date_history_only() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![record("AA1111BB", "колись навесні", 90000.0, "заміна масла")];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        assert!(fleet[0].snapshot(Part::OilService).is_none());
        // Mileage still counts toward the odometer estimate
        assert_eq!(fleet[0].current_mileage, 90000.0);
        assert_eq!(fleet[0].history.len(), 1);
    }

    #[test]
    fn test_future_dated_record_skipped() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![record("AA1111BB", "01.01.2025", 90000.0, "заміна масла")];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        assert!(fleet[0].snapshot(Part::OilService).is_none());
    }

    #[test]
    fn test_unknown_plate_dropped() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![
            record("AA1111BB", "01.01.2024", 90000.0, "заміна масла"),
            record("ZZ9999ZZ", "01.01.2024", 50000.0, "заміна масла"),
        ];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet[0].history.len(), 1);
    }

    #[test]
    fn test_sorted_by_city_then_plate() {
        let config = EngineConfig::default();
        let ids = vec![
            identity("CC3333DD", "Львів"),
            identity("BB2222CC", "Київ"),
            identity("AA1111BB", "Львів"),
        ];
        let recs = vec![record("BB2222CC", "01.01.2024", 10000.0, "ТО")];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        let plates: Vec<&str> = fleet
            .iter()
            .map(|v| v.identity.license_plate.as_str())
            .collect();
        assert_eq!(plates, vec!["BB2222CC", "AA1111BB", "CC3333DD"]);
    }

    #[test]
    fn test_history_newest_first() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![
            record("AA1111BB", "01.01.2023", 50000.0, "ТО"),
            record("AA1111BB", "01.01.2024", 70000.0, "ТО"),
        ];
        let fleet = aggregate(&recs, &ids, &config, today()).unwrap();
        assert_eq!(fleet[0].history[0].date, "01.01.2024");
    }

    #[test]
    fn test_idempotent_over_record_order() {
        let config = EngineConfig::default();
        let ids = vec![identity("AA1111BB", "Київ")];
        let recs = vec![
            record("AA1111BB", "01.05.2024", 80000.0, "заміна масла"),
            record("AA1111BB", "01.02.2024", 95000.0, "заміна масла"),
            record("AA1111BB", "15.03.2024", 88000.0, "заміна ременя ГРМ"),
        ];
        let mut reversed = recs.clone();
        reversed.reverse();

        let a = aggregate(&recs, &ids, &config, today()).unwrap();
        let b = aggregate(&reversed, &ids, &config, today()).unwrap();

        let snap_a = a[0].snapshot(Part::OilService).unwrap();
        let snap_b = b[0].snapshot(Part::OilService).unwrap();
        assert_eq!(snap_a.mileage, snap_b.mileage);
        assert_eq!(snap_a.date, snap_b.date);
        assert_eq!(a[0].current_mileage, b[0].current_mileage);
    }
}
