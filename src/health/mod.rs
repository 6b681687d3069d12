//! Vehicle health scoring.
//!
//! Every vehicle gets a 0-100 score from its part statuses, age,
//! odometer and photo-inspection grade, then a coarse grade for the
//! dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{PartStatus, Vehicle};

/// Penalty per critical part.
const CRITICAL_PART_PENALTY: i32 = 4;
/// Penalty per warning part.
const WARNING_PART_PENALTY: i32 = 2;

/// Health grade bands.
///
/// The poor band runs 35..=40 and everything below 35 is critical, so a
/// score of exactly 40 still reads "Поганий".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGrade {
    Excellent,
    Good,
    Satisfactory,
    Poor,
    Critical,
}

impl HealthGrade {
    /// Grade for a clamped 0-100 score.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= 86 {
            Self::Excellent
        } else if score >= 61 {
            Self::Good
        } else if score >= 41 {
            Self::Satisfactory
        } else if score < 35 {
            Self::Critical
        } else {
            Self::Poor
        }
    }

    /// Ukrainian dashboard label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Відмінний",
            Self::Good => "Добрий",
            Self::Satisfactory => "Задовільний",
            Self::Poor => "Поганий",
            Self::Critical => "Критичний",
        }
    }
}

/// Compute the 0-100 health score of a vehicle at `today`.
#[must_use]
pub fn health_score(vehicle: &Vehicle, today: NaiveDate) -> u32 {
    let mut score: i32 = 100;

    score -= CRITICAL_PART_PENALTY * vehicle.count_with_status(PartStatus::Critical) as i32;
    score -= WARNING_PART_PENALTY * vehicle.count_with_status(PartStatus::Warning) as i32;

    if let Some(age) = vehicle.age_years(today) {
        if age > 18 {
            score -= 25;
        } else if age > 10 {
            score -= 10;
        } else if age > 5 {
            score -= 5;
        }
    }

    let mileage = vehicle.current_mileage;
    if mileage > 500_000.0 {
        score -= 10;
    } else if mileage > 300_000.0 {
        score -= 5;
    } else if mileage > 200_000.0 {
        score -= 3;
    }

    let grade = vehicle.identity.photo_grade.to_uppercase();
    if grade.contains("ВІДМІННИЙ") {
        score += 10;
    } else if grade.contains("ДОБРИЙ") {
        score += 3;
    } else if grade.contains("ЗАДОВІЛЬНИЙ") {
        score -= 5;
    } else if grade.contains("КРИТИЧНИЙ") {
        score -= 26;
    }

    score.clamp(0, 100) as u32
}

/// Score and grade together, the usual dashboard pairing.
#[must_use]
pub fn health(vehicle: &Vehicle, today: NaiveDate) -> (u32, HealthGrade) {
    let score = health_score(vehicle, today);
    (score, HealthGrade::from_score(score))
}

/// Fleet-wide summary numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetStats {
    pub total_vehicles: usize,
    /// Mean health score, rounded to the nearest integer
    pub average_health: u32,
    /// Vehicles graded poor or critical
    pub vehicles_at_risk: usize,
    /// Critical part snapshots across the fleet
    pub critical_parts: usize,
    /// Warning part snapshots across the fleet
    pub warning_parts: usize,
    /// Distinct home cities, sorted
    pub cities: Vec<String>,
}

/// Summarize a fleet at `today`.
#[must_use]
pub fn fleet_stats(fleet: &[Vehicle], today: NaiveDate) -> FleetStats {
    let mut total_score: u64 = 0;
    let mut vehicles_at_risk = 0;
    let mut critical_parts = 0;
    let mut warning_parts = 0;
    let mut cities: Vec<String> = Vec::new();

    for vehicle in fleet {
        let (score, grade) = health(vehicle, today);
        total_score += u64::from(score);
        if matches!(grade, HealthGrade::Poor | HealthGrade::Critical) {
            vehicles_at_risk += 1;
        }
        critical_parts += vehicle.count_with_status(PartStatus::Critical);
        warning_parts += vehicle.count_with_status(PartStatus::Warning);

        let city = vehicle.identity.city.trim();
        if !city.is_empty() && !cities.iter().any(|c| c == city) {
            cities.push(city.to_string());
        }
    }

    cities.sort();

    let average_health = if fleet.is_empty() {
        0
    } else {
        ((total_score as f64 / fleet.len() as f64).round()) as u32
    };

    FleetStats {
        total_vehicles: fleet.len(),
        average_health,
        vehicles_at_risk,
        critical_parts,
        warning_parts,
        cities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Part, PartSnapshot, VehicleIdentity};
    use indexmap::IndexMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn vehicle(year: Option<i32>, mileage: f64, photo_grade: &str) -> Vehicle {
        Vehicle {
            identity: VehicleIdentity {
                license_plate: "AA1111BB".to_string(),
                model: "Peugeot 301".to_string(),
                year,
                city: "Київ".to_string(),
                photo_grade: photo_grade.to_string(),
            },
            current_mileage: mileage,
            parts: IndexMap::new(),
            history: Vec::new(),
        }
    }

    fn add_part(vehicle: &mut Vehicle, part: Part, status: PartStatus) {
        vehicle.parts.insert(
            part,
            Some(PartSnapshot {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                mileage: 1000.0,
                mileage_diff: 0.0,
                days_diff: 0,
                work_description: String::new(),
                status,
            }),
        );
    }

    #[test]
    fn test_fresh_vehicle_scores_100() {
        let v = vehicle(Some(2022), 50000.0, "");
        assert_eq!(health_score(&v, today()), 100);
    }

    #[test]
    fn test_part_penalties() {
        let mut v = vehicle(Some(2022), 50000.0, "");
        add_part(&mut v, Part::OilService, PartStatus::Critical);
        add_part(&mut v, Part::FrontBrakePads, PartStatus::Warning);
        assert_eq!(health_score(&v, today()), 100 - 4 - 2);
    }

    #[test]
    fn test_age_and_mileage_penalties() {
        // 2004 car in 2024: age 20 -> -25; 550k km -> -10
        let v = vehicle(Some(2004), 550_000.0, "");
        assert_eq!(health_score(&v, today()), 100 - 25 - 10);
    }

    #[test]
    fn test_photo_grade_adjustments() {
        assert_eq!(
            health_score(&vehicle(Some(2022), 0.0, "Відмінний стан"), today()),
            100
        );
        assert_eq!(
            health_score(&vehicle(Some(2022), 0.0, "Задовільний"), today()),
            95
        );
        assert_eq!(
            health_score(&vehicle(Some(2022), 0.0, "Критичний"), today()),
            74
        );
    }

    #[test]
    fn test_score_clamped() {
        let mut v = vehicle(Some(2000), 600_000.0, "Критичний");
        for part in Part::ALL {
            add_part(&mut v, part, PartStatus::Critical);
        }
        assert_eq!(health_score(&v, today()), 0);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(HealthGrade::from_score(86), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(85), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(61), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(60), HealthGrade::Satisfactory);
        assert_eq!(HealthGrade::from_score(41), HealthGrade::Satisfactory);
        assert_eq!(HealthGrade::from_score(40), HealthGrade::Poor);
        assert_eq!(HealthGrade::from_score(35), HealthGrade::Poor);
        assert_eq!(HealthGrade::from_score(34), HealthGrade::Critical);
    }

    #[test]
    fn test_fleet_stats() {
        let mut bad = vehicle(Some(2000), 600_000.0, "Критичний");
        for part in [Part::OilService, Part::TimingBelt, Part::WaterPump] {
            add_part(&mut bad, part, PartStatus::Critical);
        }
        let mut good = vehicle(Some(2022), 50000.0, "Відмінний");
        good.identity.city = "Львів".to_string();
        add_part(&mut good, Part::OilService, PartStatus::Warning);

        let stats = fleet_stats(&[bad, good], today());
        assert_eq!(stats.total_vehicles, 2);
        assert_eq!(stats.critical_parts, 3);
        assert_eq!(stats.warning_parts, 1);
        assert_eq!(stats.vehicles_at_risk, 1);
        assert_eq!(stats.cities, vec!["Київ".to_string(), "Львів".to_string()]);
    }
}
