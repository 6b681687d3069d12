//! Single part replacement need projection.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::{Part, PartSnapshot, PartStatus, PeriodType, Regulation, Vehicle};

/// How soon a replacement is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Overdue or due within a month
    Critical,
    /// Due within roughly a quarter, or the part is already flagged
    Planned,
    /// Projected from intervals only
    Forecasted,
}

/// A projected replacement with its cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementNeed {
    pub license_plate: String,
    pub model: String,
    pub part: Part,
    pub urgency: Urgency,
    /// Replacement probability after brand reliability scaling
    pub probability: f64,
    /// Horizon bucket the replacement lands in, 0 = this month
    pub replacement_month: u32,
    /// Fractional months until due, `None` when already overdue
    pub months_until: Option<f64>,
    pub period_type: PeriodType,
    pub part_cost: f64,
    pub work_cost: f64,
    pub total_cost: f64,
}

/// Project the replacement need for one part of one vehicle.
///
/// Returns `None` when no numeric regulation applies, the drive is
/// chain-based, or the projected month falls outside `months_ahead`.
#[must_use]
pub fn replacement_need(
    vehicle: &Vehicle,
    part: Part,
    regulation: &Regulation,
    snapshot: &PartSnapshot,
    months_ahead: u32,
    avg_monthly_mileage: f64,
    config: &EngineConfig,
) -> Option<ReplacementNeed> {
    let normal = regulation.normal?.value()?;
    let (cost_coefficient, reliability) = config.brand_coefficients(&vehicle.model_lower());

    let mut urgency: Option<Urgency> = None;
    let mut probability = 0.0_f64;
    let mut replacement_month: Option<u32> = None;
    let mut months_until: Option<f64> = None;

    let months_remaining = match regulation.period_type {
        PeriodType::Mileage => {
            let remaining_km = normal - snapshot.mileage_diff;
            remaining_km / avg_monthly_mileage
        }
        PeriodType::Month => normal - (snapshot.days_diff / 30) as f64,
        PeriodType::Year => (normal - snapshot.days_diff as f64 / 365.0) * 12.0,
    };

    if months_remaining <= 0.0 {
        urgency = Some(Urgency::Critical);
        probability = 0.8;
        replacement_month = Some(0);
    } else if months_remaining <= f64::from(months_ahead) {
        months_until = Some(months_remaining);
        replacement_month = Some(months_remaining.ceil() as u32);
        if months_remaining <= 1.0 {
            urgency = Some(Urgency::Critical);
            probability = 0.7;
        } else if months_remaining <= 3.0 {
            urgency = Some(Urgency::Planned);
            probability = 0.5;
        } else {
            urgency = Some(Urgency::Forecasted);
            probability = 0.3;
        }
    }

    // The classified status can escalate a projection.
    match snapshot.status {
        PartStatus::Critical => {
            urgency = Some(Urgency::Critical);
            probability = probability.max(0.9);
            if replacement_month.is_none() {
                replacement_month = Some(0);
            }
        }
        PartStatus::Warning => {
            if urgency != Some(Urgency::Critical) {
                urgency = Some(Urgency::Planned);
                probability = probability.max(0.6);
            }
        }
        PartStatus::Good => {}
    }

    probability *= reliability;

    let replacement_month = replacement_month.filter(|m| *m <= months_ahead)?;
    let urgency = urgency?;

    let part_cost = config.base_part_cost(part) * cost_coefficient;
    let work_cost = part_cost * config.work_cost_coefficient;

    Some(ReplacementNeed {
        license_plate: vehicle.identity.license_plate.clone(),
        model: vehicle.identity.model.clone(),
        part,
        urgency,
        probability,
        replacement_month,
        months_until,
        period_type: regulation.period_type,
        part_cost,
        work_cost,
        total_cost: part_cost + work_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ServiceInterval, VehicleIdentity};
    use chrono::NaiveDate;
    use indexmap::IndexMap;

    fn vehicle(model: &str) -> Vehicle {
        Vehicle {
            identity: VehicleIdentity {
                license_plate: "AA1111BB".to_string(),
                model: model.to_string(),
                year: Some(2017),
                city: String::new(),
                photo_grade: String::new(),
            },
            current_mileage: 100_000.0,
            parts: IndexMap::new(),
            history: Vec::new(),
        }
    }

    fn snapshot(mileage_diff: f64, days_diff: i64, status: PartStatus) -> PartSnapshot {
        PartSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            mileage: 100_000.0 - mileage_diff,
            mileage_diff,
            days_diff,
            work_description: String::new(),
            status,
        }
    }

    fn mileage_regulation(part: Part, normal: f64) -> Regulation {
        Regulation {
            part,
            model_pattern: "*".to_string(),
            license_plate: None,
            year_from: None,
            year_to: None,
            period_type: PeriodType::Mileage,
            normal: Some(ServiceInterval::Every(normal)),
            warning: None,
            critical: None,
            priority: 2,
        }
    }

    #[test]
    fn test_chain_regulation_yields_nothing() {
        let config = EngineConfig::default();
        let mut reg = mileage_regulation(Part::TimingBelt, 0.0);
        reg.normal = Some(ServiceInterval::Chain);
        let v = vehicle("Iveco Daily 65C15");
        let snap = snapshot(100_000.0, 400, PartStatus::Good);
        assert!(
            replacement_need(&v, Part::TimingBelt, &reg, &snap, 6, 2000.0, &config).is_none()
        );
    }

    #[test]
    fn test_overdue_mileage_is_critical_now() {
        let config = EngineConfig::default();
        let reg = mileage_regulation(Part::OilService, 15000.0);
        let v = vehicle("Renault Master");
        let snap = snapshot(16000.0, 100, PartStatus::Good);
        let need =
            replacement_need(&v, Part::OilService, &reg, &snap, 6, 2000.0, &config).unwrap();
        assert_eq!(need.urgency, Urgency::Critical);
        assert_eq!(need.replacement_month, 0);
        assert!((need.probability - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_mileage_projection_buckets() {
        let config = EngineConfig::default();
        let reg = mileage_regulation(Part::OilService, 15000.0);
        let v = vehicle("Renault Master");
        // 5000 km remaining at 2000 km/month: 2.5 months, planned
        let snap = snapshot(10000.0, 100, PartStatus::Good);
        let need =
            replacement_need(&v, Part::OilService, &reg, &snap, 6, 2000.0, &config).unwrap();
        assert_eq!(need.urgency, Urgency::Planned);
        assert_eq!(need.replacement_month, 3);
        assert_eq!(need.months_until, Some(2.5));
    }

    #[test]
    fn test_outside_horizon_yields_nothing() {
        let config = EngineConfig::default();
        let reg = mileage_regulation(Part::OilService, 15000.0);
        let v = vehicle("Renault Master");
        // 14 000 km remaining at 1000 km/month: month 14, beyond 6
        let snap = snapshot(1000.0, 10, PartStatus::Good);
        assert!(
            replacement_need(&v, Part::OilService, &reg, &snap, 6, 1000.0, &config).is_none()
        );
    }

    #[test]
    fn test_critical_status_forces_current_month() {
        let config = EngineConfig::default();
        let reg = mileage_regulation(Part::OilService, 15000.0);
        let v = vehicle("Renault Master");
        // Far from the interval, but the part is flagged critical
        let snap = snapshot(1000.0, 10, PartStatus::Critical);
        let need =
            replacement_need(&v, Part::OilService, &reg, &snap, 6, 1000.0, &config).unwrap();
        assert_eq!(need.urgency, Urgency::Critical);
        assert_eq!(need.replacement_month, 0);
        assert!((need.probability - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_brand_coefficients_scale_cost_and_probability() {
        let config = EngineConfig::default();
        let reg = mileage_regulation(Part::OilService, 15000.0);
        let v = vehicle("VW Crafter");
        let snap = snapshot(16000.0, 100, PartStatus::Good);
        let need =
            replacement_need(&v, Part::OilService, &reg, &snap, 6, 2000.0, &config).unwrap();
        // Crafter: cost x1.15, reliability x0.95
        assert!((need.part_cost - 2000.0 * 1.15).abs() < 1e-9);
        assert!((need.work_cost - need.part_cost * 0.25).abs() < 1e-9);
        assert!((need.probability - 0.8 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_month_regulation_projection() {
        let config = EngineConfig::default();
        let mut reg = mileage_regulation(Part::WheelAlignment, 12.0);
        reg.period_type = PeriodType::Month;
        let v = vehicle("Renault Master");
        // 10 months elapsed of 12: 2 months remain, planned
        let snap = snapshot(0.0, 300, PartStatus::Good);
        let need =
            replacement_need(&v, Part::WheelAlignment, &reg, &snap, 6, 1000.0, &config).unwrap();
        assert_eq!(need.urgency, Urgency::Planned);
        assert_eq!(need.replacement_month, 2);
    }
}
