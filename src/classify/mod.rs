//! Part condition classification.
//!
//! Each part snapshot is graded against the best matching regulation.
//! When no regulation covers a part (or its thresholds are blank), the
//! built-in legacy threshold table takes over, so every snapshot always
//! gets a grade.

use crate::matching::RegulationMatcher;
use crate::model::{Part, PartStatus, PeriodType, Regulation, Vehicle};

/// Classify one part snapshot.
///
/// `mileage_diff` is kilometres since the last service, `days_diff` is
/// days since it.
#[must_use]
pub fn classify(
    part: Part,
    mileage_diff: f64,
    days_diff: i64,
    regulation: Option<&Regulation>,
    model_lower: &str,
    year: Option<i32>,
) -> PartStatus {
    if let Some(reg) = regulation {
        // Chain drive: the part is never scheduled for replacement.
        if reg.normal.is_some_and(|n| n.is_chain()) {
            return PartStatus::Good;
        }

        let current = match reg.period_type {
            PeriodType::Mileage => mileage_diff,
            PeriodType::Month => days_diff as f64 / 30.0,
            PeriodType::Year => days_diff as f64 / 365.0,
        };

        if let Some(critical) = reg.critical {
            if current >= critical {
                return PartStatus::Critical;
            }
        }
        if let Some(warning) = reg.warning {
            if current >= warning {
                return PartStatus::Warning;
            }
        }
        if reg.normal.is_some() {
            return PartStatus::Good;
        }
        // Row exists but defines no thresholds at all: fall through.
    }

    legacy_status(part, mileage_diff, days_diff, model_lower, year)
}

/// Built-in threshold table, used when no regulation applies.
#[must_use]
pub fn legacy_status(
    part: Part,
    mileage_diff: f64,
    days_diff: i64,
    model_lower: &str,
    year: Option<i32>,
) -> PartStatus {
    let months = days_diff as f64 / 30.0;
    let years = days_diff as f64 / 365.0;
    let is_sprinter = model_lower.contains("mercedes") && model_lower.contains("sprinter");

    match part {
        Part::OilService => {
            // Newer engines run longer-life oil
            let (critical, warning) = if year.is_some_and(|y| y >= 2010) {
                (15500.0, 14000.0)
            } else {
                (10500.0, 9000.0)
            };
            grade_ge(mileage_diff, critical, warning)
        }
        Part::TimingBelt if is_sprinter => PartStatus::Good,
        Part::TimingBelt | Part::AccessoryBelt => grade_ge(mileage_diff, 60500.0, 58000.0),
        Part::WaterPump if is_sprinter => {
            if mileage_diff >= 120000.0 {
                PartStatus::Warning
            } else {
                PartStatus::Good
            }
        }
        Part::WaterPump | Part::Clutch | Part::Starter | Part::Alternator => {
            grade_ge(mileage_diff, 120000.0, 80000.0)
        }
        Part::SuspensionDiagnostic => {
            if months > 3.0 {
                PartStatus::Critical
            } else if months >= 2.0 {
                PartStatus::Warning
            } else {
                PartStatus::Good
            }
        }
        Part::WheelAlignment
        | Part::CaliperService
        | Part::ComputerDiagnostic
        | Part::DpfRegeneration => {
            if months > 4.0 {
                PartStatus::Critical
            } else if months >= 2.0 {
                PartStatus::Warning
            } else {
                PartStatus::Good
            }
        }
        Part::FrontBrakePads | Part::RearBrakePads | Part::HandbrakePads => {
            grade_gt_ge(mileage_diff, 80000.0, 60000.0)
        }
        Part::FrontBrakeDiscs
        | Part::RearBrakeDiscs
        | Part::FrontShockAbsorbers
        | Part::RearShockAbsorbers => grade_gt_ge(mileage_diff, 100000.0, 70000.0),
        Part::StrutMount | Part::BallJoint | Part::TieRod | Part::TieRodEnd => {
            grade_gt_ge(mileage_diff, 60000.0, 50000.0)
        }
        Part::Battery => {
            if years > 4.0 {
                PartStatus::Critical
            } else if years >= 3.0 {
                PartStatus::Warning
            } else {
                PartStatus::Good
            }
        }
        _ => {
            if mileage_diff > 50000.0 {
                PartStatus::Critical
            } else if mileage_diff > 30000.0 {
                PartStatus::Warning
            } else {
                PartStatus::Good
            }
        }
    }
}

fn grade_ge(value: f64, critical: f64, warning: f64) -> PartStatus {
    if value >= critical {
        PartStatus::Critical
    } else if value >= warning {
        PartStatus::Warning
    } else {
        PartStatus::Good
    }
}

fn grade_gt_ge(value: f64, critical: f64, warning: f64) -> PartStatus {
    if value > critical {
        PartStatus::Critical
    } else if value >= warning {
        PartStatus::Warning
    } else {
        PartStatus::Good
    }
}

/// Classify every snapshot of a vehicle in place.
pub fn classify_vehicle(vehicle: &mut Vehicle, matcher: &RegulationMatcher) {
    let model_lower = vehicle.model_lower();
    let year = vehicle.identity.year;

    // Resolve regulations first to keep the borrow on `vehicle` immutable.
    let grades: Vec<(Part, PartStatus)> = vehicle
        .parts
        .iter()
        .filter_map(|(part, snapshot)| {
            let snap = snapshot.as_ref()?;
            let regulation = matcher.best_match(vehicle, *part);
            let status = classify(
                *part,
                snap.mileage_diff,
                snap.days_diff,
                regulation,
                &model_lower,
                year,
            );
            Some((*part, status))
        })
        .collect();

    for (part, status) in grades {
        if let Some(Some(snap)) = vehicle.parts.get_mut(&part) {
            snap.status = status;
        }
    }
}
