//! Per-vehicle maintenance schedule.
//!
//! Projects upcoming replacements for one vehicle into a display list
//! with deadlines, recommended manufacturers and diagnose-first
//! warnings. Brake and suspension parts always carry a warning to
//! diagnose before replacing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::forecast::mileage::average_monthly_mileage;
use crate::forecast::need::{replacement_need, Urgency};
use crate::matching::RegulationMatcher;
use crate::model::{Part, PeriodType, Vehicle};

const BRAKE_WARNING: &str = "⚠️ ОБОВ'ЯЗКОВО спочатку заїхати на профілактику направляючих і перевірити стан гальмівної системи (товщину дисків гальмівних, залишок колодок гальмівних). Міняти запчастини ТІЛЬКИ ПІСЛЯ ДІАГНОСТИКИ І ТІЛЬКИ ЗА НЕОБХІДНОСТІ.";
const SUSPENSION_WARNING: &str = "⚠️ ОБОВ'ЯЗКОВО спочатку зробити діагностику ходової частини. Міняти запчастини ТІЛЬКИ ПІСЛЯ ДІАГНОСТИКИ І ТІЛЬКИ ЗА НЕОБХІДНОСТІ.";
const ALIGNMENT_WARNING: &str = "⚠️ ОБОВ'ЯЗКОВО спочатку зробити діагностику ходової частини.";

/// Display urgency of a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Critical,
    Warning,
    Forecasted,
}

/// One row of the maintenance schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub part: Part,
    /// Whether the deadline is mileage- or time-based
    pub period_type: PeriodType,
    pub status: ScheduleStatus,
    /// Human-readable deadline phrase
    pub when: String,
    pub manufacturers: Option<&'static str>,
    pub warning: Option<&'static str>,
    pub cost: f64,
}

/// Diagnose-first warning for a part, if it has one.
fn warning_for(part: Part) -> Option<&'static str> {
    if part.is_brake_group() {
        return Some(BRAKE_WARNING);
    }
    if part.is_suspension_group() {
        return Some(SUSPENSION_WARNING);
    }
    if part == Part::WheelAlignment {
        return Some(ALIGNMENT_WARNING);
    }
    None
}

fn deadline_phrase(months_until: Option<f64>) -> String {
    match months_until {
        Some(months) => {
            let months = months.ceil() as i64;
            if months <= 1 {
                "Через місяць".to_string()
            } else {
                format!("Через {months} місяці")
            }
        }
        None => "Планове".to_string(),
    }
}

/// Build the six-month maintenance schedule for one vehicle.
///
/// Electrical units (starter, alternator, battery) are excluded from
/// this view, and DPF regeneration rows are suppressed for exempt
/// vehicles. Critical rows sort first, then warnings.
#[must_use]
pub fn maintenance_schedule(
    vehicle: &Vehicle,
    matcher: &RegulationMatcher,
    config: &EngineConfig,
    today: NaiveDate,
) -> Vec<ScheduleItem> {
    let hide_dpf = config.is_dpf_exception(&vehicle.identity.model, vehicle.identity.year);
    let avg_mileage = average_monthly_mileage(vehicle, config, today);

    let mut items: Vec<ScheduleItem> = vehicle
        .parts
        .iter()
        .filter_map(|(part, snapshot)| {
            let snapshot = snapshot.as_ref()?;
            if part.is_schedule_excluded() {
                return None;
            }
            if hide_dpf && *part == Part::DpfRegeneration {
                return None;
            }

            let regulation = matcher.best_match(vehicle, *part)?;
            let need =
                replacement_need(vehicle, *part, regulation, snapshot, 6, avg_mileage, config)?;

            let (status, when) = match need.urgency {
                Urgency::Critical => (
                    ScheduleStatus::Critical,
                    "Це лише прогноз, але бажано звернути увагу найближчим часом".to_string(),
                ),
                Urgency::Planned => (ScheduleStatus::Warning, deadline_phrase(need.months_until)),
                Urgency::Forecasted => {
                    (ScheduleStatus::Forecasted, deadline_phrase(need.months_until))
                }
            };

            Some(ScheduleItem {
                part: *part,
                period_type: need.period_type,
                status,
                when,
                manufacturers: config.manufacturers(*part),
                warning: warning_for(*part),
                cost: need.total_cost,
            })
        })
        .collect();

    items.sort_by_key(|item| match item.status {
        ScheduleStatus::Critical => 0,
        ScheduleStatus::Warning => 1,
        ScheduleStatus::Forecasted => 2,
    });
    items
}
