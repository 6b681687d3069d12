//! Recommendation text assembly.

use chrono::{Datelike, NaiveDate};

use crate::config::EngineConfig;
use crate::matching::RegulationMatcher;
use crate::model::{Part, PartStatus, PeriodType, Regulation, Vehicle};
use crate::utils::format_number;

const MONTH_NAMES: [&str; 12] = [
    "січень",
    "лютий",
    "березень",
    "квітень",
    "травень",
    "червень",
    "липень",
    "серпень",
    "вересень",
    "жовтень",
    "листопад",
    "грудень",
];

/// Default intervals used when no regulation covers the part.
const fn default_mileage(part: Part) -> f64 {
    match part {
        Part::OilService => 15000.0,
        _ => 60000.0,
    }
}

const fn default_months(part: Part) -> f64 {
    match part {
        Part::WheelAlignment => 12.0,
        _ => 6.0,
    }
}

/// Compose a full recommendation sentence from its pieces.
///
/// For month- or year-based regulations a repetition phrase is appended
/// between the deadline and the benefit.
#[must_use]
pub fn build_recommendation_text(
    action: &str,
    when_to_do: &str,
    regulation: Option<&Regulation>,
    benefit: &str,
) -> String {
    let mut text = format!("{action}. {when_to_do}");

    if let Some(reg) = regulation {
        if let Some(value) = reg.normal.and_then(|n| n.value()) {
            match reg.period_type {
                PeriodType::Month => {
                    let months = value.round() as i64;
                    if months == 1 {
                        text.push_str(". Рекомендуємо проводити щомісяця");
                    } else if (2..=4).contains(&months) {
                        text.push_str(&format!(". Рекомендуємо проводити кожні {months} місяці"));
                    } else if months >= 5 {
                        text.push_str(&format!(". Рекомендуємо проводити кожні {months} місяців"));
                    }
                }
                PeriodType::Year => {
                    let years = value.round() as i64;
                    if years == 1 {
                        text.push_str(". Рекомендуємо проводити щороку");
                    } else if years == 2 {
                        text.push_str(". Рекомендуємо проводити кожні 2 роки");
                    } else if years > 2 {
                        text.push_str(&format!(". Рекомендуємо проводити кожні {years} роки"));
                    }
                }
                PeriodType::Mileage => {}
            }
        }
    }

    text.push_str(&format!(". {benefit}"));
    text
}

/// Human-readable next service point for one part.
///
/// Mileage-scheduled parts get a "next replacement at N km" phrase or an
/// overdue marker; date-scheduled works get a deadline or the month of
/// the next check. Other parts have no next-point phrasing.
#[must_use]
pub fn next_replacement_info(
    vehicle: &Vehicle,
    part: Part,
    matcher: &RegulationMatcher,
    config: &EngineConfig,
    today: NaiveDate,
) -> Option<String> {
    let snapshot = vehicle.snapshot(part)?;
    let regulation = matcher.best_match(vehicle, part);

    if part.is_mileage_scheduled() {
        let mut normal = regulation
            .filter(|r| r.period_type == PeriodType::Mileage)
            .and_then(|r| r.normal.and_then(|n| n.value()))
            .unwrap_or_else(|| default_mileage(part));

        // Pump and accessory belt replacements ride along with the timing
        // belt job, so a belt-driven engine adopts the timing interval.
        if matches!(part, Part::WaterPump | Part::AccessoryBelt)
            && !config.is_chain_drive(&vehicle.model_lower())
        {
            let timing = matcher
                .best_match(vehicle, Part::TimingBelt)
                .filter(|r| r.period_type == PeriodType::Mileage)
                .and_then(|r| r.normal.and_then(|n| n.value()));
            if let Some(timing_normal) = timing {
                if timing_normal != normal {
                    normal = timing_normal;
                }
            }
        }

        let remaining = normal - snapshot.mileage_diff;
        if remaining <= 0.0 {
            return Some("Уже пора міняти 👨‍🔧".to_string());
        }
        let next_mileage = vehicle.current_mileage + remaining;
        return Some(format!(
            "Наступна заміна на {} км",
            format_number(next_mileage)
        ));
    }

    if part.is_date_scheduled() {
        let normal = regulation
            .filter(|r| r.period_type == PeriodType::Month)
            .and_then(|r| r.normal.and_then(|n| n.value()))
            .unwrap_or_else(|| default_months(part));

        // Flagged inspections are always due within the week; caliper and
        // computer diagnostics only escalate on warning.
        let urgent = match part {
            Part::SuspensionDiagnostic | Part::WheelAlignment => {
                snapshot.status.needs_attention()
            }
            _ => snapshot.status == PartStatus::Warning,
        };
        if urgent {
            return Some("Виконати протягом тижня ⏳".to_string());
        }

        let remaining_months = normal - (snapshot.days_diff / 30) as f64;
        if remaining_months <= 0.0 {
            return Some("Виконати протягом тижня ⏳".to_string());
        }

        let next = today
            .checked_add_months(chrono::Months::new(remaining_months as u32))
            .unwrap_or(today);
        let month_name = MONTH_NAMES[next.month0() as usize];
        return Some(format!("Наступна перевірка: {month_name}"));
    }

    None
}
