//! Per-vehicle recommendation generation.
//!
//! Turns classified part states, cost statistics and wash history into
//! the ordered advice list shown on a vehicle card. Brake and suspension
//! issues collapse into one consolidated recommendation each; chain-drive
//! vehicles never get a timing belt recommendation.

mod text;

pub use text::{build_recommendation_text, next_replacement_info};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::costs::CostStats;
use crate::matching::RegulationMatcher;
use crate::model::{Part, PartStatus, PeriodType, ServiceRecord, Vehicle};
use crate::utils::date::months_ago;
use crate::utils::format_number;

/// Display severity of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

/// One actionable recommendation for a vehicle card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub icon: &'static str,
    pub text: String,
    pub severity: Severity,
    /// Lower number = shown first
    pub priority: u8,
}

/// Severity for a part-driven recommendation: critical reads as a
/// warning, warning reads as info.
const fn severity_for(status: PartStatus) -> Severity {
    match status {
        PartStatus::Critical => Severity::Warning,
        _ => Severity::Info,
    }
}

fn flagged(vehicle: &Vehicle, part: Part) -> Option<PartStatus> {
    vehicle
        .snapshot(part)
        .map(|s| s.status)
        .filter(|s| s.needs_attention())
}

/// Whether the vehicle has no wash-keyword record within the last
/// calendar month before `today`.
#[must_use]
pub fn needs_wash(history: &[ServiceRecord], config: &EngineConfig, today: NaiveDate) -> bool {
    let one_month_ago = months_ago(today, 1);
    let last_wash = history
        .iter()
        .filter(|r| config.is_wash_text(&r.search_text()))
        .filter_map(|r| r.parsed_date())
        .max();
    match last_wash {
        Some(date) => date < one_month_ago,
        None => true,
    }
}

/// `(регламент: N км)` suffix when a mileage regulation with a numeric
/// interval exists.
fn regulation_suffix(
    vehicle: &Vehicle,
    part: Part,
    matcher: &RegulationMatcher,
) -> String {
    matcher
        .best_match(vehicle, part)
        .and_then(|reg| {
            if reg.period_type != PeriodType::Mileage {
                return None;
            }
            reg.normal.and_then(|n| n.value())
        })
        .map_or_else(String::new, |v| {
            format!(" (регламент: {} км)", format_number(v))
        })
}

/// Generate the ordered recommendation list for one vehicle.
#[must_use]
pub fn generate_recommendations(
    vehicle: &Vehicle,
    cost_stats: &CostStats,
    matcher: &RegulationMatcher,
    config: &EngineConfig,
    today: NaiveDate,
) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = Vec::new();

    if cost_stats.average_per_month > config.monthly_spend_threshold {
        recs.push(Recommendation {
            icon: "⚠️",
            text: "Високі щомісячні витрати. Рекомендуємо перевірити економічність авто."
                .to_string(),
            severity: Severity::Warning,
            priority: 99,
        });
    }

    let caliper_flagged = flagged(vehicle, Part::CaliperService);
    let diagnostic_flagged = flagged(vehicle, Part::SuspensionDiagnostic);
    let diagnostic_done = vehicle
        .snapshot(Part::SuspensionDiagnostic)
        .is_some_and(|s| !s.status.needs_attention());
    let brake_issue = Part::ALL
        .iter()
        .any(|p| p.is_brake_group() && flagged(vehicle, *p).is_some());
    let suspension_issue = Part::ALL
        .iter()
        .any(|p| p.is_suspension_group() && flagged(vehicle, *p).is_some());

    // Standalone scheduled works. Caliper service and the suspension
    // diagnostic are handled by the consolidated blocks below.
    if let Some(status) = flagged(vehicle, Part::OilService) {
        let next = next_replacement_info(vehicle, Part::OilService, matcher, config, today);
        let next_part = next.map_or_else(String::new, |n| format!("{n}. "));
        recs.push(Recommendation {
            icon: "🛢️",
            text: format!(
                "Необхідно провести 🛢️ ТО (масло+фільтри){}. {}Допоможе підтримувати двигун у гарному стані. Рекомендовані виробники: MANN, KNECHT, MAHLE",
                regulation_suffix(vehicle, Part::OilService, matcher),
                next_part
            ),
            severity: severity_for(status),
            priority: 4,
        });
    }

    if let Some(status) = flagged(vehicle, Part::WheelAlignment) {
        let when = next_replacement_info(vehicle, Part::WheelAlignment, matcher, config, today)
            .unwrap_or_else(|| "Виконати протягом тижня ⏳".to_string());
        recs.push(Recommendation {
            icon: "📐",
            text: build_recommendation_text(
                "Необхідно провести Розвал-сходження (налаштування кутів установки коліс)",
                &when,
                matcher.best_match(vehicle, Part::WheelAlignment),
                "Рекомендується після перевірки ходової, якщо по ходовій немає зауважень. Покращує керованість автомобіля, зменшує знос шин та забезпечує рівномірний знос протектора, що продовжує термін служби шин",
            ),
            severity: severity_for(status),
            priority: 7,
        });
    }

    if let Some(status) = flagged(vehicle, Part::ComputerDiagnostic) {
        let when = next_replacement_info(vehicle, Part::ComputerDiagnostic, matcher, config, today)
            .unwrap_or_else(|| "Виконати протягом тижня ⏳".to_string());
        recs.push(Recommendation {
            icon: "💻",
            text: build_recommendation_text(
                "Необхідно провести Комп'ютерну діагностику (перевірка електронних систем, сканування помилок)",
                &when,
                matcher.best_match(vehicle, Part::ComputerDiagnostic),
                "Дозволяє виявити приховані помилки та попередити несправності електронних систем. Своєчасна діагностика допомагає уникнути дорогих ремонтів та забезпечує надійну роботу всіх систем автомобіля",
            ),
            severity: severity_for(status),
            priority: 8,
        });
    }

    if !config.is_dpf_exception(&vehicle.identity.model, vehicle.identity.year) {
        if let Some(status) = flagged(vehicle, Part::DpfRegeneration) {
            let when = next_replacement_info(vehicle, Part::DpfRegeneration, matcher, config, today)
                .unwrap_or_else(|| "Виконати протягом тижня ⏳".to_string());
            recs.push(Recommendation {
                icon: "🔥",
                text: build_recommendation_text(
                    "Необхідно провести Прожиг сажового фільтру (регенерація DPF фільтру)",
                    &when,
                    matcher.best_match(vehicle, Part::DpfRegeneration),
                    "Рекомендується для дизельних авто з фільтром DPF. Допомагає підтримувати ефективність та економічність двигуна, запобігає засміченню фільтру та знижує витрату палива",
                ),
                severity: severity_for(status),
                priority: 9,
            });
        }
    }

    // Consolidated brake recommendation: the caliper service work is the
    // anchor; plain brake part issues fall back to the same advice.
    if caliper_flagged.is_some() || brake_issue {
        let when = caliper_flagged
            .and_then(|_| next_replacement_info(vehicle, Part::CaliperService, matcher, config, today))
            .unwrap_or_else(|| "Виконати протягом тижня ⏳".to_string());
        recs.push(Recommendation {
            icon: "🛠️",
            text: build_recommendation_text(
                "Необхідно провести Профілактику направляючих супортів (заміна направляючих, мащення, чистка) та перевірити стан гальмівної системи (товщину дисків гальмівних, залишок колодок гальмівних)",
                &when,
                matcher.best_match(vehicle, Part::CaliperService),
                "Це забезпечить рівномірну роботу гальм і продовжить ресурс супортів, гальмівних дисків і колодок. Регулярна профілактика запобігає заклинюванню супортів та забезпечує безпеку гальмування",
            ),
            severity: Severity::Warning,
            priority: 5,
        });
    }

    // Consolidated suspension recommendation, suppressed entirely when a
    // recent diagnostic came back clean.
    if !diagnostic_done && (diagnostic_flagged.is_some() || suspension_issue) {
        let when = diagnostic_flagged
            .and_then(|_| {
                next_replacement_info(vehicle, Part::SuspensionDiagnostic, matcher, config, today)
            })
            .unwrap_or_else(|| "Виконати протягом тижня ⏳".to_string());
        recs.push(Recommendation {
            icon: "🔍",
            text: build_recommendation_text(
                "Необхідно провести Діагностику ходової (перевірка амортизаторів, опор, шарових опор, рульових тяг та наконечників, стабілізаторів)",
                &when,
                matcher.best_match(vehicle, Part::SuspensionDiagnostic),
                "Це забезпечить безпеку руху, комфорт під час їзди та допоможе виявити проблеми ходової частини на ранній стадії, що дозволить уникнути більш серйозних та дорогих ремонтів",
            ),
            severity: Severity::Warning,
            priority: 6,
        });
    }

    // Oil fallback: nothing flagged, but the last oil-related record is
    // older than six months.
    if flagged(vehicle, Part::OilService).is_none() {
        let last_maintenance = vehicle.history.iter().find(|r| {
            let text = r.work_description.to_lowercase();
            text.contains("масл") || text.contains("то")
        });
        if let Some(record) = last_maintenance {
            if let Some(date) = record.parsed_date() {
                let months_since = (today - date).num_days() as f64 / 30.0;
                if months_since > 6.0 {
                    recs.push(Recommendation {
                        icon: "🛢️",
                        text: format!(
                            "Необхідно провести 🛢️ ТО (масло+фільтри){}. Допоможе підтримувати двигун у гарному стані. Рекомендовані виробники: MANN, KNECHT, MAHLE",
                            regulation_suffix(vehicle, Part::OilService, matcher)
                        ),
                        severity: Severity::Warning,
                        priority: 4,
                    });
                }
            }
        }
    }

    if needs_wash(&vehicle.history, config, today) {
        recs.push(Recommendation {
            icon: "🧼",
            text: "🧼 Помити автомобіль, поприбирати в салоні авто. Миття кузова допоможе зберегти покриття та захистити від корозії. Прибирання салону радимо проводити щоденно для чистоти, комфорту та приємної атмосфери в авто".to_string(),
            severity: Severity::Info,
            priority: 10,
        });
    }

    if config.has_spark_plugs(&vehicle.identity.model) {
        if let Some(status) = flagged(vehicle, Part::SparkPlugs) {
            recs.push(Recommendation {
                icon: "🔥",
                text: "Необхідно замінити свічки запалювання".to_string(),
                severity: severity_for(status),
                priority: 99,
            });
        }
    }

    if !config.is_chain_drive(&vehicle.model_lower()) {
        if let Some(status) = flagged(vehicle, Part::TimingBelt) {
            let next = next_replacement_info(vehicle, Part::TimingBelt, matcher, config, today);
            let next_part = next.map_or_else(String::new, |n| format!("Наступна заміна: {n}. "));
            recs.push(Recommendation {
                icon: "⚙️",
                text: format!(
                    "Необхідно провести заміну ⚙️ ГРМ (ролики+ремінь){}. {}Своєчасна заміна захищає двигун від серйозних пошкоджень. Рекомендовані виробники: CONTINENTAL, INA, SKF",
                    regulation_suffix(vehicle, Part::TimingBelt, matcher),
                    next_part
                ),
                severity: severity_for(status),
                priority: 1,
            });
        }
    }

    if let Some(status) = flagged(vehicle, Part::WaterPump) {
        let next = next_replacement_info(vehicle, Part::WaterPump, matcher, config, today);
        let next_part = next.map_or_else(String::new, |n| format!("Наступна заміна: {n}. "));
        recs.push(Recommendation {
            icon: "💧",
            text: format!(
                "💧 Помпа - рекомендуємо контролювати роботу системи охолодження{}. {}Справна помпа підтримує оптимальну температуру двигуна. Рекомендовані виробники: HEPU, GRAF, INA",
                regulation_suffix(vehicle, Part::WaterPump, matcher),
                next_part
            ),
            severity: severity_for(status),
            priority: 2,
        });
    }

    if let Some(status) = flagged(vehicle, Part::AccessoryBelt) {
        let next = next_replacement_info(vehicle, Part::AccessoryBelt, matcher, config, today);
        let next_part = next.map_or_else(String::new, |n| format!("Наступна заміна: {n}. "));
        recs.push(Recommendation {
            icon: "🔧",
            text: format!(
                "Необхідно перевірити 🔧 Обвідний ремінь+ролики та замінити{}. {}Відповідає за стабільну роботу навісного обладнання. Рекомендовані виробники: CONTINENTAL, INA",
                regulation_suffix(vehicle, Part::AccessoryBelt, matcher),
                next_part
            ),
            severity: severity_for(status),
            priority: 3,
        });
    }

    if recs.is_empty() {
        recs.push(Recommendation {
            icon: "✅",
            text: "Витрати в межах норми. Авто в хорошому стані.".to_string(),
            severity: Severity::Success,
            priority: 99,
        });
    }

    // Stable, so equal priorities keep insertion order.
    recs.sort_by_key(|r| r.priority);
    recs
}
