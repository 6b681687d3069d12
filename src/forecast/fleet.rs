//! Fleet-wide purchase forecast.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::forecast::mileage::average_monthly_mileage;
use crate::forecast::need::{replacement_need, ReplacementNeed};
use crate::matching::RegulationMatcher;
use crate::model::{Part, Vehicle};
use crate::utils::format_number;

/// One month bucket of the planning horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Zero-based month offset from now
    pub month: u32,
    pub total_cost: f64,
    pub parts: Vec<ReplacementNeed>,
    pub cars: Vec<String>,
}

/// Demand for one part across the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDemand {
    pub part: Part,
    pub total_cost: f64,
    pub count: usize,
    pub cars: Vec<String>,
}

/// Forecast rollup for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleForecast {
    pub license_plate: String,
    pub model: String,
    pub total_cost: f64,
    pub parts: Vec<ReplacementNeed>,
}

/// Forecast rollup for one brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandForecast {
    pub name: String,
    pub cars_count: usize,
    pub total_cost: f64,
    /// Per-part (count, cost) within the brand
    pub parts: IndexMap<Part, (usize, f64)>,
}

/// A month whose spend spikes above the fleet average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRisk {
    pub month: u32,
    pub cost: f64,
    /// Cost as a percentage of the average monthly cost
    pub percentage: f64,
}

/// Many units of the same part due in the horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsRisk {
    pub part: Part,
    pub count: usize,
    pub cost: f64,
}

/// One brand dominating the forecast budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRisk {
    pub name: String,
    pub percentage: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Bulk,
    Reserve,
    Redistribution,
    Optimization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

/// A procurement suggestion derived from the forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
    pub priority: SuggestionPriority,
    pub amount: Option<f64>,
}

/// Complete fleet purchase forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetForecast {
    pub months_ahead: u32,
    /// Total budget including the reserve surcharge
    pub total_budget: f64,
    pub by_month: Vec<MonthBucket>,
    pub by_part: IndexMap<Part, PartDemand>,
    pub by_vehicle: IndexMap<String, VehicleForecast>,
    pub by_brand: IndexMap<String, BrandForecast>,
    /// Top ten parts by projected cost
    pub top_parts: Vec<PartDemand>,
    pub budget_risks: Vec<BudgetRisk>,
    pub logistics_risks: Vec<LogisticsRisk>,
    pub brand_risk: Option<BrandRisk>,
    pub suggestions: Vec<Suggestion>,
}

/// Compute the purchase forecast for a fleet over `months_ahead` months
/// (typically 6 or 12).
///
/// Per-vehicle projection runs in parallel; aggregation is sequential
/// and deterministic in fleet order.
#[must_use]
pub fn fleet_forecast(
    fleet: &[Vehicle],
    matcher: &RegulationMatcher,
    config: &EngineConfig,
    months_ahead: u32,
    today: NaiveDate,
) -> FleetForecast {
    let per_vehicle: Vec<(usize, Vec<ReplacementNeed>)> = fleet
        .par_iter()
        .enumerate()
        .map(|(index, vehicle)| {
            let avg_mileage = average_monthly_mileage(vehicle, config, today);
            let needs: Vec<ReplacementNeed> = vehicle
                .parts
                .iter()
                .filter_map(|(part, snapshot)| {
                    let snapshot = snapshot.as_ref()?;
                    let regulation = matcher.best_match(vehicle, *part)?;
                    replacement_need(
                        vehicle,
                        *part,
                        regulation,
                        snapshot,
                        months_ahead,
                        avg_mileage,
                        config,
                    )
                })
                .collect();
            (index, needs)
        })
        .collect();

    let mut needs_by_vehicle: Vec<Vec<ReplacementNeed>> = vec![Vec::new(); fleet.len()];
    for (index, needs) in per_vehicle {
        needs_by_vehicle[index] = needs;
    }

    let mut forecast = FleetForecast {
        months_ahead,
        total_budget: 0.0,
        by_month: (0..months_ahead)
            .map(|month| MonthBucket {
                month,
                total_cost: 0.0,
                parts: Vec::new(),
                cars: Vec::new(),
            })
            .collect(),
        by_part: IndexMap::new(),
        by_vehicle: IndexMap::new(),
        by_brand: IndexMap::new(),
        top_parts: Vec::new(),
        budget_risks: Vec::new(),
        logistics_risks: Vec::new(),
        brand_risk: None,
        suggestions: Vec::new(),
    };

    for (vehicle, needs) in fleet.iter().zip(needs_by_vehicle) {
        let brand = config.brand_label(&vehicle.identity.model);
        let plate = vehicle.identity.license_plate.clone();

        let mut vehicle_forecast = VehicleForecast {
            license_plate: plate.clone(),
            model: vehicle.identity.model.clone(),
            total_cost: 0.0,
            parts: Vec::new(),
        };

        let brand_entry = forecast
            .by_brand
            .entry(brand)
            .or_insert_with_key(|name| BrandForecast {
                name: name.clone(),
                cars_count: 0,
                total_cost: 0.0,
                parts: IndexMap::new(),
            });
        // Counted per vehicle whether or not anything is due.
        brand_entry.cars_count += 1;

        for need in needs {
            let month = need.replacement_month.min(months_ahead.saturating_sub(1)) as usize;
            forecast.total_budget += need.total_cost;

            let bucket = &mut forecast.by_month[month];
            bucket.total_cost += need.total_cost;
            bucket.cars.push(plate.clone());

            let demand = forecast
                .by_part
                .entry(need.part)
                .or_insert_with(|| PartDemand {
                    part: need.part,
                    total_cost: 0.0,
                    count: 0,
                    cars: Vec::new(),
                });
            demand.total_cost += need.total_cost;
            demand.count += 1;
            demand.cars.push(plate.clone());

            brand_entry.total_cost += need.total_cost;
            let part_slot = brand_entry.parts.entry(need.part).or_insert((0, 0.0));
            part_slot.0 += 1;
            part_slot.1 += need.total_cost;

            vehicle_forecast.total_cost += need.total_cost;
            forecast.by_month[month].parts.push(need.clone());
            vehicle_forecast.parts.push(need);
        }

        forecast.by_vehicle.insert(plate, vehicle_forecast);
    }

    // Reserve surcharge applied once everything is summed.
    let reserve = 1.0 + config.forecast_reserve;
    forecast.total_budget *= reserve;
    for bucket in &mut forecast.by_month {
        bucket.total_cost *= reserve;
    }

    let mut top: Vec<PartDemand> = forecast.by_part.values().cloned().collect();
    top.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    top.truncate(10);
    forecast.top_parts = top;

    analyze_risks(&mut forecast);
    generate_suggestions(&mut forecast);

    forecast
}

fn analyze_risks(forecast: &mut FleetForecast) {
    let avg_monthly = forecast.total_budget / f64::from(forecast.months_ahead.max(1));

    for bucket in &forecast.by_month {
        if bucket.total_cost > avg_monthly * 1.5 {
            forecast.budget_risks.push(BudgetRisk {
                month: bucket.month,
                cost: bucket.total_cost,
                percentage: bucket.total_cost / avg_monthly * 100.0,
            });
        }
    }

    for demand in forecast.by_part.values() {
        if demand.count > 5 {
            forecast.logistics_risks.push(LogisticsRisk {
                part: demand.part,
                count: demand.count,
                cost: demand.total_cost,
            });
        }
    }

    let dominant = forecast
        .by_brand
        .values()
        .max_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
    if let Some(brand) = dominant {
        if brand.total_cost > forecast.total_budget * 0.6 {
            forecast.brand_risk = Some(BrandRisk {
                name: brand.name.clone(),
                percentage: brand.total_cost / forecast.total_budget * 100.0,
                cost: brand.total_cost,
            });
        }
    }
}

fn generate_suggestions(forecast: &mut FleetForecast) {
    for risk in &forecast.logistics_risks {
        forecast.suggestions.push(Suggestion {
            kind: SuggestionKind::Bulk,
            text: format!(
                "Рекомендуємо купити оптом {} одиниць \"{}\" для економії",
                risk.count,
                risk.part.display_name()
            ),
            priority: SuggestionPriority::High,
            amount: None,
        });
    }

    let reserve_amount = forecast.total_budget * 0.2;
    forecast.suggestions.push(Suggestion {
        kind: SuggestionKind::Reserve,
        text: format!(
            "Створити резервний фонд: {} грн (20% від бюджету)",
            format_number(reserve_amount)
        ),
        priority: SuggestionPriority::Medium,
        amount: Some(reserve_amount),
    });

    if !forecast.budget_risks.is_empty() {
        let months: Vec<String> = forecast
            .budget_risks
            .iter()
            .map(|r| (r.month + 1).to_string())
            .collect();
        forecast.suggestions.push(Suggestion {
            kind: SuggestionKind::Redistribution,
            text: format!(
                "Перерозподілити роботи для уникнення пікових навантажень в місяцях: {}",
                months.join(", ")
            ),
            priority: SuggestionPriority::Medium,
            amount: None,
        });
    }

    if let Some(risk) = &forecast.brand_risk {
        forecast.suggestions.push(Suggestion {
            kind: SuggestionKind::Optimization,
            text: format!(
                "Марка \"{}\" складає {:.1}% витрат. Розглянути оптимізацію автопарку.",
                risk.name, risk.percentage
            ),
            priority: SuggestionPriority::Low,
            amount: None,
        });
    }
}
