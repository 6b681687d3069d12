//! Expense statistics and breakdown frequency analysis.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{ServiceRecord, Vehicle};
use crate::utils::date::months_ago;

/// Expense category buckets for the cost dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Maintenance,
    Brakes,
    Suspension,
    Engine,
    Electrical,
    TiresAndDiagnostics,
    Other,
}

impl ExpenseCategory {
    /// Ukrainian dashboard label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Maintenance => "ТО та обслуговування",
            Self::Brakes => "Гальмівна система",
            Self::Suspension => "Ходова частина",
            Self::Engine => "Двигун",
            Self::Electrical => "Електрика",
            Self::TiresAndDiagnostics => "Шини та діагностика",
            Self::Other => "Інші витрати",
        }
    }

    /// Classify a work description into a category. First matching
    /// keyword group wins; unmatched text lands in `Other`.
    #[must_use]
    pub fn detect(description: &str) -> Self {
        let text = description.to_lowercase();
        let has = |kws: &[&str]| kws.iter().any(|kw| text.contains(kw));

        if has(&["масл", "фільтр", "то"]) {
            Self::Maintenance
        } else if has(&["гальм", "колодк", "диск"]) {
            Self::Brakes
        } else if has(&["амортизатор", "підвіск", "ходов"]) {
            Self::Suspension
        } else if has(&["двигун", "грм", "помп"]) {
            Self::Engine
        } else if has(&["акб", "акумулятор", "стартер"]) {
            Self::Electrical
        } else if has(&["шини", "колес", "диагност"]) {
            Self::TiresAndDiagnostics
        } else {
            Self::Other
        }
    }
}

/// Aggregated expense statistics for one vehicle's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostStats {
    /// Sum of all priced records
    pub total_spent: f64,
    /// Sum of priced records within one year before `today`
    pub last_year_spent: f64,
    /// Last-year spend divided by the number of distinct months seen
    /// anywhere in the history (not just the last year)
    pub average_per_month: f64,
    /// Spend per "YYYY-MM" key
    pub by_month: BTreeMap<String, f64>,
    /// Spend per calendar year
    pub by_year: BTreeMap<i32, f64>,
    /// Spend per expense category
    pub by_category: IndexMap<ExpenseCategory, f64>,
}

/// Compute expense statistics over a service history.
///
/// Priced records with unusable dates still count toward the total and
/// category sums but never toward the time-bucketed groupings.
#[must_use]
pub fn cost_stats(history: &[ServiceRecord], today: NaiveDate) -> CostStats {
    let mut stats = CostStats {
        total_spent: 0.0,
        last_year_spent: 0.0,
        average_per_month: 0.0,
        by_month: BTreeMap::new(),
        by_year: BTreeMap::new(),
        by_category: IndexMap::new(),
    };

    let one_year_ago = months_ago(today, 12);

    for record in history {
        if record.total_with_vat <= 0.0 {
            continue;
        }
        let amount = record.total_with_vat;
        stats.total_spent += amount;
        *stats
            .by_category
            .entry(ExpenseCategory::detect(&record.work_description))
            .or_insert(0.0) += amount;

        let Some(date) = record.parsed_date() else {
            continue;
        };

        *stats.by_year.entry(date.year()).or_insert(0.0) += amount;
        if date >= one_year_ago {
            stats.last_year_spent += amount;
        }
        let month_key = format!("{:04}-{:02}", date.year(), date.month());
        *stats.by_month.entry(month_key).or_insert(0.0) += amount;
    }

    // Divisor deliberately spans the whole history, so long-lived
    // vehicles with a quiet last year average low.
    let months_count = stats.by_month.len();
    if months_count > 0 {
        stats.average_per_month = stats.last_year_spent / months_count as f64;
    }

    stats
}

/// Breakdown counts for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleBreakdowns {
    pub license_plate: String,
    pub model: String,
    pub city: String,
    pub breakdowns: usize,
    pub by_category: IndexMap<ExpenseCategory, usize>,
}

/// Fleet-wide breakdown frequency statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownStats {
    pub total_breakdowns: usize,
    pub by_category: IndexMap<ExpenseCategory, usize>,
    pub by_vehicle: Vec<VehicleBreakdowns>,
}

impl BreakdownStats {
    /// Categories ordered by frequency, capped at the top ten.
    #[must_use]
    pub fn top_categories(&self) -> Vec<(ExpenseCategory, usize)> {
        let mut sorted: Vec<_> = self
            .by_category
            .iter()
            .map(|(c, n)| (*c, *n))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(10);
        sorted
    }
}

/// Count priced service events per category across the fleet.
///
/// `year` restricts counting to records of that calendar year; `city`
/// restricts to vehicles based in that city.
#[must_use]
pub fn breakdown_frequency(
    fleet: &[Vehicle],
    year: Option<i32>,
    city: Option<&str>,
) -> BreakdownStats {
    let mut stats = BreakdownStats {
        total_breakdowns: 0,
        by_category: IndexMap::new(),
        by_vehicle: Vec::new(),
    };

    for vehicle in fleet {
        if let Some(city) = city {
            if vehicle.identity.city != city {
                continue;
            }
        }

        let mut per_vehicle: Option<VehicleBreakdowns> = None;

        for record in &vehicle.history {
            if record.work_description.is_empty() || record.total_with_vat <= 0.0 {
                continue;
            }
            if let Some(year) = year {
                if record.parsed_date().map(|d| d.year()) != Some(year) {
                    continue;
                }
            }

            let category = ExpenseCategory::detect(&record.work_description);
            *stats.by_category.entry(category).or_insert(0) += 1;
            stats.total_breakdowns += 1;

            let entry = per_vehicle.get_or_insert_with(|| VehicleBreakdowns {
                license_plate: vehicle.identity.license_plate.clone(),
                model: vehicle.identity.model.clone(),
                city: vehicle.identity.city.clone(),
                breakdowns: 0,
                by_category: IndexMap::new(),
            });
            entry.breakdowns += 1;
            *entry.by_category.entry(category).or_insert(0) += 1;
        }

        if let Some(entry) = per_vehicle {
            stats.by_vehicle.push(entry);
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VehicleIdentity;
    use indexmap::IndexMap as PartsMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn record(date: &str, amount: f64, work: &str) -> ServiceRecord {
        ServiceRecord {
            license_plate: "AA1111BB".to_string(),
            date: date.to_string(),
            mileage: None,
            work_description: work.to_string(),
            parts_used: String::new(),
            total_with_vat: amount,
        }
    }

    #[test]
    fn test_category_detection() {
        assert_eq!(
            ExpenseCategory::detect("Заміна масла"),
            ExpenseCategory::Maintenance
        );
        assert_eq!(
            ExpenseCategory::detect("Гальмівні колодки"),
            ExpenseCategory::Brakes
        );
        assert_eq!(
            ExpenseCategory::detect("Заміна ременя ГРМ"),
            ExpenseCategory::Engine
        );
        assert_eq!(
            ExpenseCategory::detect("Фарбування бампера"),
            ExpenseCategory::Other
        );
    }

    #[test]
    fn test_totals_and_buckets() {
        let history = vec![
            record("15.01.2024", 2000.0, "Заміна масла"),
            record("20.01.2024", 1500.0, "Гальмівні колодки"),
            record("10.03.2022", 5000.0, "Заміна ременя ГРМ"),
            record("01.02.2024", 0.0, "Огляд"),
        ];
        let stats = cost_stats(&history, today());

        assert_eq!(stats.total_spent, 8500.0);
        assert_eq!(stats.last_year_spent, 3500.0);
        assert_eq!(stats.by_year.get(&2024), Some(&3500.0));
        assert_eq!(stats.by_year.get(&2022), Some(&5000.0));
        assert_eq!(stats.by_month.get("2024-01"), Some(&3500.0));
    }

    #[test]
    fn test_average_divides_by_all_history_months() {
        // Two distinct months overall, only one inside the last year
        let history = vec![
            record("15.01.2024", 3000.0, "Заміна масла"),
            record("10.03.2022", 5000.0, "Заміна масла"),
        ];
        let stats = cost_stats(&history, today());
        assert_eq!(stats.last_year_spent, 3000.0);
        assert_eq!(stats.average_per_month, 1500.0);
    }

    #[test]
    fn test_undated_record_counts_in_total_only() {
        let history = vec![record("десь взимку", 2000.0, "Заміна масла")];
        let stats = cost_stats(&history, today());
        assert_eq!(stats.total_spent, 2000.0);
        assert!(stats.by_month.is_empty());
        assert!(stats.by_year.is_empty());
        assert_eq!(
            stats.by_category.get(&ExpenseCategory::Maintenance),
            Some(&2000.0)
        );
        assert_eq!(stats.average_per_month, 0.0);
    }

    fn vehicle_with_history(city: &str, history: Vec<ServiceRecord>) -> Vehicle {
        Vehicle {
            identity: VehicleIdentity {
                license_plate: "AA1111BB".to_string(),
                model: "Peugeot 301".to_string(),
                year: Some(2017),
                city: city.to_string(),
                photo_grade: String::new(),
            },
            current_mileage: 0.0,
            parts: PartsMap::new(),
            history,
        }
    }

    #[test]
    fn test_breakdown_frequency_counts_priced_records() {
        let fleet = vec![vehicle_with_history(
            "Київ",
            vec![
                record("15.01.2024", 2000.0, "Заміна масла"),
                record("20.01.2024", 1500.0, "Гальмівні колодки"),
                record("01.02.2024", 0.0, "Огляд"),
            ],
        )];
        let stats = breakdown_frequency(&fleet, None, None);
        assert_eq!(stats.total_breakdowns, 2);
        assert_eq!(stats.by_vehicle.len(), 1);
        assert_eq!(stats.by_vehicle[0].breakdowns, 2);
    }

    #[test]
    fn test_breakdown_frequency_filters() {
        let fleet = vec![vehicle_with_history(
            "Київ",
            vec![
                record("15.01.2024", 2000.0, "Заміна масла"),
                record("10.03.2022", 5000.0, "Заміна ременя ГРМ"),
            ],
        )];
        let by_year = breakdown_frequency(&fleet, Some(2024), None);
        assert_eq!(by_year.total_breakdowns, 1);

        let other_city = breakdown_frequency(&fleet, None, Some("Львів"));
        assert_eq!(other_city.total_breakdowns, 0);
    }
}
