//! Average monthly mileage estimation.
//!
//! Drivers work Monday through Saturday, so the estimate averages over
//! working days and scales by 26 working days per month. A recent
//! window of roughly five and a half months is preferred; thin histories
//! fall back to the whole record span, and degenerate data falls back to
//! the configured default.

use chrono::{Duration, NaiveDate};

use crate::config::defaults::WORKING_DAYS_PER_MONTH;
use crate::config::EngineConfig;
use crate::model::{ServiceRecord, Vehicle};
use crate::utils::date::{count_working_days, months_ago};

/// Estimate a vehicle's average monthly mileage at `today`.
#[must_use]
pub fn average_monthly_mileage(
    vehicle: &Vehicle,
    config: &EngineConfig,
    today: NaiveDate,
) -> f64 {
    let default = config.default_monthly_mileage;
    if vehicle.history.len() < 2 {
        return default;
    }

    // Five and a half months, splitting the difference between 5 and 6.
    let window_start = months_ago(today, 5) - Duration::days(15);

    let mut recent: Vec<&ServiceRecord> = vehicle
        .history
        .iter()
        .filter(|r| r.parsed_date().is_some_and(|d| d >= window_start))
        .collect();

    if recent.len() < 2 {
        // Fall back to the whole dated history.
        let mut dated: Vec<&ServiceRecord> = vehicle
            .history
            .iter()
            .filter(|r| r.parsed_date().is_some())
            .collect();
        if dated.len() < 2 {
            return default;
        }
        dated.sort_by_key(|r| r.parsed_date());
        return per_working_day(
            dated[0],
            dated[dated.len() - 1],
            dated[dated.len() - 1].parsed_date().unwrap_or(today),
            default,
        );
    }

    recent.sort_by_key(|r| r.parsed_date());
    let first = recent[0];
    let last = recent[recent.len() - 1];
    // The window can contain future-dated rows; never count past today.
    let end = last.parsed_date().unwrap_or(today).min(today);
    per_working_day(first, last, end, default)
}

fn per_working_day(
    first: &ServiceRecord,
    last: &ServiceRecord,
    end: NaiveDate,
    default: f64,
) -> f64 {
    let Some(start) = first.parsed_date() else {
        return default;
    };

    let working_days = count_working_days(start, end);
    if working_days == 0 {
        return default;
    }

    let mileage_diff = last.mileage.unwrap_or(0.0) - first.mileage.unwrap_or(0.0);
    if mileage_diff <= 0.0 {
        return default;
    }

    let monthly = mileage_diff / f64::from(working_days) * WORKING_DAYS_PER_MONTH;
    if monthly > 0.0 {
        monthly
    } else {
        default
    }
}
