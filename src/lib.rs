//! **A fleet maintenance analytics engine for service-history data.**
//!
//! `fleet-tools` turns raw per-vehicle service records into actionable
//! maintenance intelligence: per-part wear status, vehicle health scores,
//! prioritized service recommendations, cost analytics, and a brand-aware
//! purchase forecast for the whole fleet.
//!
//! ## Key Features
//!
//! - **Record aggregation**: folds a flat stream of service records into
//!   per-vehicle state, tracking the freshest replacement snapshot for each
//!   of 25 tracked parts ([`aggregate`]).
//! - **Regulation matching**: a priority-aware rule engine that selects the
//!   service interval applying to a given vehicle and part, with wildcard
//!   model patterns, year ranges, and rows scoped to a single license plate
//!   ([`matching`]).
//! - **Part classification**: regulation-driven wear grading with a built-in
//!   legacy threshold table for parts no regulation covers ([`classify`]).
//! - **Health scoring**: a 0..=100 vehicle health score with letter-style
//!   grades, penalizing worn parts, age, mileage, and body condition
//!   ([`health`]).
//! - **Recommendations**: prioritized, human-readable service advice with
//!   interval context and recommended manufacturers ([`recommend`]).
//! - **Cost analytics**: spending totals, monthly/yearly/category breakdowns,
//!   and fleet-wide breakdown frequency statistics ([`costs`]).
//! - **Purchase forecasting**: projects replacements over a planning horizon,
//!   prices them with brand coefficients, and flags budget, logistics, and
//!   concentration risks ([`forecast`]).
//!
//! ## Core Concepts & Modules
//!
//! - [`model`]: the domain types. [`model::Part`] enumerates the tracked
//!   parts, [`model::ServiceRecord`] is one row of service history,
//!   [`model::Regulation`] is one interval rule, and [`model::Vehicle`] is
//!   the aggregated per-vehicle state.
//! - [`config`]: the [`EngineConfig`] with keyword tables, brand
//!   coefficients, base part costs, and forecast tuning knobs.
//! - [`aggregate`]: [`aggregate()`] builds vehicles from records and
//!   identities.
//! - [`matching`]: [`RegulationMatcher`] compiles regulations and resolves
//!   the best match per vehicle and part.
//! - [`classify`]: [`classify_vehicle()`] grades every tracked part.
//! - [`health`]: [`health()`](health::health) scores a vehicle,
//!   [`fleet_stats()`](health::fleet_stats) summarizes the fleet.
//! - [`costs`]: [`cost_stats()`](costs::cost_stats) and
//!   [`breakdown_frequency()`](costs::breakdown_frequency).
//! - [`recommend`]: [`generate_recommendations()`] renders prioritized
//!   advice.
//! - [`forecast`]: [`fleet_forecast()`] budgets the fleet,
//!   [`maintenance_schedule()`](forecast::maintenance_schedule) plans one
//!   vehicle.
//!
//! ## Getting Started
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fleet_tools::{
//!     aggregate, classify_vehicle, cost_stats, generate_recommendations, health,
//!     EngineConfig, RegulationMatcher, Result,
//! };
//! use fleet_tools::model::{Regulation, ServiceRecord, VehicleIdentity};
//!
//! fn main() -> Result<()> {
//!     let records: Vec<ServiceRecord> = load_records();
//!     let identities: Vec<VehicleIdentity> = load_identities();
//!     let regulations: Vec<Regulation> = load_regulations();
//!
//!     let config = EngineConfig::default();
//!     let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//!     let mut fleet = aggregate(&records, &identities, &config, today)?;
//!     let matcher = RegulationMatcher::new(regulations);
//!
//!     for vehicle in &mut fleet {
//!         classify_vehicle(vehicle, &matcher);
//!     }
//!
//!     for vehicle in &fleet {
//!         let (score, grade) = health(vehicle, today);
//!         println!("{}: {} ({})", vehicle.identity.license_plate, score, grade.label());
//!
//!         let costs = cost_stats(&vehicle.history, today);
//!         for rec in generate_recommendations(vehicle, &costs, &matcher, &config, today) {
//!             println!("  {} {}", rec.icon, rec.text);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! # fn load_records() -> Vec<fleet_tools::model::ServiceRecord> { vec![] }
//! # fn load_identities() -> Vec<fleet_tools::model::VehicleIdentity> { vec![] }
//! # fn load_regulations() -> Vec<fleet_tools::model::Regulation> { vec![] }
//! ```
//!
//! Fleet-level forecasting works on the classified fleet:
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fleet_tools::{fleet_forecast, EngineConfig, RegulationMatcher};
//! # fn fleet() -> Vec<fleet_tools::model::Vehicle> { vec![] }
//!
//! let config = EngineConfig::default();
//! let matcher = RegulationMatcher::new(vec![]);
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let forecast = fleet_forecast(&fleet(), &matcher, &config, 6, today);
//! println!("6-month budget with reserve: {:.0} грн", forecast.total_budget);
//! for suggestion in &forecast.suggestions {
//!     println!("- {}", suggestion.text);
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: f64↔u32/i64 casts are pervasive in interval and budget
    // math — all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Recommendation builders are inherently long — splitting hurts readability
    clippy::too_many_lines,
    // Variable names like `min`/`mid` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod costs;
pub mod error;
pub mod forecast;
pub mod health;
pub mod matching;
pub mod model;
pub mod recommend;
pub mod utils;

// Re-export main types for convenience
pub use aggregate::aggregate;
pub use classify::{classify, classify_vehicle};
pub use config::EngineConfig;
pub use costs::{breakdown_frequency, cost_stats, BreakdownStats, CostStats, ExpenseCategory};
pub use error::{FleetError, IngestErrorKind, Result};
pub use forecast::{
    fleet_forecast, maintenance_schedule, FleetForecast, ReplacementNeed, ScheduleItem, Urgency,
};
pub use health::{fleet_stats, health, health_score, FleetStats, HealthGrade};
pub use matching::RegulationMatcher;
pub use model::{
    Part, PartSnapshot, PartStatus, PeriodType, Regulation, ServiceInterval, ServiceRecord,
    Vehicle, VehicleIdentity,
};
pub use recommend::{generate_recommendations, Recommendation, Severity};
