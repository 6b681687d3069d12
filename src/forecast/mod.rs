//! Purchase and maintenance forecasting.
//!
//! Projects upcoming part replacements over a planning horizon, prices
//! them with brand-aware coefficients, aggregates a fleet budget with
//! risk analysis, and renders a per-vehicle maintenance schedule.

pub mod fleet;
pub mod mileage;
pub mod need;
pub mod schedule;

pub use fleet::{
    fleet_forecast, BrandForecast, BudgetRisk, FleetForecast, LogisticsRisk, MonthBucket,
    PartDemand, Suggestion, SuggestionKind, SuggestionPriority, VehicleForecast,
};
pub use mileage::average_monthly_mileage;
pub use need::{replacement_need, ReplacementNeed, Urgency};
pub use schedule::{maintenance_schedule, ScheduleItem, ScheduleStatus};
