//! Core data model: parts, regulations, service records and vehicles.

pub mod part;
pub mod record;
pub mod regulation;
pub mod vehicle;

pub use part::Part;
pub use record::ServiceRecord;
pub use regulation::{PeriodType, Regulation, ServiceInterval};
pub use vehicle::{PartSnapshot, PartStatus, Vehicle, VehicleIdentity};
