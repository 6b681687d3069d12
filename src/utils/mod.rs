//! Small utility functions shared across modules.

pub mod date;
pub mod format;

pub use date::{count_working_days, elapsed_phrase, parse_date};
pub use format::{format_mileage, format_number, format_price};
