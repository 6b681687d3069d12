//! Date parsing and calendar helpers.
//!
//! Service-history dates arrive as free text in either `DD.MM.YYYY`
//! (the common spreadsheet form) or ISO `YYYY-MM-DD`. Anything else is
//! treated as "no date": the record stays in raw history but is excluded
//! from snapshot and time-based logic.

use chrono::{Datelike, NaiveDate, Weekday};

/// Parse a date from the known textual forms.
///
/// Tries `DD.MM.YYYY` first, then `YYYY-MM-DD`. Returns `None` for
/// anything that fails both, including impossible calendar dates.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('.') {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%d.%m.%Y") {
            return Some(date);
        }
    }

    if raw.contains('-') {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
    }

    None
}

/// Count working days (Monday through Saturday, Sunday excluded) in the
/// inclusive range `[start, end]`.
///
/// Returns 0 when `start > end`.
#[must_use]
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let total_days = (end - start).num_days() + 1;
    let full_weeks = total_days / 7;
    let mut working = full_weeks * 6;

    // Remaining partial week, day by day.
    let mut day = start + chrono::Duration::days(full_weeks * 7);
    while day <= end {
        if day.weekday() != Weekday::Sun {
            working += 1;
        }
        day += chrono::Duration::days(1);
    }

    working.max(0) as u32
}

/// Calendar-aware (years, months) elapsed between two dates.
///
/// Months are corrected downward when the day-of-month has not yet been
/// reached, matching how a person reads "how long since".
#[must_use]
pub fn elapsed_years_months(from: NaiveDate, to: NaiveDate) -> (i32, u32) {
    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;

    if months < 0 {
        years -= 1;
        months += 12;
    }

    if months == 0 && to.day() < from.day() {
        years -= 1;
        months = 11;
    } else if to.day() < from.day() {
        months -= 1;
        if months < 0 {
            months += 12;
            years -= 1;
        }
    }

    (years.max(0), months as u32)
}

/// Humanized elapsed-time phrase: "2р 3міс", "5міс", "12дн".
#[must_use]
pub fn elapsed_phrase(from: NaiveDate, to: NaiveDate) -> String {
    let days = (to - from).num_days().max(0);
    let (years, months) = elapsed_years_months(from, to);

    if years > 0 {
        if months > 0 {
            format!("{years}р {months}міс")
        } else {
            format!("{years}р")
        }
    } else if months > 0 {
        format!("{months}міс")
    } else {
        format!("{days}дн")
    }
}

/// `date` minus `months` calendar months, clamped to valid month ends.
#[must_use]
pub fn months_ago(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(chrono::Months::new(months))
        .unwrap_or(date)
}
