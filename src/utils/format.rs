//! Number and currency formatting helpers.
//!
//! The dashboard convention groups thousands with regular spaces:
//! `123456` renders as `123 456`.

/// Format a number with space-separated thousands, rounded to an integer.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a mileage value: `90000` -> `"90 000 км"`.
#[must_use]
pub fn format_mileage(km: f64) -> String {
    if !km.is_finite() {
        return "- км".to_string();
    }
    format!("{} км", format_number(km))
}

/// Format a currency amount with two decimal places and grouped thousands.
///
/// Zero and non-finite amounts render as an empty string, matching the
/// dashboard's "leave blank" convention for unpriced line items.
#[must_use]
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return String::new();
    }

    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc() as i64;
    let cents = ((rounded - rounded.trunc()).abs() * 100.0).round() as u32;

    format!("{}.{cents:02}", format_number(whole as f64))
}
