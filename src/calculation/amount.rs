//! Amount normalization and display formatting.
//!
//! Extract columns arrive as whatever the upstream table held: blanks, nulls,
//! numbers, or text such as `" 12,345.67 "`. This module turns any of them
//! into a whole-unit [`Amount`] and back into display text.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::RawValue;

/// A signed whole number of currency units.
pub type Amount = i64;

/// Display text for a zero or absent amount.
pub const PLACEHOLDER: &str = "-";

/// Normalizes a raw column value into an [`Amount`].
///
/// Thousands separators (`,`) and surrounding whitespace are removed, the
/// remainder is parsed as a decimal number (plain or scientific notation)
/// and truncated toward zero. Anything that does not yield a finite number
/// within the `Amount` range normalizes to `0`: absent columns, nulls,
/// booleans, malformed text.
///
/// This function is total and never panics.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::parse_amount;
/// use payslip_engine::models::RawValue;
///
/// assert_eq!(parse_amount(Some(&RawValue::from("12,345.67"))), 12345);
/// assert_eq!(parse_amount(Some(&RawValue::from(""))), 0);
/// assert_eq!(parse_amount(None), 0);
/// assert_eq!(parse_amount(Some(&RawValue::from(500))), 500);
/// ```
pub fn parse_amount(value: Option<&RawValue>) -> Amount {
    match value {
        None | Some(RawValue::Null) | Some(RawValue::Bool(_)) => 0,
        Some(RawValue::Integer(n)) => *n,
        Some(RawValue::Float(f)) => truncate_float(*f),
        Some(RawValue::Text(text)) => parse_text(text),
    }
}

fn truncate_float(value: f64) -> Amount {
    Decimal::from_f64_retain(value)
        .and_then(truncate_decimal)
        .unwrap_or(0)
}

fn parse_text(text: &str) -> Amount {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0;
    }

    let value = if cleaned.contains(['e', 'E']) {
        parse_scientific(cleaned)
    } else {
        parse_plain(cleaned)
    };
    value.and_then(truncate_decimal).unwrap_or(0)
}

/// Parses plain decimal text by its whole part alone.
///
/// The fraction only has to be digits; it is dropped before conversion so
/// long fractions cannot round the whole part up.
fn parse_plain(text: &str) -> Option<Decimal> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match whole {
        "" | "+" | "-" => Some(Decimal::ZERO),
        _ => Decimal::from_str(whole).ok(),
    }
}

/// Largest exponent magnitude worth scaling by; beyond it the result either
/// overflows an `Amount` or truncates to zero.
const MAX_EXPONENT: u32 = 40;

fn parse_scientific(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let mut value = Decimal::from_str(mantissa).ok()?;
    let exponent: i32 = exponent.parse().ok()?;

    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return (exponent < 0).then_some(Decimal::ZERO);
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value)
}

fn truncate_decimal(value: Decimal) -> Option<Amount> {
    value.trunc().to_i64()
}

/// Formats an [`Amount`] for display.
///
/// Zero renders as [`PLACEHOLDER`] (`"-"`), never `"0"`. Other amounts are
/// grouped in threes with `,`; grouping applies to the magnitude and a
/// negative sign is kept in front (`-1234` renders as `"-1,234"`).
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::format_amount;
///
/// assert_eq!(format_amount(0), "-");
/// assert_eq!(format_amount(1000), "1,000");
/// assert_eq!(format_amount(-250), "-250");
/// assert_eq!(format_amount(1234567), "1,234,567");
/// ```
pub fn format_amount(amount: Amount) -> String {
    if amount == 0 {
        return PLACEHOLDER.to_string();
    }

    let digits = amount.unsigned_abs().to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        formatted.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
