//! Formatting primitives that turn loosely-typed provider values into
//! presentation form.
//!
//! Every function here is total: malformed, missing or non-finite input
//! yields `None`, never a panic or an error. Arithmetic is carried out in
//! decimal on the shortest textual form of the input, so rounding is exact
//! half-away-from-zero (`0.125 -> 0.13`, `1.005 -> 1.01`).

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Default number of decimal places for [`numeric`].
pub const DEFAULT_DECIMALS: u32 = 2;

const BILLION: i64 = 1_000_000_000;
const MILLION: i64 = 1_000_000;

/// Coerce a raw value into a decimal.
///
/// Numbers and numeric strings coerce; booleans, arrays, objects, nulls,
/// unparsable strings and NaN/infinity do not.
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(decimal_from_f64)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            Decimal::from_str(trimmed)
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(decimal_from_f64))
        }
        _ => None,
    }
}

fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // Display gives the shortest representation that round-trips, which is
    // what a human reads as "the number" (1.005 rather than 1.00499999...).
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

fn coerce(value: Option<&Value>) -> Option<Decimal> {
    value.and_then(to_decimal)
}

/// Round half away from zero, folding `-0` into `0`.
pub fn round_half_away(value: Decimal, decimals: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn to_number(value: Decimal) -> Option<f64> {
    // Parsing the decimal text lands on the f64 nearest to it, so 150.46
    // compares equal to the literal 150.46.
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| if f == 0.0 { 0.0 } else { f })
}

/// Coerce and round to `decimals` places.
pub fn numeric(value: Option<&Value>, decimals: u32) -> Option<f64> {
    coerce(value).and_then(|d| to_number(round_half_away(d, decimals)))
}

/// [`numeric`] with [`DEFAULT_DECIMALS`].
pub fn number(value: Option<&Value>) -> Option<f64> {
    numeric(value, DEFAULT_DECIMALS)
}

/// Render a magnitude in billions, e.g. `2_500_000_000 -> "2.50B$"`.
pub fn scaled_billions(value: Option<&Value>) -> Option<String> {
    let scaled = coerce(value)?.checked_div(Decimal::from(BILLION))?;
    Some(format!("{:.2}B$", round_half_away(scaled, 2)))
}

/// Render a magnitude in millions, e.g. `1_230_000 -> "1.23M"`.
pub fn scaled_millions(value: Option<&Value>) -> Option<String> {
    let scaled = coerce(value)?.checked_div(Decimal::from(MILLION))?;
    Some(format!("{:.2}M", round_half_away(scaled, 2)))
}

/// Render a decimal fraction as a percentage, e.g. `0.1523 -> "15.23%"`.
///
/// Zero is a real value and renders as `"0.00%"`.
pub fn percentage(value: Option<&Value>) -> Option<String> {
    let scaled = coerce(value)?.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(format!("{:.2}%", round_half_away(scaled, 2)))
}

fn change_decimal(current: Option<&Value>, reference: Option<&Value>) -> Option<Decimal> {
    let current = coerce(current)?;
    let reference = coerce(reference)?;
    if reference.is_zero() {
        return None;
    }
    let change = current
        .checked_sub(reference)?
        .checked_div(reference)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_half_away(change, 2))
}

/// Percent change of `current` relative to `reference`, rounded to 2 places.
///
/// `None` when either side is missing or non-numeric, or when `reference` is zero.
pub fn percent_change(current: Option<&Value>, reference: Option<&Value>) -> Option<f64> {
    change_decimal(current, reference).and_then(to_number)
}

/// [`percent_change`] rendered with a `%` suffix, e.g. `"50.00%"`.
pub fn percent_change_label(current: Option<&Value>, reference: Option<&Value>) -> Option<String> {
    change_decimal(current, reference).map(|c| format!("{:.2}%", c))
}

/// Pass an integer-like value through unformatted.
///
/// Providers send counts and epoch dates as integers, floats or strings
/// interchangeably; anything with a fractional part is rejected.
pub fn passthrough_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Pass a text value through unformatted. Numbers are rendered as text.
pub fn passthrough_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
