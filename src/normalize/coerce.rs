//! Lenient numeric coercion.
//!
//! Mirrors spreadsheet-style parsing: any finite number is accepted,
//! anything else is a missing value. Identifiers must be integral;
//! ranks and preference numbers keep their fractional part; seat counts
//! are truncated toward zero.

use crate::models::OrderKey;

/// Largest magnitude an `f64` represents exactly as an integer.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Parses a finite number. Returns `None` for blank or non-numeric text.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let f: f64 = text.parse().ok()?;
    f.is_finite().then_some(f)
}

/// Parses an identifier cell. Returns `None` for blank or non-integral text.
pub fn coerce_int(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.trim().parse::<i64>() {
        return Some(v);
    }
    let f = coerce_number(raw)?;
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parses a rank or preference-number cell as an ordered key.
pub fn coerce_key(raw: &str) -> Option<OrderKey> {
    if let Ok(v) = raw.trim().parse::<i64>() {
        return Some(OrderKey::from(v));
    }
    coerce_number(raw).and_then(OrderKey::new)
}

/// Parses a non-negative count cell (seat quotas, admitted counts).
///
/// Fractions are truncated toward zero, negative values are rejected and
/// values beyond `u32` saturate.
pub fn coerce_count(raw: &str) -> Option<u32> {
    if let Ok(v) = raw.trim().parse::<i64>() {
        return u32::try_from(v).ok().or((v > 0).then_some(u32::MAX));
    }
    let f = coerce_number(raw)?;
    if f < 0.0 {
        return None;
    }
    // `as` saturates at u32::MAX.
    Some(f.trunc() as u32)
}
