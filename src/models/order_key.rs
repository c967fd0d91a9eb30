//! Ordered numeric key for ranks and preference numbers.
//!
//! Source cells are spreadsheet numbers: usually integers, sometimes
//! fractional ("2.5"). Both sort numerically. Integral values print
//! without a decimal point so published ranks read as they were entered.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest magnitude an `f64` represents exactly as an integer.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// A finite number with a total order.
#[derive(Debug, Clone, Copy)]
pub struct OrderKey(f64);

impl OrderKey {
    /// Wraps a finite value. `None` for NaN or infinities.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // -0.0 and 0.0 are the same key.
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    /// The numeric value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The value as an integer, if it is one.
    pub fn as_integer(self) -> Option<i64> {
        (self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_F64).then_some(self.0 as i64)
    }
}

impl From<i32> for OrderKey {
    fn from(v: i32) -> Self {
        Self(f64::from(v))
    }
}

impl From<i64> for OrderKey {
    fn from(v: i64) -> Self {
        Self(v as f64)
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for OrderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_integer() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for OrderKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for OrderKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| de::Error::custom(format!("non-finite key: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_sorts_between_integers() {
        let mut keys = vec![
            OrderKey::from(3),
            OrderKey::new(2.5).unwrap(),
            OrderKey::from(2),
        ];
        keys.sort();
        assert_eq!(keys[0], OrderKey::from(2));
        assert_eq!(keys[1].value(), 2.5);
        assert_eq!(keys[2], OrderKey::from(3));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(OrderKey::new(f64::NAN).is_none());
        assert!(OrderKey::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(OrderKey::new(-0.0).unwrap(), OrderKey::from(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderKey::from(12).to_string(), "12");
        assert_eq!(OrderKey::new(4.0).unwrap().to_string(), "4");
        assert_eq!(OrderKey::new(2.5).unwrap().to_string(), "2.5");
        assert_eq!(OrderKey::new(2.5).unwrap().as_integer(), None);
    }

    #[test]
    fn test_json() {
        assert_eq!(serde_json::to_string(&OrderKey::from(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&OrderKey::new(1.5).unwrap()).unwrap(), "1.5");

        let back: OrderKey = serde_json::from_str("3").unwrap();
        assert_eq!(back, OrderKey::from(3));
    }
}
