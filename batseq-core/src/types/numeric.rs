use serde::{Serialize, Serializer};
use std::fmt;

/// A coerced numeric report field.
///
/// Integral text stays an integer so `150` is emitted as `150`, not `150.0`.
/// Anything that does not parse becomes `NaN`, which serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    NaN,
}

impl Numeric {
    /// Coerce a raw field, never failing
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Numeric::NaN;
        }
        if let Ok(v) = s.parse::<i64>() {
            return Numeric::Int(v);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_nan() => Numeric::NaN,
            Ok(v) => Numeric::Float(v),
            Err(_) => Numeric::NaN,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
            Numeric::NaN => f64::NAN,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Numeric::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Numeric::NaN)
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Numeric::NaN
        } else {
            Numeric::Float(v)
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Numeric::Int(v) => serializer.serialize_i64(v),
            Numeric::Float(v) if v.is_finite() => serializer.serialize_f64(v),
            _ => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Numeric::Int(v) => write!(f, "{}", v),
            // e-values are tiny; keep them in scientific notation
            Numeric::Float(v) if v != 0.0 && v.abs() < 1e-3 => write!(f, "{:e}", v),
            Numeric::Float(v) => write!(f, "{}", v),
            Numeric::NaN => write!(f, "NaN"),
        }
    }
}
