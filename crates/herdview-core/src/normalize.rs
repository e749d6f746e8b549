//! Entity normalizer.
//!
//! Upstream records arrive as loosely typed attribute maps: the same field can
//! be `"85"` in one parse pass and `85.0` in the next. Every attribute is
//! pushed through one of three canonical kinds before any cross-snapshot
//! comparison so that type jitter never surfaces as a change.
//!
//! All three normalizers are total: they never fail and fall back to a
//! documented default (`0`, `false`, `""`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target kind for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Numeric,
    Boolean,
    String,
}

/// A canonical value produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Normalized {
    Numeric(f64),
    Boolean(bool),
    String(String),
}

impl Normalized {
    /// Convert back into a JSON value (used when re-normalizing stored data).
    pub fn to_value(&self) -> Value {
        match self {
            Normalized::Numeric(n) => number_value(*n),
            Normalized::Boolean(b) => Value::Bool(*b),
            Normalized::String(s) => Value::String(s.clone()),
        }
    }
}

/// Normalize a raw value into the requested kind.
pub fn normalize(raw: &Value, kind: ValueKind) -> Normalized {
    match kind {
        ValueKind::Numeric => Normalized::Numeric(normalize_number(raw)),
        ValueKind::Boolean => Normalized::Boolean(normalize_bool(raw)),
        ValueKind::String => Normalized::String(normalize_string(raw)),
    }
}

/// Numeric normalization.
///
/// `null`, empty strings and anything unparseable become `0`. Non-finite
/// results also collapse to `0` so NaN can never leak into a diff.
pub fn normalize_number(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => parse_leading_float(s),
        Value::Array(_) | Value::Object(_) => 0.0,
    };
    finite_or_zero(parsed)
}

/// Boolean normalization.
///
/// Native booleans pass through; strings match `true`/`1`/`yes`
/// case-insensitively; everything else is coerced by truthiness.
pub fn normalize_bool(raw: &Value) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes")
        }
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String normalization: `null` becomes empty, everything else is
/// stringified and trimmed.
pub fn normalize_string(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Replace NaN/±∞ with `0`.
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Parse the longest leading float literal of `s` (after trimming).
///
/// `"85"` → 85, `" 85.5 kg"` → 85.5, `"abc"` → 0, `""` → 0.
fn parse_leading_float(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Ok(v) = s.parse::<f64>() {
        return v;
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut last_good = 0;

    while end < bytes.len() {
        let c = bytes[end];
        match c {
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'0'..=b'9' => {
                seen_digit = true;
                last_good = end + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return 0.0;
    }
    s[..last_good].parse::<f64>().unwrap_or(0.0)
}

/// Format a float the way a dashboard would print it: integral values
/// without a trailing `.0`.
fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
