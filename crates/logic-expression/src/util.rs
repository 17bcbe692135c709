//! Run-time coercions shared by the operators.

use serde_json::{Number, Value};

/// Truthiness: everything except `false`, `null`, numeric zero and `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String coercion.
///
/// Integral numbers print without a fraction; sequences and mappings print as
/// compact JSON.
pub fn str_val(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

/// Numeric coercion used for indices. Returns NaN where no number applies.
pub fn num(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Strict equality: same type and same content, numbers by numeric value.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| same_value(v, w)))
        }
        _ => a == b,
    }
}

/// Zero-based substring by character index.
///
/// Indices are truncated and clamped into `[0, len]` (NaN counts as 0), and a
/// start past the end swaps the two. A missing end means the end of the string.
pub fn substring(s: &str, start: f64, end: Option<f64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let clamp = |n: f64| {
        if n.is_nan() {
            0
        } else {
            n.trunc().clamp(0.0, len as f64) as usize
        }
    };
    let mut from = clamp(start);
    let mut to = end.map_or(len, clamp);
    if from > to {
        std::mem::swap(&mut from, &mut to);
    }
    chars[from..to].iter().collect()
}
