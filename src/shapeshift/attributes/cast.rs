//! Native type casts for raw attribute values.
//!
//! Casts never fail. Input that does not fit the target type is coerced the
//! way a loosely-typed scripting language would coerce it: `"12abc"` becomes
//! `12`, `"abc"` becomes `0`, an unparseable JSON document becomes null.

use std::convert::Infallible;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};
use tracing::trace;

/// Leading numeric portion of a string, after optional whitespace.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern is valid")
});

/// The type a raw attribute value is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cast {
    /// `int` / `integer`
    Int,
    /// `float` / `double` / `real`
    Float,
    /// `string`
    String,
    /// `bool` / `boolean`
    Bool,
    /// `object`: a decoded JSON document, with a top-level sequence turned
    /// into an index-keyed mapping. Scalars pass through.
    Object,
    /// `array` / `json`: a decoded JSON document
    Json,
    /// Any other tag. The value is returned unchanged.
    Unrecognized,
}

impl FromStr for Cast {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(match tag.trim().to_lowercase().as_str() {
            "int" | "integer" => Cast::Int,
            "real" | "float" | "double" => Cast::Float,
            "string" => Cast::String,
            "bool" | "boolean" => Cast::Bool,
            "object" => Cast::Object,
            "array" | "json" => Cast::Json,
            _ => Cast::Unrecognized,
        })
    }
}

impl Cast {
    /// Cast `value` to this type. Null is never cast.
    pub fn apply(self, value: Value) -> Value {
        if value.is_null() {
            return value;
        }

        match self {
            Cast::Int => Value::from(to_int(&value)),
            Cast::Float => float_value(to_float(&value)),
            Cast::String => Value::String(to_string(&value)),
            Cast::Bool => Value::Bool(is_truthy(&value)),
            Cast::Json => decode_json(value),
            Cast::Object => match decode_json(value) {
                Value::Array(items) => Value::Object(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, item)| (i.to_string(), item))
                        .collect::<Map<String, Value>>(),
                ),
                other => other,
            },
            Cast::Unrecognized => value,
        }
    }
}

/// Loose truthiness: `false`, `0`, `0.0`, `""`, `"0"`, null and empty
/// collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => number_to_int(n),
        Value::String(s) => match numeric_prefix(s) {
            Some(digits) => digits
                .parse::<i64>()
                .unwrap_or_else(|_| digits.parse::<f64>().map_or(0, |f| f as i64)),
            None => 0,
        },
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

fn number_to_int(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        n.as_f64().map_or(0, |f| f as i64)
    }
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => numeric_prefix(s)
            .and_then(|digits| digits.parse::<f64>().ok())
            .unwrap_or(0.0),
        Value::Array(items) => f64::from(u8::from(!items.is_empty())),
        Value::Object(map) => f64::from(u8::from(!map.is_empty())),
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn decode_json(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
            trace!(%err, "json cast on malformed document");
            Value::Null
        }),
        other => other,
    }
}

fn numeric_prefix(s: &str) -> Option<&str> {
    NUMERIC_PREFIX
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
