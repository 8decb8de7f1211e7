#![allow(dead_code)]

use serde_json::{json, Value};
use shapeshift::{AttributeSpec, Attributes, Cast, Schema, Transformer};

pub fn attrs(value: Value) -> Attributes {
    value.as_object().cloned().expect("test source must be an object")
}

/// Casts `foo` to int, `bar` to json and `baz` to float.
pub struct CastSchema;

impl Schema for CastSchema {
    const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
        AttributeSpec::new("foo").cast(Cast::Int),
        AttributeSpec::new("bar").cast(Cast::Json),
        AttributeSpec::new("baz").cast(Cast::Float),
    ];
}

/// Computed attributes over string sources.
pub struct MethodSchema;

fn upper_foo(t: &Transformer<MethodSchema>) -> Value {
    json!(t.raw("foo").as_str().unwrap_or_default().to_uppercase())
}

fn capitalized_bar_baz(t: &Transformer<MethodSchema>) -> Value {
    let raw = t.raw("bar_baz");
    let mut chars = raw.as_str().unwrap_or_default().chars();
    match chars.next() {
        Some(first) => json!(first.to_uppercase().chain(chars).collect::<String>()),
        None => json!(""),
    }
}

fn method_attribute(_: &Transformer<MethodSchema>) -> Value {
    json!(true)
}

impl MethodSchema {
    /// A helper that is not registered, so it never shadows a key.
    pub fn ignore_me() -> bool {
        true
    }
}

impl Schema for MethodSchema {
    const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
        AttributeSpec::new("foo").computed(upper_foo),
        AttributeSpec::new("barBaz").computed(capitalized_bar_baz),
        AttributeSpec::new("methodAttribute").computed(method_attribute),
    ];
}

/// Declared defaults for `foo`, `bar` and `baz`.
pub struct DefaultSchema;

fn one() -> Value {
    json!(1)
}

fn two() -> Value {
    json!(2)
}

fn three() -> Value {
    json!(3)
}

impl Schema for DefaultSchema {
    const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
        AttributeSpec::new("foo").fallback(one),
        AttributeSpec::new("bar").fallback(two),
        AttributeSpec::new("baz").fallback(three),
    ];
}

/// Hides `cylinders` from bulk output.
pub struct HiddenSchema;

impl Schema for HiddenSchema {
    const ATTRIBUTES: &'static [AttributeSpec<Self>] =
        &[AttributeSpec::new("cylinders").hidden()];
}

/// Masks `api_token` through a hidden computed attribute.
pub struct SecretSchema;

fn masked_token(t: &Transformer<SecretSchema>) -> Value {
    json!(format!("***{}", t.raw("api_token").as_str().unwrap_or_default()))
}

impl Schema for SecretSchema {
    const ATTRIBUTES: &'static [AttributeSpec<Self>] =
        &[AttributeSpec::new("apiToken").computed(masked_token).hidden()];
}

/// Trims surrounding whitespace from every stored string.
pub struct TrimmedSchema;

impl Schema for TrimmedSchema {
    fn read_raw(_key: &str, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other.clone(),
        }
    }
}
