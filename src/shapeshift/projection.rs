//! # Projection
//!
//! Selective projection of a transformed mapping: whitelists (`only`),
//! blacklists (`except`) and null-dropping whitelists (`intersect`), each
//! able to reach into nested mappings.
//!
//! ## Shapes
//!
//! | Projection | `only` | `except` |
//! |------------|--------|----------|
//! | `Key("a")` | keep `a` if present | drop `a` |
//! | `Branch("a")` | keep `a` verbatim if it is a mapping or sequence | drop `a` |
//! | `Nested("a", [..])` | keep `a`, projected with the nested specs | shrink `a` with the nested specs |
//!
//! Unknown keys are never an error: they simply do not appear in the result.
//!
//! ## Loose Specs
//!
//! [`Projection::from_value`] accepts the JSON form callers often already
//! have, e.g. `["foo", {"profile": ["first_name"]}, {"zap": []}]`.

use serde_json::Value;
use tracing::trace;

use crate::Attributes;

/// One entry of a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// A single key.
    Key(String),
    /// A whole sub-collection, taken as is.
    Branch(String),
    /// A mapping projected recursively.
    Nested(String, Vec<Projection>),
}

impl Projection {
    pub fn key(name: impl Into<String>) -> Self {
        Projection::Key(name.into())
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Projection::Branch(name.into())
    }

    pub fn nested<I, P>(name: impl Into<String>, specs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        Projection::Nested(name.into(), specs.into_iter().map(Into::into).collect())
    }

    /// The top-level key this entry applies to.
    pub fn name(&self) -> &str {
        match self {
            Projection::Key(name) | Projection::Branch(name) | Projection::Nested(name, _) => name,
        }
    }

    /// Normalize a loose JSON spec into projections.
    ///
    /// Strings are keys and arrays are flattened. In an object, each key maps
    /// to its sub-spec: an empty array or object selects the whole branch, a
    /// non-empty one recurses, and a string value names a key on its own.
    /// Numbers, booleans and nulls are skipped.
    pub fn from_value(spec: &Value) -> Vec<Projection> {
        let mut out = Vec::new();
        collect(spec, &mut out);
        out
    }
}

fn collect(spec: &Value, out: &mut Vec<Projection>) {
    match spec {
        Value::String(name) => out.push(Projection::Key(name.clone())),
        Value::Array(items) => {
            for item in items {
                collect(item, out);
            }
        }
        Value::Object(map) => {
            for (name, sub) in map {
                match sub {
                    Value::String(key) => out.push(Projection::Key(key.clone())),
                    Value::Array(items) if items.is_empty() => {
                        out.push(Projection::Branch(name.clone()))
                    }
                    Value::Object(inner) if inner.is_empty() => {
                        out.push(Projection::Branch(name.clone()))
                    }
                    Value::Array(_) | Value::Object(_) => {
                        out.push(Projection::Nested(name.clone(), Projection::from_value(sub)))
                    }
                    other => trace!(key = %name, %other, "skipping invalid projection entry"),
                }
            }
        }
        other => trace!(%other, "skipping invalid projection entry"),
    }
}

impl From<&str> for Projection {
    fn from(name: &str) -> Self {
        Projection::Key(name.to_string())
    }
}

impl From<String> for Projection {
    fn from(name: String) -> Self {
        Projection::Key(name)
    }
}

impl From<&String> for Projection {
    fn from(name: &String) -> Self {
        Projection::Key(name.clone())
    }
}

/// Keep only the entries the specs select, in spec order.
pub fn only(attributes: &Attributes, specs: &[Projection]) -> Attributes {
    let mut out = Attributes::new();

    for spec in specs {
        match spec {
            Projection::Key(name) => {
                if let Some(value) = attributes.get(name) {
                    out.insert(name.clone(), value.clone());
                }
            }
            Projection::Branch(name) => {
                match attributes.get(name) {
                    Some(value) if value.is_array() || value.is_object() => {
                        out.insert(name.clone(), value.clone());
                    }
                    _ => {}
                }
            }
            Projection::Nested(name, inner) => {
                if let Some(Value::Object(branch)) = attributes.get(name) {
                    out.insert(name.clone(), Value::Object(only(branch, inner)));
                }
            }
        }
    }

    out
}

/// Remove the entries the specs select. Nested specs shrink a branch rather
/// than removing it.
pub fn except(mut attributes: Attributes, specs: &[Projection]) -> Attributes {
    for spec in specs {
        match spec {
            Projection::Key(name) | Projection::Branch(name) => {
                attributes.shift_remove(name);
            }
            Projection::Nested(name, inner) => {
                if let Some(Value::Object(branch)) = attributes.get_mut(name) {
                    let pruned = except(std::mem::take(branch), inner);
                    *branch = pruned;
                }
            }
        }
    }

    attributes
}

/// [`only`], with null and empty values dropped from the top level.
pub fn intersect(attributes: &Attributes, specs: &[Projection]) -> Attributes {
    only(attributes, specs)
        .into_iter()
        .filter(|(_, value)| !is_blank(value))
        .collect()
}

/// Null, the empty string, and empty collections.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
