//! Attribute specifications and per-type registries.
//!
//! A concrete transformer is a zero-sized type implementing [`Schema`]. Its
//! [`Schema::ATTRIBUTES`] table is the single source of truth for what the
//! transformer does to each key: casts, computed attributes, defaults and
//! hidden keys.

use std::fmt;

use serde_json::Value;

use super::naming::camel_case;
use super::Cast;
use crate::transformer::Transformer;

/// A computed attribute: a pure function of the transformer's source.
pub type ComputeFn<S> = fn(&Transformer<S>) -> Value;

/// Produces the declared default for an attribute.
pub type FallbackFn = fn() -> Value;

/// Specification for a single attribute.
pub struct AttributeSpec<S> {
    /// Raw key for casts, defaults and hiding; for computed attributes either
    /// the raw key or its camelCase name (`bar_baz` and `barBaz` are the same
    /// attribute).
    pub name: &'static str,

    /// Cast applied to the raw value when no computed attribute exists.
    pub cast: Option<Cast>,

    /// Computed attribute shadowing the raw key.
    pub compute: Option<ComputeFn<S>>,

    /// Default used when the value is absent or null.
    pub fallback: Option<FallbackFn>,

    /// Whether the attribute is left out of bulk accessors (`all`, `keys`,
    /// projections, serialization). It is still readable through `get`.
    pub hidden: bool,
}

impl<S> AttributeSpec<S> {
    /// Create a new attribute spec that does nothing until configured.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cast: None,
            compute: None,
            fallback: None,
            hidden: false,
        }
    }

    /// Set the cast.
    pub const fn cast(mut self, cast: Cast) -> Self {
        self.cast = Some(cast);
        self
    }

    /// Register a computed attribute.
    pub const fn computed(mut self, compute: ComputeFn<S>) -> Self {
        self.compute = Some(compute);
        self
    }

    /// Declare a default.
    pub const fn fallback(mut self, fallback: FallbackFn) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Set the hidden flag.
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The camelCase name a raw key must convert to for this computed
    /// attribute to shadow it.
    pub fn attribute_name(&self) -> String {
        camel_case(self.name)
    }
}

impl<S> fmt::Debug for AttributeSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("cast", &self.cast)
            .field("computed", &self.compute.is_some())
            .field("fallback", &self.fallback.is_some())
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Declares how a transformer type shapes its attributes.
///
/// ```
/// use serde_json::{json, Value};
/// use shapeshift::{AttributeSpec, Cast, Schema, Transformer};
///
/// struct Car;
///
/// fn label(car: &Transformer<Car>) -> Value {
///     let make = car.raw("make");
///     let model = car.raw("model");
///     json!(format!("{} {}", make.as_str().unwrap_or(""), model.as_str().unwrap_or("")))
/// }
///
/// impl Schema for Car {
///     const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
///         AttributeSpec::new("cylinders").cast(Cast::Int),
///         AttributeSpec::new("label").computed(label),
///     ];
/// }
///
/// let car = Transformer::<Car>::from_value(json!({
///     "make": "Subaru",
///     "model": "WRX",
///     "cylinders": "4",
/// }));
/// assert_eq!(car.get("cylinders"), json!(4));
/// assert_eq!(car.get("label"), json!("Subaru WRX"));
/// ```
pub trait Schema: Sized + 'static {
    /// Attribute registry for this type.
    const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[];

    /// Adjust a stored value as it is read. Casts and plain `get` calls see
    /// the adjusted value.
    fn read_raw(_key: &str, value: &Value) -> Value {
        value.clone()
    }

    /// The spec declared for exactly `key`.
    fn spec(key: &str) -> Option<&'static AttributeSpec<Self>> {
        Self::ATTRIBUTES.iter().find(|spec| spec.name == key)
    }

    /// The computed attribute `key` resolves to, if any.
    fn computed(key: &str) -> Option<&'static AttributeSpec<Self>> {
        let name = camel_case(key);
        Self::computed_attrs().find(|spec| spec.attribute_name() == name)
    }

    /// Every registered computed attribute.
    fn computed_attrs() -> impl Iterator<Item = &'static AttributeSpec<Self>> {
        Self::ATTRIBUTES
            .iter()
            .filter(|spec| spec.compute.is_some())
    }

    /// Whether `key` is left out of bulk accessors, either by its own spec
    /// or through the hidden computed attribute it resolves to.
    fn is_hidden(key: &str) -> bool {
        Self::spec(key).is_some_and(|spec| spec.hidden)
            || Self::computed(key).is_some_and(|spec| spec.hidden)
    }
}

/// The schema with no declarations: every key resolves to its raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl Schema for Plain {}
