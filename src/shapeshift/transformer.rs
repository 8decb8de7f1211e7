//! The read-only transformer.
//!
//! [`Transformer`] owns a raw source mapping and resolves each key through
//! its [`Schema`]: computed attributes first, then casts, then the raw value,
//! with declared defaults filling in for absent or null values.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::attributes::{snake_case, Plain, Schema};
use crate::config::TransformerOptions;
use crate::error::Result;
use crate::projection::{self, Projection};
use crate::Attributes;

/// A read-mostly view over a raw attribute source.
pub struct Transformer<S = Plain> {
    source: Attributes,
    options: TransformerOptions,
    schema: PhantomData<fn() -> S>,
}

impl<S: Schema> Transformer<S> {
    pub fn new(source: Attributes) -> Self {
        Self::with_options(source, TransformerOptions::default())
    }

    pub fn with_options(source: Attributes, options: TransformerOptions) -> Self {
        Self {
            source,
            options,
            schema: PhantomData,
        }
    }

    /// Build from a JSON value. Anything other than an object gives an empty
    /// source.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(source) => Self::new(source),
            other => {
                trace!(%other, "non-object source, starting empty");
                Self::new(Attributes::new())
            }
        }
    }

    pub fn options(&self) -> TransformerOptions {
        self.options
    }

    /// Retrieve a single transformed attribute. Unknown keys resolve to the
    /// declared default or null.
    pub fn get(&self, key: &str) -> Value {
        self.resolve(key, || None)
    }

    /// Like [`get`](Self::get), returning `fallback` when the key is absent.
    pub fn get_or(&self, key: &str, fallback: Value) -> Value {
        self.resolve(key, || Some(fallback))
    }

    /// Like [`get`](Self::get), evaluating `fallback` only when the key is
    /// absent.
    pub fn get_or_else<F>(&self, key: &str, fallback: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        self.resolve(key, || Some(fallback()))
    }

    fn resolve<F>(&self, key: &str, absent: F) -> Value
    where
        F: FnOnce() -> Option<Value>,
    {
        if let Some(compute) = S::computed(key).and_then(|spec| spec.compute) {
            trace!(key, "computed attribute");
            return self.or_default(key, compute(self));
        }

        let Some(stored) = self.source.get(key) else {
            return absent()
                .or_else(|| self.default_for(key))
                .unwrap_or(Value::Null);
        };

        let value = S::read_raw(key, stored);
        let value = match S::spec(key).and_then(|spec| spec.cast) {
            Some(cast) => {
                trace!(key, ?cast, "casting attribute");
                cast.apply(value)
            }
            None => value,
        };

        self.or_default(key, value)
    }

    fn or_default(&self, key: &str, value: Value) -> Value {
        if value.is_null() {
            if let Some(default) = self.default_for(key) {
                return default;
            }
        }
        value
    }

    /// The declared default, unless this instance prefers nulls.
    fn default_for(&self, key: &str) -> Option<Value> {
        if self.options.prefer_null {
            return None;
        }
        let default = S::spec(key).and_then(|spec| spec.fallback)?;
        trace!(key, "using declared default");
        Some(default())
    }

    /// The raw value for `key` (adjusted by [`Schema::read_raw`]), bypassing
    /// casts and computed attributes. Null when absent.
    pub fn raw(&self, key: &str) -> Value {
        self.source
            .get(key)
            .map_or(Value::Null, |value| S::read_raw(key, value))
    }

    /// The entire raw source, untransformed.
    pub fn source(&self) -> &Attributes {
        &self.source
    }

    /// Whether `key` is in the source or names a computed attribute. Present
    /// nulls count.
    pub fn exists(&self, key: &str) -> bool {
        self.source.contains_key(key) || S::computed(key).is_some()
    }

    pub fn has(&self, key: &str) -> bool {
        self.exists(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.exists(key)
    }

    /// The declared default for `key`, or null.
    pub fn fallback(&self, key: &str) -> Value {
        S::spec(key)
            .and_then(|spec| spec.fallback)
            .map_or(Value::Null, |default| default())
    }

    /// Every declared default.
    pub fn fallbacks(&self) -> Attributes {
        S::ATTRIBUTES
            .iter()
            .filter_map(|spec| spec.fallback.map(|default| (spec.name.to_string(), default())))
            .collect()
    }

    /// Keys of the transformed mapping, in output order: raw keys, then
    /// computed-only attributes, then defaulted keys missing from the source.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .source
            .keys()
            .filter(|key| !S::is_hidden(key))
            .cloned()
            .collect();

        for spec in S::computed_attrs() {
            let name = spec.attribute_name();
            let shadows_raw = self
                .source
                .keys()
                .any(|key| S::computed(key).is_some_and(|c| c.attribute_name() == name));
            let key = snake_case(&name);
            if !shadows_raw && !spec.hidden && !S::is_hidden(&key) && !keys.contains(&key) {
                keys.push(key);
            }
        }

        // Computed attributes were placed above, defaulted or not.
        for spec in S::ATTRIBUTES
            .iter()
            .filter(|spec| spec.fallback.is_some() && spec.compute.is_none())
        {
            let key = spec.name.to_string();
            if !spec.hidden && !keys.contains(&key) {
                keys.push(key);
            }
        }

        keys
    }

    /// Transform the entire source.
    pub fn all(&self) -> Attributes {
        self.keys()
            .into_iter()
            .map(|key| {
                let value = if self.source.contains_key(&key) || S::computed(&key).is_some() {
                    self.get(&key)
                } else {
                    self.fallback(&key)
                };
                (key, value)
            })
            .collect()
    }

    pub fn to_map(&self) -> Attributes {
        self.all()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.all())
    }

    /// Deserialize the transformed mapping into a typed record.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_value())?)
    }

    /// Pluck a subset of the transformation. Unknown keys are ignored.
    pub fn only<I, P>(&self, specs: I) -> Attributes
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        projection::only(&self.all(), &collect_specs(specs))
    }

    /// The transformation without the given keys.
    pub fn except<I, P>(&self, specs: I) -> Attributes
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        projection::except(self.all(), &collect_specs(specs))
    }

    pub fn omit<I, P>(&self, specs: I) -> Attributes
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.except(specs)
    }

    pub fn without<I, P>(&self, specs: I) -> Attributes
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.except(specs)
    }

    /// [`only`](Self::only) with null and empty values dropped.
    pub fn intersect<I, P>(&self, specs: I) -> Attributes
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        projection::intersect(&self.all(), &collect_specs(specs))
    }

    pub(crate) fn source_mut(&mut self) -> &mut Attributes {
        &mut self.source
    }
}

fn collect_specs<I, P>(specs: I) -> Vec<Projection>
where
    I: IntoIterator<Item = P>,
    P: Into<Projection>,
{
    specs.into_iter().map(Into::into).collect()
}

impl<S: Schema> Default for Transformer<S> {
    fn default() -> Self {
        Self::new(Attributes::new())
    }
}

impl<S: Schema> From<Attributes> for Transformer<S> {
    fn from(source: Attributes) -> Self {
        Self::new(source)
    }
}

impl<S> Clone for Transformer<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            options: self.options,
            schema: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Transformer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("schema", &std::any::type_name::<S>())
            .field("source", &self.source)
            .field("options", &self.options)
            .finish()
    }
}

impl<S: Schema> Serialize for Transformer<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.all().serialize(serializer)
    }
}
