//! # Mutable Transformer
//!
//! [`MutableTransformer`] is a [`Transformer`] whose source can be written,
//! with every write recorded in a [`Changeset`].
//!
//! ## Dirty Tracking
//!
//! - Setting a key to a value different from its original marks it dirty and
//!   records `(original, current)`.
//! - Setting it back to the original marks it clean and drops the entry.
//! - Setting an already-dirty key keeps its first original and its position.
//! - Originals are read through [`Transformer::raw`], so a schema's
//!   `read_raw` hook applies to them. A key absent from the source compares
//!   as null.
//!
//! [`MutableTransformer::unset`] removes a key from the source without
//! touching the changeset, so an unset key that was dirty stays dirty.
//!
//! All read accessors are available through `Deref<Target = Transformer<S>>`.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::attributes::{Plain, Schema};
use crate::config::TransformerOptions;
use crate::transformer::Transformer;
use crate::Attributes;

/// A recorded change: the value before the first write and the latest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// `None` when the key did not exist before the first write.
    pub original: Option<Value>,
    pub current: Value,
}

/// Dirty keys and their changes, in the order they were first changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changeset {
    entries: Vec<(String, Change)>,
}

impl Changeset {
    pub fn get(&self, key: &str) -> Option<&Change> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, change)| change)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Change)> {
        self.entries.iter().map(|(name, change)| (name.as_str(), change))
    }

    fn record(&mut self, key: &str, original: Option<Value>, current: Value) {
        match self.entries.iter_mut().find(|(name, _)| name == key) {
            Some((_, change)) => change.current = current,
            None => self
                .entries
                .push((key.to_string(), Change { original, current })),
        }
    }

    fn clear(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(name, _)| name != key);
        self.entries.len() != before
    }
}

/// A transformer that permits writes and tracks dirty attributes.
pub struct MutableTransformer<S = Plain> {
    inner: Transformer<S>,
    changes: Changeset,
}

impl<S: Schema> MutableTransformer<S> {
    pub fn new(source: Attributes) -> Self {
        Transformer::<S>::new(source).into()
    }

    pub fn with_options(source: Attributes, options: TransformerOptions) -> Self {
        Transformer::<S>::with_options(source, options).into()
    }

    pub fn from_value(value: Value) -> Self {
        Transformer::<S>::from_value(value).into()
    }

    /// Write `value` into the source, updating the changeset.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let original = self.prior_value(&key);

        if original.as_ref().unwrap_or(&Value::Null) == &value {
            if self.changes.clear(&key) {
                debug!(key = %key, "attribute clean");
            }
        } else {
            if !self.changes.contains(&key) {
                debug!(key = %key, "attribute dirty");
            }
            self.changes.record(&key, original, value.clone());
        }

        self.inner.source_mut().insert(key, value);
    }

    /// Remove `key` from the source. The changeset is left as is.
    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.inner.source_mut().shift_remove(key)
    }

    /// The value `key` had before it was first changed. For a clean key this
    /// is [`raw`](Transformer::raw); null when absent.
    pub fn original(&self, key: &str) -> Value {
        self.prior_value(key).unwrap_or(Value::Null)
    }

    fn prior_value(&self, key: &str) -> Option<Value> {
        match self.changes.get(key) {
            Some(change) => change.original.clone(),
            None => self
                .inner
                .source()
                .contains_key(key)
                .then(|| self.inner.raw(key)),
        }
    }

    /// The source as it was before any tracked change, with each dirty key
    /// holding its original as `raw` reported it. Keys that did not exist
    /// originally are left out.
    pub fn originals(&self) -> Attributes {
        let mut source = self.inner.source().clone();
        for (key, change) in self.changes.iter() {
            match &change.original {
                Some(original) => {
                    source.insert(key.to_string(), original.clone());
                }
                None => {
                    source.shift_remove(key);
                }
            }
        }
        source
    }

    /// Dirty keys in the order they were first changed.
    pub fn dirty(&self) -> Vec<String> {
        self.changes.keys().map(str::to_string).collect()
    }

    /// With no key, whether anything is dirty; otherwise whether `key` is.
    pub fn is_dirty(&self, key: Option<&str>) -> bool {
        match key {
            Some(key) => self.changes.contains(key),
            None => !self.changes.is_empty(),
        }
    }

    /// Current values of the dirty keys.
    pub fn changed(&self) -> Attributes {
        self.changes
            .iter()
            .map(|(key, change)| (key.to_string(), change.current.clone()))
            .collect()
    }

    pub fn changeset(&self) -> &Changeset {
        &self.changes
    }

    /// Drop change tracking and return the read-only transformer.
    pub fn into_inner(self) -> Transformer<S> {
        self.inner
    }
}

impl<S> Deref for MutableTransformer<S> {
    type Target = Transformer<S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<S: Schema> From<Transformer<S>> for MutableTransformer<S> {
    fn from(inner: Transformer<S>) -> Self {
        Self {
            inner,
            changes: Changeset::default(),
        }
    }
}

impl<S: Schema> Default for MutableTransformer<S> {
    fn default() -> Self {
        Transformer::<S>::default().into()
    }
}

impl<S> Clone for MutableTransformer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<S> fmt::Debug for MutableTransformer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableTransformer")
            .field("inner", &self.inner)
            .field("changes", &self.changes)
            .finish()
    }
}

impl<S: Schema> Serialize for MutableTransformer<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.inner.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tracked() -> MutableTransformer {
        MutableTransformer::from_value(json!({"foo": "aaa", "bar": "bbb"}))
    }

    #[test]
    fn fresh_transformer_is_clean() {
        let t = tracked();
        assert!(!t.is_dirty(None));
        assert!(!t.is_dirty(Some("foo")));
        assert!(t.dirty().is_empty());
        assert!(t.changed().is_empty());
    }

    #[test]
    fn instantiates_without_source() {
        let t = MutableTransformer::<Plain>::default();
        assert!(t.to_map().is_empty());
    }

    #[test]
    fn set_writes_through() {
        let mut t = tracked();
        t.set("baz", "test");
        assert_eq!(t.get("baz"), json!("test"));
        assert_eq!(t.raw("baz"), json!("test"));
    }

    #[test]
    fn tracks_changed_attributes_in_first_change_order() {
        let mut t = tracked();
        t.set("foo", "ccc");
        assert_eq!(t.dirty(), vec!["foo"]);

        t.set("bar", "999");
        assert_eq!(t.dirty(), vec!["foo", "bar"]);

        t.set("foo", "ddd");
        assert_eq!(t.dirty(), vec!["foo", "bar"]);

        t.set("foo", "aaa");
        assert_eq!(t.dirty(), vec!["bar"]);
    }

    #[test]
    fn is_dirty_per_key() {
        let mut t = tracked();
        t.set("foo", "ccc");
        assert!(t.is_dirty(None));
        assert!(t.is_dirty(Some("foo")));
        assert!(!t.is_dirty(Some("bar")));
    }

    #[test]
    fn setting_the_same_value_is_not_a_change() {
        let mut t = tracked();
        t.set("foo", "aaa");
        assert!(!t.is_dirty(None));
    }

    #[test]
    fn strict_equality_decides_dirtiness() {
        let mut t = MutableTransformer::<Plain>::from_value(json!({"n": 1}));
        t.set("n", 1.0);
        assert!(t.is_dirty(Some("n")));
        t.set("n", 1);
        assert!(!t.is_dirty(Some("n")));
    }

    #[test]
    fn keeps_original_of_modified_attributes() {
        let mut t = tracked();
        assert_eq!(t.original("foo"), json!("aaa"));

        t.set("foo", "bbb");
        t.set("foo", "zzz");
        assert_eq!(t.get("foo"), json!("zzz"));
        assert_eq!(t.original("foo"), json!("aaa"));
        assert_eq!(
            t.changeset().get("foo"),
            Some(&Change {
                original: Some(json!("aaa")),
                current: json!("zzz"),
            })
        );
    }

    #[test]
    fn changed_maps_dirty_keys_to_current_values() {
        let mut t = tracked();
        t.set("foo", "bbb");
        assert_eq!(Value::Object(t.changed()), json!({"foo": "bbb"}));

        t.set("foo", "aaa");
        assert!(t.changed().is_empty());
    }

    #[test]
    fn new_keys_compare_as_null() {
        let mut t = tracked();
        assert_eq!(t.original("new"), Value::Null);

        t.set("new", "value");
        assert!(t.is_dirty(Some("new")));
        assert_eq!(t.original("new"), Value::Null);

        t.set("new", Value::Null);
        assert!(!t.is_dirty(Some("new")));
        assert!(t.exists("new"));
    }

    #[test]
    fn originals_rebuild_the_pre_change_source() {
        let mut t = tracked();
        t.set("foo", "ccc");
        t.set("added", 1);
        assert_eq!(
            Value::Object(t.originals()),
            json!({"foo": "aaa", "bar": "bbb"})
        );
        let keys: Vec<_> = t.originals().keys().cloned().collect();
        assert_eq!(keys, vec!["foo", "bar"]);
    }

    #[test]
    fn unset_leaves_the_changeset_alone() {
        let mut t = tracked();
        t.set("foo", "ccc");
        assert_eq!(t.unset("foo"), Some(json!("ccc")));

        assert_eq!(t.get("foo"), Value::Null);
        assert!(!t.exists("foo"));
        assert!(t.is_dirty(Some("foo")));
        assert_eq!(t.original("foo"), json!("aaa"));

        assert_eq!(t.unset("missing"), None);
    }

    #[test]
    fn unset_of_clean_key_is_not_tracked() {
        let mut t = tracked();
        t.unset("bar");
        assert!(!t.is_dirty(None));
        assert_eq!(t.original("bar"), Value::Null);
    }

    #[test]
    fn into_inner_keeps_written_values() {
        let mut t = tracked();
        t.set("foo", "ccc");
        let inner = t.into_inner();
        assert_eq!(inner.get("foo"), json!("ccc"));
    }

    #[test]
    fn serializes_the_transformation() {
        let mut t = tracked();
        t.set("foo", "ccc");
        assert_eq!(
            serde_json::to_value(&t).unwrap(),
            json!({"foo": "ccc", "bar": "bbb"})
        );
    }
}
