//! # Shapeshift
//!
//! Shapeshift is a **presentation layer for loosely-typed records**. It wraps a
//! raw keyed mapping (usually decoded JSON, form input or a database row) and
//! exposes a read-mostly view that can cast, compute, default, hide and
//! selectively project its keys before the record is handed to a serializer.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  MutableTransformer (mutable.rs)                            │
//! │  - Writes into the source                                   │
//! │  - Changeset: dirty keys, originals, changed values         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Deref
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transformer (transformer.rs)                               │
//! │  - get / raw / all / exists / keys                          │
//! │  - only / except / intersect via projection.rs              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Schema (attributes/)                                       │
//! │  - Static AttributeSpec registry per transformer type       │
//! │  - Casts, computed attributes, defaults, hidden keys        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Fail Soft
//!
//! Nothing in the resolution or projection path returns an error:
//! - Unknown keys resolve to null, a declared default, or the caller's fallback
//! - Invalid projection entries are skipped
//! - Casts coerce malformed input instead of rejecting it
//!
//! Only the edges that leave the crate's own model (typed deserialization,
//! loading options from the environment) return [`Result`].
//!
//! ## Example
//!
//! ```
//! use serde_json::{json, Value};
//! use shapeshift::{AttributeSpec, Cast, Projection, Schema, Transformer};
//!
//! struct Order;
//!
//! fn total(order: &Transformer<Order>) -> Value {
//!     let qty = order.get("qty").as_i64().unwrap_or(0);
//!     let price = order.get("price").as_f64().unwrap_or(0.0);
//!     json!(qty as f64 * price)
//! }
//!
//! impl Schema for Order {
//!     const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
//!         AttributeSpec::new("qty").cast(Cast::Int),
//!         AttributeSpec::new("price").cast(Cast::Float),
//!         AttributeSpec::new("total").computed(total),
//!         AttributeSpec::new("internal_note").hidden(),
//!     ];
//! }
//!
//! let order = Transformer::<Order>::from_value(json!({
//!     "qty": "3",
//!     "price": "2.5",
//!     "customer": {"name": "Jason", "email": "jason@example.com"},
//!     "internal_note": "call first",
//! }));
//!
//! assert_eq!(order.get("total"), json!(7.5));
//! assert_eq!(
//!     Value::Object(order.only(["total", "missing"])),
//!     json!({"total": 7.5})
//! );
//! assert_eq!(
//!     Value::Object(order.only([Projection::nested("customer", ["name"])])),
//!     json!({"customer": {"name": "Jason"}})
//! );
//! assert!(!order.keys().contains(&"internal_note".to_string()));
//! ```
//!
//! ## Module Overview
//!
//! - [`attributes`]: Casts, attribute specs, the [`Schema`] trait, name inflection
//! - [`transformer`]: The read-only [`Transformer`]
//! - [`projection`]: `only` / `except` / `intersect` over transformed mappings
//! - [`mutable`]: [`MutableTransformer`] and its [`Changeset`]
//! - [`config`]: Per-instance [`TransformerOptions`]
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod mutable;
pub mod projection;
pub mod transformer;

/// A raw or transformed attribute mapping. Keys keep insertion order.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

pub use attributes::{AttributeSpec, Cast, Plain, Schema};
pub use config::TransformerOptions;
pub use error::{Result, ShapeshiftError};
pub use mutable::{Change, Changeset, MutableTransformer};
pub use projection::Projection;
pub use transformer::Transformer;
