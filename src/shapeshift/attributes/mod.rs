//! # Attribute System
//!
//! This module describes what a transformer does to each key of its source.
//! Instead of discovering accessor methods at runtime, every transformer type
//! declares a static registry of [`AttributeSpec`]s through the [`Schema`]
//! trait:
//!
//! - **Casts**: coerce a raw value to a native type ([`Cast`])
//! - **Computed attributes**: functions of the source that shadow a raw key
//! - **Defaults**: values used when a key is absent or null
//! - **Hidden keys**: readable one at a time but left out of bulk output
//!
//! ## Resolution Order
//!
//! | Step | Source | Notes |
//! |------|--------|-------|
//! | 1 | computed attribute | matched through camelCase (`bar_baz` → `barBaz`) |
//! | 2 | caller fallback / default | only when the key is absent |
//! | 3 | cast | applied to the raw value, null is never cast |
//! | 4 | raw value | untouched |
//!
//! A null produced by steps 1, 3 or 4 is replaced by the declared default
//! unless the transformer prefers nulls.
//!
//! ## Usage
//!
//! ```ignore
//! struct Profile;
//!
//! impl Schema for Profile {
//!     const ATTRIBUTES: &'static [AttributeSpec<Self>] = &[
//!         AttributeSpec::new("age").cast(Cast::Int),
//!         AttributeSpec::new("fullName").computed(full_name),
//!         AttributeSpec::new("country").fallback(usa),
//!         AttributeSpec::new("password").hidden(),
//!     ];
//! }
//! ```

mod cast;
mod naming;
mod spec;

pub use cast::{is_truthy, Cast};
pub use naming::{camel_case, snake_case};
pub use spec::{AttributeSpec, ComputeFn, FallbackFn, Plain, Schema};
