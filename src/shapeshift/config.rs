//! # Configuration
//!
//! Transformer behavior that is not part of a schema lives in
//! [`TransformerOptions`], managed by [`confique`]. Options are handed to a
//! transformer at construction time and apply to that instance only, so two
//! transformers in the same process never see each other's settings.
//!
//! ## Sources
//!
//! Options are resolved in priority order:
//! 1. **Environment variables**: `SHAPESHIFT_PREFER_NULL` (only via [`TransformerOptions::from_env`]).
//! 2. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! No configuration file is ever read.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `prefer_null` | `false` | Keep explicit nulls instead of replacing them with declared defaults |

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-instance options for a [`Transformer`](crate::Transformer).
#[derive(Config, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformerOptions {
    /// When set, `get` never substitutes a declared default: null and absent
    /// keys resolve to null. `all` still lists defaulted keys missing from the
    /// source.
    #[config(env = "SHAPESHIFT_PREFER_NULL", default = false)]
    pub prefer_null: bool,
}

impl Default for TransformerOptions {
    fn default() -> Self {
        Self { prefer_null: false }
    }
}

impl TransformerOptions {
    /// Options with `prefer_null` switched on.
    pub fn prefer_null() -> Self {
        Self { prefer_null: true }
    }

    /// Load options from the environment, falling back to compiled defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }
}
