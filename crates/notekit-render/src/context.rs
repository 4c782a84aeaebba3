//! Variables available to a template.
//!
//! A [`RenderContext`] maps variable names to optional text values. Names
//! that are missing, or present with no value, render as empty text.
//!
//! ```rust
//! use notekit_render::RenderContext;
//!
//! let ctx = RenderContext::new()
//!     .with("title", "Meeting notes")
//!     .with_absent("author");
//!
//! assert_eq!(ctx.get("title"), Some("Meeting notes"));
//! assert_eq!(ctx.get("author"), None);
//! assert_eq!(ctx.get("unknown"), None);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Immutable name → text mapping handed to a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    vars: BTreeMap<String, Option<String>>,
}

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable with a value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), Some(value.into()));
        self
    }

    /// Adds a variable that is declared but has no value.
    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.vars.insert(name.into(), None);
        self
    }

    /// Returns the value of a variable, if it has one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for RenderContext {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, Option<String>>> for RenderContext {
    fn from(map: HashMap<String, Option<String>>) -> Self {
        Self {
            vars: map.into_iter().collect(),
        }
    }
}
