//! The helper name → implementation table.
//!
//! A [`HelperRegistry`] is built once from a [`ProcessState`] and then only
//! read. Installing it on an engine registers every helper under its name.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use thiserror::Error;

use crate::helpers::{DateHelper, Helper, ShellHelper, SlugHelper};
use crate::state::ProcessState;

/// Errors from building a helper registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two helpers were registered under one name.
    #[error("helper {0:?} is already registered")]
    DuplicateHelper(String),
}

/// Explicit mapping from helper name to helper.
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: BTreeMap<&'static str, Helper>,
}

impl HelperRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `slug`, `date` and `sh` helpers, wired to the state's clock,
    /// locale, logger and command runner.
    pub fn standard(state: &ProcessState) -> Self {
        let mut registry = Self::new();
        for helper in [
            Helper::from(SlugHelper),
            Helper::from(DateHelper::new(state.clock(), state.locale())),
            Helper::from(ShellHelper::new(
                state.runner(),
                state.logger(),
                state.shell_timeout(),
            )),
        ] {
            registry.helpers.insert(helper.name(), helper);
        }
        registry
    }

    /// Adds a helper; fails if its name is taken.
    pub fn register(&mut self, helper: impl Into<Helper>) -> Result<(), RegistryError> {
        let helper = helper.into();
        let name = helper.name();
        if self.helpers.contains_key(name) {
            return Err(RegistryError::DuplicateHelper(name.to_string()));
        }
        self.helpers.insert(name, helper);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Helper names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.helpers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Registers every helper on a handlebars registry.
    pub fn install(&self, engine: &mut Handlebars<'static>) {
        for (name, helper) in &self.helpers {
            engine.register_helper(name, Box::new(helper.clone()));
        }
    }
}
