//! Error types for template rendering.
//!
//! [`RenderError`] is what every rendering call returns. It abstracts over
//! the template engine's own errors so the public API does not leak
//! `handlebars` types. [`InitError`] covers building and installing the
//! process-wide state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;
use crate::helpers::HelperError;

/// Error type for template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax error, unknown helper, or a helper used incorrectly.
    #[error("template error: {0}")]
    Template(String),

    /// Named template was never registered.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The date helper got a format it cannot use.
    #[error("date format error: {0}")]
    DateFormat(#[from] FormatError),

    /// Template file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Render data could not be converted for the engine.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Other operational error.
    #[error("{0}")]
    Operation(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<HelperError> for RenderError {
    fn from(err: HelperError) -> Self {
        match err {
            HelperError::Format(format) => RenderError::DateFormat(format),
            other => RenderError::Template(other.to_string()),
        }
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(err: handlebars::TemplateError) -> Self {
        RenderError::Template(err.to_string())
    }
}

// Helper failures travel through the engine boxed as nested errors; unwrap
// them back into their own variants here.
impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        use handlebars::RenderErrorReason as Reason;

        match err.reason() {
            Reason::NestedError(inner) => match inner.downcast_ref::<HelperError>() {
                Some(helper) => helper.clone().into(),
                None => RenderError::Operation(err.to_string()),
            },
            Reason::TemplateNotFound(name) => RenderError::TemplateNotFound(name.clone()),
            Reason::TemplateError(..)
            | Reason::HelperNotFound(..)
            | Reason::PartialNotFound(..)
            | Reason::MissingVariable(..)
            | Reason::ParamNotFoundForIndex(..) => RenderError::Template(err.to_string()),
            Reason::SerdeError(..) => RenderError::Serialization(err.to_string()),
            _ => RenderError::Operation(err.to_string()),
        }
    }
}

/// Errors from building or installing the process-wide state.
#[derive(Debug, Error)]
pub enum InitError {
    /// [`crate::init`] was already called in this process.
    #[error("notekit is already initialized; the running state was left untouched")]
    AlreadyInitialized,

    /// The locale tag has no date data.
    #[error("unknown locale: {0:?}")]
    UnknownLocale(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for InitError {
    fn from(err: serde_yaml::Error) -> Self {
        InitError::Config(err.to_string())
    }
}
