//! The rendering façade.
//!
//! A [`Renderer`] is an engine configured once with the helper registry, no
//! markup escaping and the process locale. It renders template strings,
//! template files, and named templates registered ahead of time.
//!
//! Renderers hold no mutable shared state: the [`ProcessState`] and helpers
//! behind them are read-only, so one renderer (or several) can be used from
//! many threads at once.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::engine::{HandlebarsEngine, TemplateEngine};
use crate::error::RenderError;
use crate::registry::HelperRegistry;
use crate::state::{self, ProcessState};

/// Renders note templates with the `slug`, `date` and `sh` helpers.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use notekit_render::{NullLogger, ProcessState, RenderContext, Renderer};
///
/// let state = ProcessState::builder()
///     .logger(Arc::new(NullLogger))
///     .build()
///     .unwrap();
/// let renderer = Renderer::with_state(Arc::new(state));
///
/// let ctx = RenderContext::new().with("title", "Weekly Review");
/// let out = renderer.render("{{slug title}}.md", &ctx).unwrap();
/// assert_eq!(out, "weekly-review.md");
/// ```
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
    state: Arc<ProcessState>,
}

impl Renderer {
    /// Creates a renderer from the state installed by [`init`](crate::init).
    ///
    /// # Panics
    ///
    /// Panics if [`init`](crate::init) has not been called. Use
    /// [`with_state`](Self::with_state) to build a renderer without
    /// process-wide state.
    pub fn new() -> Self {
        let Some(installed) = state::installed() else {
            panic!("notekit_render::init must be called before Renderer::new");
        };
        Self::with_helpers(Arc::clone(&installed.state), &installed.helpers)
    }

    /// Creates a renderer with the standard helpers built from `state`.
    pub fn with_state(state: Arc<ProcessState>) -> Self {
        let helpers = HelperRegistry::standard(&state);
        Self::with_helpers(state, &helpers)
    }

    /// Creates a renderer with an explicit helper registry.
    pub fn with_helpers(state: Arc<ProcessState>, helpers: &HelperRegistry) -> Self {
        Self::with_engine(state, Box::new(HandlebarsEngine::new(helpers)))
    }

    /// Creates a renderer around a custom template engine.
    pub fn with_engine(state: Arc<ProcessState>, engine: Box<dyn TemplateEngine>) -> Self {
        Self { engine, state }
    }

    /// The state this renderer was built from.
    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Renders template text against `data`.
    ///
    /// Unknown variables render as empty text. Values are inserted verbatim.
    ///
    /// # Errors
    ///
    /// - [`RenderError::Template`] for malformed templates or unknown helpers
    /// - [`RenderError::DateFormat`] for a bad `date` format argument
    pub fn render<T: Serialize + ?Sized>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        let value = serde_json::to_value(data)?;
        self.engine.render_template(template, &value)
    }

    /// Reads a UTF-8 template file, then renders it like [`render`](Self::render).
    ///
    /// # Errors
    ///
    /// [`RenderError::Io`] if the file cannot be read, otherwise as
    /// [`render`](Self::render).
    pub fn render_file<P, T>(&self, path: P, data: &T) -> Result<String, RenderError>
    where
        P: AsRef<Path>,
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        tracing::debug!(path = %path.display(), "rendering template file");
        self.render(&source, data)
    }

    /// Registers a named template for repeated rendering.
    ///
    /// The template is parsed immediately; syntax errors are returned here.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.engine.add_template(name, source)
    }

    /// Renders a template registered with [`add_template`](Self::add_template).
    pub fn render_named<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        let value = serde_json::to_value(data)?;
        self.engine.render_named(name, &value)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.has_template(name)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
