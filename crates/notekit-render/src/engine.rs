//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which lets the
//! [`Renderer`](crate::Renderer) work with different template backends. The
//! default implementation is [`HandlebarsEngine`]: mustache-style syntax
//! (`{{var}}`, `{{helper args}}`, `{{#helper}}...{{/helper}}`), no markup
//! escaping, and missing variables rendered as empty text.

use handlebars::Handlebars;

use crate::error::RenderError;
use crate::registry::HelperRegistry;

/// A template engine that can render templates with data.
///
/// Template engines handle:
/// - Template parsing and caching
/// - Variable substitution
/// - Helper dispatch
pub trait TemplateEngine: Send + Sync {
    /// Renders a template string with the given data.
    ///
    /// This parses and renders the template in one step. For repeated
    /// rendering of the same template, use [`add_template`](Self::add_template)
    /// and [`render_named`](Self::render_named).
    fn render_template(&self, template: &str, data: &serde_json::Value)
        -> Result<String, RenderError>;

    /// Adds a named template to the engine.
    ///
    /// The template is parsed and cached for later use via
    /// [`render_named`](Self::render_named).
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a previously registered template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;
}

/// Handlebars-based template engine.
///
/// # Example
///
/// ```rust
/// use notekit_render::{HandlebarsEngine, HelperRegistry, TemplateEngine};
/// use serde_json::json;
///
/// let engine = HandlebarsEngine::new(&HelperRegistry::new());
/// let output = engine
///     .render_template("Salut, {{name}}!", &json!({"name": "l'ami"}))
///     .unwrap();
/// assert_eq!(output, "Salut, l'ami!");
/// ```
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Creates an engine with escaping off and the given helpers installed.
    pub fn new(helpers: &HelperRegistry) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);
        helpers.install(&mut registry);

        tracing::debug!(
            helpers = ?helpers.names().collect::<Vec<_>>(),
            "handlebars engine ready"
        );
        Self { registry }
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        Ok(self.registry.render_template(template, data)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.registry.register_template_string(name, source)?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        if !self.registry.has_template(name) {
            return Err(RenderError::TemplateNotFound(name.to_string()));
        }
        Ok(self.registry.render(name, data)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}
