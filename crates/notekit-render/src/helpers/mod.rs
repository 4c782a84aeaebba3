//! Template helpers.
//!
//! Helpers extend the template language with domain logic. Each is usable
//! inline (`{{name args}}`) or as a block wrapping other template source
//! (`{{#name args}}...{{/name}}`), in which case the block is rendered first
//! and handed to the helper as text.
//!
//! | name | helper | purpose |
//! |------|--------|---------|
//! | `slug` | [`SlugHelper`] | ASCII, lower-case, hyphen-separated text |
//! | `date` | [`DateHelper`] | current instant through a format alias |
//! | `sh` | [`ShellHelper`] | output of a shell command |
//!
//! The set is closed: [`Helper`] is an enum over the three implementations,
//! and the engine only ever sees helpers through it.

mod date;
mod shell;
mod slug;

use handlebars::{
    Context, Handlebars, HelperDef, HelperResult, JsonRender, Output, RenderErrorReason,
    Renderable,
};
use thiserror::Error;

use crate::format::FormatError;

pub use date::DateHelper;
pub use shell::ShellHelper;
pub use slug::{slugify, SlugHelper};

/// Errors a helper reports to the render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelperError {
    /// A required positional argument was not given.
    #[error("helper `{helper}` requires {what}")]
    MissingArgument {
        helper: &'static str,
        what: &'static str,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The input to one helper call.
///
/// Arguments that resolve to `null` (a missing or absent variable) are left
/// out, so `{{date missing}}` behaves like `{{date}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperInvocation {
    /// Positional arguments, rendered to text.
    pub args: Vec<String>,
    /// Rendered block content; `None` for the inline form.
    pub block: Option<String>,
}

impl HelperInvocation {
    pub fn inline<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }

    /// Positional argument at `index`, if given.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }
}

/// A registered helper.
#[derive(Clone)]
pub enum Helper {
    Slug(SlugHelper),
    Date(DateHelper),
    Shell(ShellHelper),
}

impl Helper {
    /// The name templates call this helper by.
    pub fn name(&self) -> &'static str {
        match self {
            Helper::Slug(_) => SlugHelper::NAME,
            Helper::Date(_) => DateHelper::NAME,
            Helper::Shell(_) => ShellHelper::NAME,
        }
    }

    /// Runs the helper.
    pub fn invoke(&self, invocation: &HelperInvocation) -> Result<String, HelperError> {
        match self {
            Helper::Slug(h) => Ok(h.call(invocation)),
            Helper::Date(h) => h.call(invocation),
            Helper::Shell(h) => h.call(invocation),
        }
    }
}

impl std::fmt::Debug for Helper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Helper").field(&self.name()).finish()
    }
}

impl From<SlugHelper> for Helper {
    fn from(h: SlugHelper) -> Self {
        Helper::Slug(h)
    }
}

impl From<DateHelper> for Helper {
    fn from(h: DateHelper) -> Self {
        Helper::Date(h)
    }
}

impl From<ShellHelper> for Helper {
    fn from(h: ShellHelper) -> Self {
        Helper::Shell(h)
    }
}

// Bridge into handlebars: collect non-null params, render the block (if
// any), then hand both to the helper. Helper errors are boxed so
// `RenderError` can recover them intact.
impl HelperDef for Helper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &handlebars::Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut handlebars::RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let args = h
            .params()
            .iter()
            .filter(|p| !p.value().is_null())
            .map(|p| p.value().render())
            .collect();
        let block = match h.template() {
            Some(template) => Some(template.renders(r, ctx, rc)?),
            None => None,
        };
        let invocation = HelperInvocation { args, block };

        let rendered = self
            .invoke(&invocation)
            .map_err(|e| RenderErrorReason::NestedError(Box::new(e)))?;
        out.write(&rendered)?;
        Ok(())
    }
}
