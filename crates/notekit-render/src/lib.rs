//! # Notekit Render - Note Template Rendering
//!
//! `notekit-render` turns note templates into text. Templates use
//! mustache-style syntax (`{{var}}`, `{{helper "arg"}}`,
//! `{{#helper}}...{{/helper}}`) and get three helpers:
//!
//! - `slug`: ASCII, lower-case, hyphen-separated text for file names
//! - `date`: the current instant through a named format or `cust:` pattern
//! - `sh`: the standard output of a shell command
//!
//! Output is never markup-escaped and unknown variables render as empty text.
//!
//! ## Core Concepts
//!
//! - [`ProcessState`]: locale, clock, logger and command runner, fixed once built
//! - [`init`]: installs a `ProcessState` for the whole process, once
//! - [`Renderer`]: renders strings, files and named templates
//! - [`RenderContext`]: the variables a template is rendered against
//! - [`HelperRegistry`]: the helper name table installed on every engine
//! - [`RenderConfig`]: YAML settings for building a `ProcessState`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use notekit_render::{FrozenClock, NullLogger, ProcessState, RenderContext, Renderer};
//!
//! let state = ProcessState::builder()
//!     .locale("en")
//!     .clock(Arc::new(FrozenClock::new(
//!         Utc.with_ymd_and_hms(2009, 11, 17, 20, 34, 58).unwrap(),
//!     )))
//!     .logger(Arc::new(NullLogger))
//!     .build()
//!     .unwrap();
//! let renderer = Renderer::with_state(Arc::new(state));
//!
//! let ctx = RenderContext::new().with("title", "Café Meeting");
//! let out = renderer
//!     .render(r#"{{date "timestamp"}}-{{#slug}}{{title}}{{/slug}}.md"#, &ctx)
//!     .unwrap();
//! assert_eq!(out, "200911172034-cafe-meeting.md");
//! ```
//!
//! ## Process-wide Setup
//!
//! Applications usually build the state from configuration and install it
//! once at start-up; [`Renderer::new`] then uses it:
//!
//! ```rust,no_run
//! use notekit_render::{init, ProcessState, RenderConfig, RenderContext, Renderer};
//!
//! let config = RenderConfig::from_yaml("locale: fr\n").unwrap();
//! init(ProcessState::from_config(&config).unwrap()).unwrap();
//!
//! let out = Renderer::new()
//!     .render(r#"{{date "full"}}"#, &RenderContext::new())
//!     .unwrap();
//! println!("{}", out);
//! ```
//!
//! ## Shell Helper Failures
//!
//! A failing `sh` command never aborts the render. The failure goes to the
//! configured [`Logger`] (by default a `tracing` warning) and the helper
//! renders as empty text. A bad `date` format, by contrast, fails the whole
//! render with [`RenderError::DateFormat`].

pub mod clock;
pub mod config;
pub mod context;
pub mod engine;
mod error;
pub mod format;
pub mod helpers;
pub mod logger;
pub mod registry;
mod renderer;
pub mod state;

pub use clock::{Clock, FrozenClock, SystemClock};
pub use config::RenderConfig;
pub use context::RenderContext;
pub use engine::{HandlebarsEngine, TemplateEngine};
pub use error::{InitError, RenderError};
pub use format::{resolve_locale, FormatError, FormatTable};
pub use helpers::{
    slugify, DateHelper, Helper, HelperError, HelperInvocation, ShellHelper, SlugHelper,
};
pub use logger::{Logger, MemoryLogger, NullLogger, TracingLogger};
pub use registry::{HelperRegistry, RegistryError};
pub use renderer::Renderer;
pub use state::{init, is_initialized, try_state, ProcessState, ProcessStateBuilder};
