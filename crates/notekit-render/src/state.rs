//! Process-wide rendering state.
//!
//! A [`ProcessState`] bundles everything the helpers depend on: the locale,
//! the clock, the logger and the command runner. It is immutable once built.
//!
//! There are two ways to hand it to renderers:
//!
//! - Explicitly, with [`Renderer::with_state`](crate::Renderer::with_state).
//! - Once per process, with [`init`]. [`Renderer::new`](crate::Renderer::new)
//!   then picks it up. `init` consumes the state and can succeed only once; a
//!   second call returns [`InitError::AlreadyInitialized`] and the helpers
//!   already in use stay in place.
//!
//! ```rust,no_run
//! use notekit_render::{init, ProcessState, RenderContext, Renderer};
//!
//! init(ProcessState::builder().locale("en").build().unwrap()).unwrap();
//!
//! let out = Renderer::new()
//!     .render("{{slug title}}", &RenderContext::new().with("title", "Hello World"))
//!     .unwrap();
//! assert_eq!(out, "hello-world");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Locale;
use notekit_pipe::{CommandRunner, ShellRunner};
use once_cell::sync::OnceCell;

use crate::clock::{Clock, SystemClock};
use crate::config::{RenderConfig, DEFAULT_SHELL_TIMEOUT_SECS};
use crate::error::InitError;
use crate::format::resolve_locale;
use crate::logger::{Logger, TracingLogger};
use crate::registry::HelperRegistry;

/// Immutable dependencies shared by every helper.
pub struct ProcessState {
    locale_tag: String,
    locale: Locale,
    logger: Arc<dyn Logger>,
    clock: Arc<dyn Clock>,
    runner: Arc<dyn CommandRunner>,
    shell_timeout: Option<Duration>,
}

impl ProcessState {
    pub fn builder() -> ProcessStateBuilder {
        ProcessStateBuilder::default()
    }

    /// Builds a state with the system clock, a tracing logger and the real
    /// shell runner.
    pub fn from_config(config: &RenderConfig) -> Result<Self, InitError> {
        Self::builder()
            .locale(config.locale.as_str())
            .shell_timeout(config.shell_timeout())
            .build()
    }

    /// The locale tag as configured.
    pub fn locale_tag(&self) -> &str {
        &self.locale_tag
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    pub fn shell_timeout(&self) -> Option<Duration> {
        self.shell_timeout
    }
}

impl fmt::Debug for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessState")
            .field("locale_tag", &self.locale_tag)
            .field("locale", &self.locale)
            .field("shell_timeout", &self.shell_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ProcessState`].
///
/// Unset parts default to the production implementations.
pub struct ProcessStateBuilder {
    locale: String,
    logger: Option<Arc<dyn Logger>>,
    clock: Option<Arc<dyn Clock>>,
    runner: Option<Arc<dyn CommandRunner>>,
    shell_timeout: Option<Duration>,
}

impl Default for ProcessStateBuilder {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            logger: None,
            clock: None,
            runner: None,
            shell_timeout: Some(Duration::from_secs(DEFAULT_SHELL_TIMEOUT_SECS)),
        }
    }
}

impl ProcessStateBuilder {
    pub fn locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// `None` lets shell commands run without a deadline.
    pub fn shell_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.shell_timeout = timeout;
        self
    }

    /// Resolves the locale and fills in defaults.
    pub fn build(self) -> Result<ProcessState, InitError> {
        let locale = resolve_locale(&self.locale)
            .ok_or_else(|| InitError::UnknownLocale(self.locale.clone()))?;

        Ok(ProcessState {
            locale_tag: self.locale,
            locale,
            logger: self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            runner: self.runner.unwrap_or_else(|| Arc::new(ShellRunner)),
            shell_timeout: self.shell_timeout,
        })
    }
}

/// What [`init`] installs: the state and the helpers built from it.
#[derive(Debug, Clone)]
pub(crate) struct Installed {
    pub(crate) state: Arc<ProcessState>,
    pub(crate) helpers: Arc<HelperRegistry>,
}

static INSTALLED: OnceCell<Installed> = OnceCell::new();

/// Installs the process-wide state and builds the shared helper registry.
///
/// Succeeds once per process. Later calls return
/// [`InitError::AlreadyInitialized`] and change nothing.
pub fn init(state: ProcessState) -> Result<(), InitError> {
    let state = Arc::new(state);
    let helpers = Arc::new(HelperRegistry::standard(&state));
    let locale_tag = state.locale_tag().to_string();

    INSTALLED
        .set(Installed { state, helpers })
        .map_err(|_| InitError::AlreadyInitialized)?;

    tracing::debug!(locale = %locale_tag, "notekit initialized");
    Ok(())
}

/// Whether [`init`] has run.
pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}

/// The installed state, if [`init`] has run.
pub fn try_state() -> Option<Arc<ProcessState>> {
    INSTALLED.get().map(|installed| Arc::clone(&installed.state))
}

pub(crate) fn installed() -> Option<&'static Installed> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrozenClock;
    use crate::logger::NullLogger;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_builder_defaults() {
        let state = ProcessState::builder().build().unwrap();
        assert_eq!(state.locale_tag(), "en");
        assert_eq!(state.locale(), Locale::en_US);
        assert_eq!(state.shell_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_builder_overrides() {
        let instant = Utc.with_ymd_and_hms(2009, 11, 17, 20, 34, 58).unwrap();
        let state = ProcessState::builder()
            .locale("fr-FR")
            .clock(Arc::new(FrozenClock::new(instant)))
            .logger(Arc::new(NullLogger))
            .shell_timeout(None)
            .build()
            .unwrap();
        assert_eq!(state.locale(), Locale::fr_FR);
        assert_eq!(state.clock().now().timestamp(), 1258490098);
        assert_eq!(state.shell_timeout(), None);
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let err = ProcessState::builder().locale("klingon").build().unwrap_err();
        assert!(matches!(err, InitError::UnknownLocale(tag) if tag == "klingon"));
    }

    #[test]
    fn test_from_config() {
        let config = RenderConfig {
            locale: "de".into(),
            shell_timeout_secs: 0,
        };
        let state = ProcessState::from_config(&config).unwrap();
        assert_eq!(state.locale(), Locale::de_DE);
        assert_eq!(state.shell_timeout(), None);
    }

    #[test]
    fn test_debug_hides_trait_objects() {
        let state = ProcessState::builder().build().unwrap();
        let debug = format!("{:?}", state);
        assert!(debug.contains("locale_tag: \"en\""));
    }
}
