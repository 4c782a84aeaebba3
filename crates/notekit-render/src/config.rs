//! User-facing configuration.
//!
//! ```rust
//! use notekit_render::RenderConfig;
//!
//! let config = RenderConfig::from_yaml("locale: fr\nshell_timeout_secs: 5\n").unwrap();
//! assert_eq!(config.locale, "fr");
//! assert_eq!(config.shell_timeout(), Some(std::time::Duration::from_secs(5)));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InitError;

/// Default shell helper timeout in seconds.
pub const DEFAULT_SHELL_TIMEOUT_SECS: u64 = 30;

/// Settings for building a [`ProcessState`](crate::ProcessState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Locale tag for month and weekday names (`en`, `fr-FR`, `de_DE`).
    pub locale: String,
    /// Seconds before a shell helper command is killed; `0` waits forever.
    pub shell_timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            shell_timeout_secs: DEFAULT_SHELL_TIMEOUT_SECS,
        }
    }
}

impl RenderConfig {
    /// Parses a YAML document; missing keys take their defaults.
    pub fn from_yaml(source: &str) -> Result<Self, InitError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn shell_timeout(&self) -> Option<Duration> {
        match self.shell_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.shell_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RenderConfig::from_yaml("locale: de").unwrap();
        assert_eq!(config.locale, "de");
        assert_eq!(config.shell_timeout_secs, DEFAULT_SHELL_TIMEOUT_SECS);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RenderConfig::from_yaml("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = RenderConfig::from_yaml("shell_timeout_secs: 0").unwrap();
        assert_eq!(config.shell_timeout(), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RenderConfig::from_yaml("colour: blue").unwrap_err();
        assert!(matches!(err, InitError::Config(_)));
    }
}
