//! Date format aliases and locale resolution.
//!
//! The date helper accepts either one of the fixed aliases below, a custom
//! strftime pattern prefixed with `cust:`, or nothing at all (ISO date).
//!
//! | alias | pattern | 2009-11-17T20:34:58Z |
//! |-------|---------|----------------------|
//! | (none) | `%Y-%m-%d` | `2009-11-17` |
//! | `short` | `%m/%d/%Y` | `11/17/2009` |
//! | `medium` | `%b %-d, %Y` | `Nov 17, 2009` |
//! | `long` | `%B %-d, %Y` | `November 17, 2009` |
//! | `full` | `%A, %B %-d, %Y` | `Tuesday, November 17, 2009` |
//! | `year` | `%Y` | `2009` |
//! | `time` | `%H:%M` | `20:34` |
//! | `timestamp` | `%Y%m%d%H%M` | `200911172034` |
//! | `timestamp-unix` | `%s` | `1258490098` |

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Locale};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Prefix marking a user-supplied strftime pattern.
pub const CUSTOM_PREFIX: &str = "cust:";

/// Pattern used when the date helper gets no argument.
pub const DEFAULT_PATTERN: &str = "%Y-%m-%d";

const ALIASES: &[(&str, &str)] = &[
    ("short", "%m/%d/%Y"),
    ("medium", "%b %-d, %Y"),
    ("long", "%B %-d, %Y"),
    ("full", "%A, %B %-d, %Y"),
    ("year", "%Y"),
    ("time", "%H:%M"),
    ("timestamp", "%Y%m%d%H%M"),
    ("timestamp-unix", "%s"),
];

static TABLE: Lazy<FormatTable> = Lazy::new(FormatTable::new);

/// Errors from resolving or applying a date format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The argument is neither an alias nor a `cust:` pattern.
    #[error("unknown date format: {0:?}")]
    Unknown(String),

    /// A `cust:` pattern contains a directive chrono does not understand.
    #[error("invalid date pattern: {0:?}")]
    InvalidPattern(String),
}

/// Maps format aliases to strftime patterns.
#[derive(Debug, Clone)]
pub struct FormatTable {
    aliases: Vec<(&'static str, &'static str)>,
}

impl FormatTable {
    fn new() -> Self {
        Self {
            aliases: ALIASES.to_vec(),
        }
    }

    /// The process-wide table.
    pub fn global() -> &'static FormatTable {
        &TABLE
    }

    /// Returns the pattern for an alias, if it is one.
    pub fn alias(&self, name: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, pattern)| *pattern)
    }

    /// Names of every alias, in table order.
    pub fn alias_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.aliases.iter().map(|(alias, _)| *alias)
    }

    /// Resolves a helper argument to a validated pattern.
    pub fn resolve<'a>(&self, format: Option<&'a str>) -> Result<&'a str, FormatError> {
        let Some(format) = format else {
            return Ok(DEFAULT_PATTERN);
        };
        if let Some(pattern) = self.alias(format) {
            return Ok(pattern);
        }
        if let Some(pattern) = format.strip_prefix(CUSTOM_PREFIX) {
            validate_pattern(pattern)?;
            return Ok(pattern);
        }
        Err(FormatError::Unknown(format.to_string()))
    }

    /// Resolves `format` and renders `instant` with it.
    pub fn format(
        &self,
        instant: &DateTime<FixedOffset>,
        format: Option<&str>,
        locale: Locale,
    ) -> Result<String, FormatError> {
        let pattern = self.resolve(format)?;
        let mut out = String::new();
        write!(out, "{}", instant.format_localized(pattern, locale))
            .map_err(|_| FormatError::InvalidPattern(pattern.to_string()))?;
        Ok(out)
    }
}

fn validate_pattern(pattern: &str) -> Result<(), FormatError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}

/// Default region for language-only locale tags.
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("en", "en_US"),
    ("pt", "pt_PT"),
    ("zh", "zh_CN"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("sv", "sv_SE"),
    ("da", "da_DK"),
    ("cs", "cs_CZ"),
    ("el", "el_GR"),
    ("uk", "uk_UA"),
    ("he", "he_IL"),
    ("ar", "ar_SA"),
    ("hi", "hi_IN"),
    ("nb", "nb_NO"),
];

/// Resolves a locale tag such as `en`, `fr-FR` or `de_DE`.
///
/// Language-only tags map to a default region (`en` → `en_US`, `fr` →
/// `fr_FR`). Returns `None` for tags chrono has no data for.
pub fn resolve_locale(tag: &str) -> Option<Locale> {
    let normalized = tag.trim().replace('-', "_");
    if normalized.is_empty() {
        return None;
    }
    if let Ok(locale) = Locale::try_from(normalized.as_str()) {
        return Some(locale);
    }

    let (lang, region) = match normalized.split_once('_') {
        Some((lang, region)) => (lang.to_lowercase(), Some(region.to_uppercase())),
        None => (normalized.to_lowercase(), None),
    };

    let candidate = match region {
        Some(region) => format!("{}_{}", lang, region),
        None => DEFAULT_REGIONS
            .iter()
            .find(|(l, _)| *l == lang)
            .map(|(_, full)| full.to_string())
            .unwrap_or_else(|| format!("{}_{}", lang, lang.to_uppercase())),
    };
    Locale::try_from(candidate.as_str()).ok()
}
