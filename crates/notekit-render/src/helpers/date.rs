use std::sync::Arc;

use chrono::Locale;

use super::{HelperError, HelperInvocation};
use crate::clock::Clock;
use crate::format::FormatTable;

/// `{{date}}`, `{{date "long"}}`, `{{date "cust:%Y-%m"}}`.
///
/// Formats the clock's current instant; the block form ignores its content.
/// A format argument naming a missing variable counts as no argument.
#[derive(Clone)]
pub struct DateHelper {
    clock: Arc<dyn Clock>,
    locale: Locale,
}

impl DateHelper {
    pub const NAME: &'static str = "date";

    pub fn new(clock: Arc<dyn Clock>, locale: Locale) -> Self {
        Self { clock, locale }
    }

    pub fn call(&self, invocation: &HelperInvocation) -> Result<String, HelperError> {
        let now = self.clock.now();
        Ok(FormatTable::global().format(&now, invocation.arg(0), self.locale)?)
    }
}
