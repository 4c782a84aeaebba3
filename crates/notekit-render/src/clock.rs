//! Sources of "now" for the date helper.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the real local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use notekit_render::{Clock, FrozenClock};
///
/// let clock = FrozenClock::new(Utc.with_ymd_and_hms(2009, 11, 17, 20, 34, 58).unwrap());
/// assert_eq!(clock.now().timestamp(), 1258490098);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenClock {
    instant: DateTime<FixedOffset>,
}

impl FrozenClock {
    pub fn new<Tz: TimeZone>(instant: DateTime<Tz>) -> Self {
        Self {
            instant: instant.fixed_offset(),
        }
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
