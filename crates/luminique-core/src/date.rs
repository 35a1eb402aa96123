//! Calendar dates and the injected "today" provider.
//!
//! All day-boundary decisions in the engine go through a [`DateProvider`],
//! so streak logic never reads the wall clock directly.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date without a time component, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The calendar day before this one.
    pub fn previous(&self) -> Self {
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN))
    }

    /// The date `days` calendar days before this one.
    pub fn days_before(&self, days: u64) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDate) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                input: s.to_string(),
            })
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Supplies the current calendar date in the user's local time zone.
pub trait DateProvider {
    fn today(&self) -> CalendarDate;
}

/// Reads today's date from the system clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DateProvider for LocalClock {
    fn today(&self) -> CalendarDate {
        CalendarDate(Local::now().date_naive())
    }
}

/// Always reports the same date. Used by tests and the CLI `--today` flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl DateProvider for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl<T: DateProvider + ?Sized> DateProvider for &T {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

impl<T: DateProvider + ?Sized> DateProvider for Box<T> {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}
