use serde::{Deserialize, Serialize};

use super::Section;
use crate::date::CalendarDate;

/// Activity recorded for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: CalendarDate,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub evening: bool,
}

impl HistoryEntry {
    pub fn new(date: CalendarDate, morning: bool, evening: bool) -> Self {
        Self {
            date,
            morning,
            evening,
        }
    }

    /// Entry for `date` with only `section` marked done.
    pub fn for_section(date: CalendarDate, section: Section) -> Self {
        let mut entry = Self::new(date, false, false);
        entry.mark(section);
        entry
    }

    /// At least one section was completed. Both count the same as one.
    pub fn has_activity(&self) -> bool {
        self.morning || self.evening
    }

    pub fn is_done(&self, section: Section) -> bool {
        match section {
            Section::Morning => self.morning,
            Section::Evening => self.evening,
        }
    }

    /// Flags only ever move false -> true.
    pub fn mark(&mut self, section: Section) {
        match section {
            Section::Morning => self.morning = true,
            Section::Evening => self.evening = true,
        }
    }

    /// 2 for both sections, 1 for one, 0 for none.
    pub fn score(&self) -> u8 {
        u8::from(self.morning) + u8::from(self.evening)
    }
}
