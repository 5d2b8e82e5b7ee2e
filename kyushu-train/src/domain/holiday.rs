//! Japanese public holidays.
//!
//! The reservation site publishes its holiday calendar, which drives
//! weekday/holiday timetables.

use chrono::NaiveDate;

/// A public holiday in Japan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JapanHoliday {
    date: NaiveDate,
    name: String,
}

impl JapanHoliday {
    /// Creates a holiday.
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }

    /// Returns the date of the holiday.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the holiday name (e.g. "天皇誕生日").
    pub fn name(&self) -> &str {
        &self.name
    }
}
