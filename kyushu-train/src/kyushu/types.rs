//! JSON response DTOs and their conversion to domain types.
//!
//! Both endpoints return bare arrays. Entries that cannot become domain
//! values are skipped with a warning rather than failing the whole list.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{JapanHoliday, Station};

/// One entry of the station suggest response.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedStation {
    pub name: String,
    pub code: String,
}

/// One entry of the holiday calendar response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    /// Date as `yyyy/M/d`, e.g. `2026/2/23`.
    pub holiday_date: Option<String>,
    pub holiday_name: Option<String>,
}

/// Convert suggest entries to stations, dropping invalid codes.
pub fn convert_stations(entries: Vec<SuggestedStation>) -> Vec<Station> {
    entries
        .into_iter()
        .filter_map(|entry| match Station::new(entry.name.as_str(), &entry.code) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Skipping suggested station");
                None
            }
        })
        .collect()
}

/// Convert calendar entries to holidays, dropping blank or malformed ones.
pub fn convert_holidays(entries: Vec<HolidayEntry>) -> Vec<JapanHoliday> {
    entries.into_iter().filter_map(convert_holiday).collect()
}

fn convert_holiday(entry: HolidayEntry) -> Option<JapanHoliday> {
    let date = entry.holiday_date.as_deref().map(str::trim).unwrap_or_default();
    let name = entry.holiday_name.as_deref().map(str::trim).unwrap_or_default();
    if date.is_empty() || name.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(date, "%Y/%m/%d") {
        Ok(date) => Some(JapanHoliday::new(date, name)),
        Err(e) => {
            warn!(date, error = %e, "Skipping holiday with unreadable date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stations_from_suggest_json() {
        let json = r#"[
            {"code": "00F00A520A42", "name": "福井"},
            {"code": "00F00A7409B1", "name": "福江"}
        ]"#;
        let entries: Vec<SuggestedStation> = serde_json::from_str(json).unwrap();
        let stations = convert_stations(entries);

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name(), "福井");
        assert_eq!(stations[0].code().as_str(), "00F00A520A42");
        assert_eq!(stations[1].name(), "福江");
    }

    #[test]
    fn invalid_station_codes_are_skipped() {
        let json = r#"[
            {"code": "", "name": "空"},
            {"code": "00F0-0B", "name": "記号"},
            {"code": "00F00B261279", "name": "博多"}
        ]"#;
        let entries: Vec<SuggestedStation> = serde_json::from_str(json).unwrap();
        let stations = convert_stations(entries);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name(), "博多");
    }

    #[test]
    fn holidays_from_calendar_json() {
        let json = r#"[
            {"holidayDate": "2026/2/23", "holidayName": "天皇誕生日"},
            {"holidayDate": "2026/3/20", "holidayName": "春分の日"}
        ]"#;
        let entries: Vec<HolidayEntry> = serde_json::from_str(json).unwrap();
        let holidays = convert_holidays(entries);

        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].date(), NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert_eq!(holidays[0].name(), "天皇誕生日");
        assert_eq!(holidays[1].date(), NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
    }

    #[test]
    fn blank_and_malformed_holidays_are_skipped() {
        let json = r#"[
            {"holidayDate": "", "holidayName": "空"},
            {"holidayDate": "2026/5/5", "holidayName": " "},
            {"holidayName": "日付なし"},
            {"holidayDate": "2026-05-03", "holidayName": "憲法記念日"},
            {"holidayDate": "2026/5/4", "holidayName": "みどりの日"}
        ]"#;
        let entries: Vec<HolidayEntry> = serde_json::from_str(json).unwrap();
        let holidays = convert_holidays(entries);
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name(), "みどりの日");
    }
}
