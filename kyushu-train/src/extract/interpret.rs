//! Field interpreters.
//!
//! Pure functions that turn raw page text into typed values. Every
//! interpreter except the time-of-day parser is total: unrecognised input
//! falls back to a fixed default.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Availability, SearchQuery, SeatType};

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)月(\d+)日").expect("valid date pattern"));
static KILOMETRES: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\d.]+)Km").expect("valid distance pattern"));
static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[:：](\d{2})").expect("valid time pattern"));

/// How far from the anchor a month/day may resolve, in days.
const MAX_DATE_DISTANCE_DAYS: i64 = 183;

/// Error from interpreting a field that has no sensible default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    /// No `HH:MM` time of day in the text
    #[error("no time of day in {0:?}")]
    InvalidTime(String),
}

/// Supplies the year for month/day-only dates on the results page.
///
/// The page prints ride dates as `12月2日` without a year. The year is
/// taken from an anchor date (normally the query's search date): of the
/// anchor's year and its neighbours, the one putting the ride date closest
/// to the anchor wins, so a search on 30 December resolves `1月2日` to the
/// following January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateContext {
    anchor: NaiveDate,
    fallback: NaiveDate,
}

impl DateContext {
    /// Creates a context with an explicit anchor and fallback date.
    pub fn new(anchor: NaiveDate, fallback: NaiveDate) -> Self {
        Self { anchor, fallback }
    }

    /// Anchors on today's local date.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::new(today, today)
    }

    /// Anchors on the query's search date; unreadable dates fall back to today.
    pub fn for_query(query: &SearchQuery) -> Self {
        Self::new(query.search_datetime().date(), Local::now().date_naive())
    }

    /// Resolves a month/day to the nearest matching date around the anchor.
    pub fn resolve(&self, month: u32, day: u32) -> Option<NaiveDate> {
        let year = self.anchor.year();
        [year - 1, year, year + 1]
            .into_iter()
            .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
            .map(|date| (date, (date - self.anchor).num_days().abs()))
            .filter(|(_, distance)| *distance <= MAX_DATE_DISTANCE_DAYS)
            .min_by_key(|(_, distance)| *distance)
            .map(|(date, _)| date)
    }
}

/// Parse the first `<month>月<day>日` in the text.
///
/// Falls back to the context's fallback date when nothing matches or the
/// month/day is impossible.
pub fn parse_date(text: &str, context: &DateContext) -> NaiveDate {
    MONTH_DAY
        .captures(text)
        .and_then(|caps| {
            let month = caps[1].parse().ok()?;
            let day = caps[2].parse().ok()?;
            context.resolve(month, day)
        })
        .unwrap_or(context.fallback)
}

/// Parse the first `<number>Km` in the text; `0.0` when absent.
pub fn parse_distance(text: &str) -> f64 {
    KILOMETRES
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0)
}

/// Parse a yen price such as `11,190円`; `0` when unreadable.
pub fn parse_price(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '，' | '円' | '¥' | '￥'))
        .collect();
    digits.trim().parse().unwrap_or(0)
}

/// Map a status glyph to availability. Unknown glyphs count as full.
pub fn parse_availability(text: &str) -> Availability {
    match text.trim() {
        "○" => Availability::Available,
        "△" => Availability::Some,
        "×" => Availability::Full,
        _ => Availability::Full,
    }
}

/// Map a seat label to a seat class, checking green car first.
pub fn parse_seat_type(text: &str) -> SeatType {
    if text.contains("グリーン車") {
        SeatType::Green
    } else if text.contains("指定席") {
        SeatType::Specific
    } else if text.contains("自由席") {
        SeatType::Free
    } else {
        SeatType::Normal
    }
}

/// Parse the first `H:MM` or `HH:MM` in the text.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, InterpretError> {
    TIME_OF_DAY
        .captures(text)
        .and_then(|caps| {
            let hour = caps[1].parse().ok()?;
            let minute = caps[2].parse().ok()?;
            NaiveTime::from_hms_opt(hour, minute, 0)
        })
        .ok_or_else(|| InterpretError::InvalidTime(text.to_string()))
}

/// Combine a ride date with departure and arrival times of day.
///
/// An arrival earlier than the departure is an overnight ride and lands on
/// the following day.
pub fn ride_times(
    date: NaiveDate,
    departure: &str,
    arrival: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), InterpretError> {
    let departs = date.and_time(parse_time_of_day(departure)?);
    let mut arrives = date.and_time(parse_time_of_day(arrival)?);
    if arrives < departs {
        arrives += Duration::days(1);
    }
    Ok((departs, arrives))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatted prices parse back to the same amount
        #[test]
        fn formatted_price_roundtrip(price in 0u32..10_000_000) {
            let digits = price.to_string();
            let mut grouped = String::new();
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(c);
            }
            prop_assert_eq!(parse_price(&format!("{grouped}円")), price);
        }

        /// Arrival never precedes departure and rolls at most one day
        #[test]
        fn ride_times_are_ordered(dh in 0u32..24, dm in 0u32..60, ah in 0u32..24, am in 0u32..60) {
            let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
            let (dep, arr) = ride_times(date, &format!("{dh:02}:{dm:02}"), &format!("{ah:02}:{am:02}")).unwrap();
            prop_assert!(arr >= dep);
            prop_assert!(arr - dep < Duration::days(1));
        }

        /// Interpreters never panic on arbitrary text
        #[test]
        fn total_on_arbitrary_text(s in "\\PC*") {
            let ctx = DateContext::new(
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            );
            let _ = parse_date(&s, &ctx);
            prop_assert!(parse_distance(&s) >= 0.0);
            let _ = parse_price(&s);
            let _ = parse_availability(&s);
            let _ = parse_seat_type(&s);
            let _ = parse_time_of_day(&s);
        }
    }
}
