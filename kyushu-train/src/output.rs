//! Serializable views of domain values for JSON output.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{Availability, Fare, JapanHoliday, Journey, Leg, SeatType, Station, TicketType};
use crate::extract::DroppedBlock;

/// A journey in output form.
#[derive(Debug, Serialize)]
pub struct JourneyDto {
    /// Departure time (YYYY-MM-DD HH:MM)
    pub departure_time: String,

    /// Arrival time (YYYY-MM-DD HH:MM)
    pub arrival_time: String,

    /// Total time including changes
    pub duration_mins: i64,

    /// Distance in kilometres
    pub distance_km: f64,

    /// Number of changes
    pub transfers: usize,

    pub legs: Vec<LegDto>,
    pub fares: Vec<FareDto>,
}

/// One train ride within a journey.
#[derive(Debug, Serialize)]
pub struct LegDto {
    pub sequence: usize,
    pub train_name: String,
    pub departure_station: StationDto,
    pub departure_time: String,
    pub arrival_station: StationDto,
    pub arrival_time: String,
    pub duration_mins: i64,
}

/// A fare option for a journey.
#[derive(Debug, Serialize)]
pub struct FareDto {
    /// GREEN, SPECIFIC, FREE or NORMAL
    pub seat_type: &'static str,

    /// NORMAL, E_TICKET or NET_TICKET
    pub ticket_type: &'static str,

    /// AVAILABLE, SOME or FULL
    pub availability: &'static str,

    /// Price in yen
    pub price: u32,
}

/// A station name and code.
#[derive(Debug, Serialize)]
pub struct StationDto {
    pub name: String,
    pub code: String,
}

/// A public holiday.
#[derive(Debug, Serialize)]
pub struct HolidayDto {
    /// Date (YYYY-MM-DD)
    pub date: String,
    pub name: String,
}

/// A results page block that did not become a journey.
#[derive(Debug, Serialize)]
pub struct DroppedBlockDto {
    pub index: usize,
    pub reason: String,
}

/// Format a timestamp as YYYY-MM-DD HH:MM.
fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

impl JourneyDto {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            departure_time: format_datetime(&journey.departure_time()),
            arrival_time: format_datetime(&journey.arrival_time()),
            duration_mins: journey.duration().num_minutes(),
            distance_km: journey.distance(),
            transfers: journey.transfer_count(),
            legs: journey.legs().iter().map(LegDto::from_leg).collect(),
            fares: journey.fares().iter().map(FareDto::from_fare).collect(),
        }
    }
}

impl LegDto {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            sequence: leg.sequence(),
            train_name: leg.train_name().to_string(),
            departure_station: StationDto::from_station(leg.departure_station()),
            departure_time: format_datetime(&leg.departure_time()),
            arrival_station: StationDto::from_station(leg.arrival_station()),
            arrival_time: format_datetime(&leg.arrival_time()),
            duration_mins: leg.duration().num_minutes(),
        }
    }
}

impl FareDto {
    /// Create from a domain Fare.
    pub fn from_fare(fare: &Fare) -> Self {
        let seat_type = match fare.seat_type() {
            SeatType::Green => "GREEN",
            SeatType::Specific => "SPECIFIC",
            SeatType::Free => "FREE",
            SeatType::Normal => "NORMAL",
        };
        let ticket_type = match fare.ticket_type() {
            TicketType::Normal => "NORMAL",
            TicketType::ETicket => "E_TICKET",
            TicketType::NetTicket => "NET_TICKET",
        };
        let availability = match fare.availability() {
            Availability::Available => "AVAILABLE",
            Availability::Some => "SOME",
            Availability::Full => "FULL",
        };

        Self {
            seat_type,
            ticket_type,
            availability,
            price: fare.price(),
        }
    }
}

impl StationDto {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            code: station.code().as_str().to_string(),
        }
    }
}

impl HolidayDto {
    pub fn from_holiday(holiday: &JapanHoliday) -> Self {
        Self {
            date: holiday.date().format("%Y-%m-%d").to_string(),
            name: holiday.name().to_string(),
        }
    }
}

impl DroppedBlockDto {
    pub fn from_dropped(dropped: &DroppedBlock) -> Self {
        Self {
            index: dropped.index,
            reason: dropped.reason.to_string(),
        }
    }
}
