//! Domain types for the Kyushu rail journey search.
//!
//! This module contains the core domain model types that represent
//! validated search results. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod fare;
mod holiday;
mod journey;
mod leg;
mod link;
mod query;
mod station;

pub use error::DomainError;
pub use fare::{Availability, Fare, SeatType, TicketType};
pub use holiday::JapanHoliday;
pub use journey::{Journey, MAX_LEGS};
pub use leg::Leg;
pub use link::{LinkedLegs, link_legs};
pub use query::{
    MAX_PASSENGERS, QueryError, SEARCH_WINDOW_DAYS, SearchQuery, SearchQueryBuilder,
    TimeCondition,
};
pub use station::{
    InvalidStationCode, InvalidStationKeyword, PLACEHOLDER_CODE, Station, StationCode,
    StationKeyword,
};
