//! Search query types.
//!
//! A `SearchQuery` is the validated set of conditions submitted to the
//! reservation site's route search. It can only be obtained through
//! [`SearchQueryBuilder::build`], which checks every constraint the site
//! enforces before anything is sent.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};

use super::Station;

/// How far ahead the site accepts searches, in days.
pub const SEARCH_WINDOW_DAYS: i64 = 30;

/// Maximum number of passengers in one search.
pub const MAX_PASSENGERS: u32 = 7;

/// Errors raised while validating a search query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Departure and arrival are the same station
    #[error("departure and arrival stations must differ")]
    SameStation,

    /// Search time is before the start of today
    #[error("search datetime must not be before today")]
    BeforeToday,

    /// Search time is too far in the future
    #[error("search datetime must be within the next 30 days")]
    BeyondWindow,

    /// No passengers
    #[error("at least one passenger is required")]
    NoPassengers,

    /// Too many passengers
    #[error("at most 7 passengers are allowed (got {0})")]
    TooManyPassengers(u32),

    /// Unknown time condition ordinal
    #[error("time condition must be 0 to 3 (got {0})")]
    InvalidTimeCondition(u8),
}

/// Which end of the trip the search time refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeCondition {
    /// Depart at or after the search time
    DepartureTime,
    /// Arrive at or before the search time
    ArrivalTime,
    /// First train of the day; the time of day is ignored
    FirstClassTime,
    /// Last train of the day; the time of day is ignored
    LastClassTime,
}

impl TimeCondition {
    /// Returns the ordinal the site uses for this condition.
    pub fn ordinal(&self) -> u8 {
        match self {
            TimeCondition::DepartureTime => 0,
            TimeCondition::ArrivalTime => 1,
            TimeCondition::FirstClassTime => 2,
            TimeCondition::LastClassTime => 3,
        }
    }

    /// Builds a condition from its ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, QueryError> {
        match ordinal {
            0 => Ok(TimeCondition::DepartureTime),
            1 => Ok(TimeCondition::ArrivalTime),
            2 => Ok(TimeCondition::FirstClassTime),
            3 => Ok(TimeCondition::LastClassTime),
            other => Err(QueryError::InvalidTimeCondition(other)),
        }
    }
}

/// A validated route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    departure_station: Station,
    arrival_station: Station,
    time_condition: TimeCondition,
    search_datetime: NaiveDateTime,
    adult_count: u32,
    child_count: u32,
    include_express: bool,
    allow_transfer: bool,
    include_shinkansen: bool,
    include_outer_kyushu: bool,
}

impl SearchQuery {
    /// Starts a query with the required fields and site defaults:
    /// one adult, no children, every train type allowed.
    pub fn builder(
        departure_station: Station,
        arrival_station: Station,
        time_condition: TimeCondition,
        search_datetime: NaiveDateTime,
    ) -> SearchQueryBuilder {
        SearchQueryBuilder {
            query: SearchQuery {
                departure_station,
                arrival_station,
                time_condition,
                search_datetime,
                adult_count: 1,
                child_count: 0,
                include_express: true,
                allow_transfer: true,
                include_shinkansen: true,
                include_outer_kyushu: true,
            },
        }
    }

    pub fn departure_station(&self) -> &Station {
        &self.departure_station
    }

    pub fn arrival_station(&self) -> &Station {
        &self.arrival_station
    }

    pub fn time_condition(&self) -> TimeCondition {
        self.time_condition
    }

    pub fn search_datetime(&self) -> NaiveDateTime {
        self.search_datetime
    }

    pub fn adult_count(&self) -> u32 {
        self.adult_count
    }

    pub fn child_count(&self) -> u32 {
        self.child_count
    }

    /// Whether limited express (特急・急行) trains may be used.
    pub fn include_express(&self) -> bool {
        self.include_express
    }

    /// Whether changing trains is allowed.
    pub fn allow_transfer(&self) -> bool {
        self.allow_transfer
    }

    /// Whether shinkansen may be used.
    pub fn include_shinkansen(&self) -> bool {
        self.include_shinkansen
    }

    /// Whether the Kokura–Hakata shinkansen and trains starting or ending
    /// outside Kyushu may be used.
    pub fn include_outer_kyushu(&self) -> bool {
        self.include_outer_kyushu
    }
}

/// Builder for [`SearchQuery`]. Nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    pub fn adults(mut self, count: u32) -> Self {
        self.query.adult_count = count;
        self
    }

    pub fn children(mut self, count: u32) -> Self {
        self.query.child_count = count;
        self
    }

    pub fn include_express(mut self, yes: bool) -> Self {
        self.query.include_express = yes;
        self
    }

    pub fn allow_transfer(mut self, yes: bool) -> Self {
        self.query.allow_transfer = yes;
        self
    }

    pub fn include_shinkansen(mut self, yes: bool) -> Self {
        self.query.include_shinkansen = yes;
        self
    }

    pub fn include_outer_kyushu(mut self, yes: bool) -> Self {
        self.query.include_outer_kyushu = yes;
        self
    }

    /// Validates against the local wall clock.
    pub fn build(self) -> Result<SearchQuery, QueryError> {
        self.build_at(Local::now().naive_local())
    }

    /// Validates against the given "now".
    ///
    /// The search time must fall strictly after the start of `now`'s day
    /// and strictly before the start of the day [`SEARCH_WINDOW_DAYS`] later.
    pub fn build_at(self, now: NaiveDateTime) -> Result<SearchQuery, QueryError> {
        let query = self.query;

        if query.departure_station == query.arrival_station {
            return Err(QueryError::SameStation);
        }

        let start_of_today = now.date().and_time(NaiveTime::MIN);
        if query.search_datetime <= start_of_today {
            return Err(QueryError::BeforeToday);
        }
        if query.search_datetime >= start_of_today + Duration::days(SEARCH_WINDOW_DAYS) {
            return Err(QueryError::BeyondWindow);
        }

        let passengers = query.adult_count.saturating_add(query.child_count);
        if passengers == 0 {
            return Err(QueryError::NoPassengers);
        }
        if passengers > MAX_PASSENGERS {
            return Err(QueryError::TooManyPassengers(passengers));
        }

        Ok(query)
    }
}
