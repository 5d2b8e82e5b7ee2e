//! Train leg type.
//!
//! A `Leg` represents one ride on a single train, from boarding to
//! alighting. Legs of a journey are ordered by `sequence`; see
//! [`LinkedLegs`](super::LinkedLegs) for how consecutive legs are chained.

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, Station};

/// A leg of a journey (one train).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    sequence: usize,
    train_name: String,
    departure_station: Station,
    departure_time: NaiveDateTime,
    arrival_station: Station,
    arrival_time: NaiveDateTime,
}

impl Leg {
    /// Creates a leg.
    ///
    /// # Examples
    ///
    /// ```
    /// use kyushu_train::domain::{Leg, Station};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
    /// let leg = Leg::new(
    ///     0,
    ///     "新幹線のぞみ２４号",
    ///     Station::placeholder("博多"),
    ///     date.and_hms_opt(11, 15, 0).unwrap(),
    ///     Station::placeholder("小倉"),
    ///     date.and_hms_opt(11, 30, 0).unwrap(),
    /// );
    /// assert_eq!(leg.duration().num_minutes(), 15);
    /// ```
    pub fn new(
        sequence: usize,
        train_name: impl Into<String>,
        departure_station: Station,
        departure_time: NaiveDateTime,
        arrival_station: Station,
        arrival_time: NaiveDateTime,
    ) -> Self {
        Self {
            sequence,
            train_name: train_name.into(),
            departure_station,
            departure_time,
            arrival_station,
            arrival_time,
        }
    }

    /// Returns the position of this leg within its journey.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Returns the train name (e.g. "特急ゆふ４号").
    pub fn train_name(&self) -> &str {
        &self.train_name
    }

    /// Returns the boarding station.
    pub fn departure_station(&self) -> &Station {
        &self.departure_station
    }

    /// Returns the departure time.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    /// Returns the alighting station.
    pub fn arrival_station(&self) -> &Station {
        &self.arrival_station
    }

    /// Returns the arrival time.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// Returns the time spent on the train.
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }

    /// Checks that `next` may directly follow this leg.
    ///
    /// `next` must be a different leg, carry the following sequence number,
    /// and depart from the station this leg arrives at.
    pub fn check_next(&self, next: &Leg) -> Result<(), DomainError> {
        if std::ptr::eq(self, next) {
            return Err(DomainError::SelfLink(self.sequence));
        }
        let expected = self.sequence + 1;
        if next.sequence != expected {
            return Err(DomainError::NonConsecutiveSequence {
                expected,
                found: next.sequence,
            });
        }
        if next.departure_station != self.arrival_station {
            return Err(DomainError::StationMismatch {
                arrival: self.arrival_station.to_string(),
                departure: next.departure_station.to_string(),
            });
        }
        Ok(())
    }
}
