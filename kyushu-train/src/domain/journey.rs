//! Journey types.
//!
//! A `Journey` represents a complete trip from origin to destination,
//! made of one or more linked train legs and the fares on offer for it.

use chrono::{Duration, NaiveDateTime};

use super::{DomainError, Fare, Leg, LinkedLegs, Station};

/// Maximum number of legs in one journey.
pub const MAX_LEGS: usize = 6;

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - Between 1 and [`MAX_LEGS`] legs, linked into a continuous path
/// - At least one fare
/// - `arrival_time > departure_time`
/// - `duration` is not shorter than the sum of leg durations
/// - `distance` is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    duration: Duration,
    distance: f64,
    legs: LinkedLegs,
    fares: Vec<Fare>,
}

impl Journey {
    /// Constructs a journey whose bounds are taken from its legs.
    ///
    /// Departure is the first leg's departure and arrival is the last
    /// leg's arrival.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any journey invariant is violated. Nothing is
    /// built in that case.
    pub fn new(distance: f64, legs: LinkedLegs, fares: Vec<Fare>) -> Result<Self, DomainError> {
        let (first, last) = match (legs.first(), legs.last()) {
            (Some(first), Some(last)) => (first.departure_time(), last.arrival_time()),
            _ => return Err(DomainError::EmptyLegs),
        };
        Self::with_bounds(first, last, distance, legs, fares)
    }

    /// Constructs a journey with explicit departure and arrival times.
    pub fn with_bounds(
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
        distance: f64,
        legs: LinkedLegs,
        fares: Vec<Fare>,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyLegs);
        }
        if legs.len() > MAX_LEGS {
            return Err(DomainError::TooManyLegs {
                count: legs.len(),
                max: MAX_LEGS,
            });
        }
        if fares.is_empty() {
            return Err(DomainError::EmptyFares);
        }
        if arrival_time <= departure_time {
            return Err(DomainError::ArrivalNotAfterDeparture);
        }

        let duration = arrival_time.signed_duration_since(departure_time);
        let riding: Duration = legs.iter().map(Leg::duration).sum();
        if duration < riding {
            return Err(DomainError::DurationShorterThanLegs);
        }

        if !distance.is_finite() || distance < 0.0 {
            return Err(DomainError::InvalidDistance(distance));
        }

        Ok(Journey {
            departure_time,
            arrival_time,
            duration,
            distance,
            legs,
            fares,
        })
    }

    /// Returns the departure time.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    /// Returns the arrival time.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// Returns the total trip time, including layovers.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the distance in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the legs in order.
    pub fn legs(&self) -> &LinkedLegs {
        &self.legs
    }

    /// Returns the fares on offer.
    pub fn fares(&self) -> &[Fare] {
        &self.fares
    }

    /// Returns the origin station.
    pub fn origin(&self) -> &Station {
        // Safe: validated non-empty at construction
        self.legs.first().unwrap().departure_station()
    }

    /// Returns the destination station.
    pub fn destination(&self) -> &Station {
        // Safe: validated non-empty at construction
        self.legs.last().unwrap().arrival_station()
    }

    /// Returns the number of changes (legs - 1).
    pub fn transfer_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns true if the journey needs at least one change.
    pub fn is_transfer(&self) -> bool {
        self.transfer_count() > 0
    }

    /// Returns the cheapest fare.
    pub fn cheapest_fare(&self) -> Option<&Fare> {
        self.fares.iter().min_by_key(|f| f.price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, SeatType, Station, TicketType, link_legs};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn leg(
        sequence: usize,
        train: &str,
        from: (&str, &str),
        dep: NaiveDateTime,
        to: (&str, &str),
        arr: NaiveDateTime,
    ) -> Leg {
        Leg::new(
            sequence,
            train,
            Station::new(from.0, from.1).unwrap(),
            dep,
            Station::new(to.0, to.1).unwrap(),
            arr,
        )
    }

    const HAKATA: (&str, &str) = ("博多", "00F00B261279");
    const KOKURA: (&str, &str) = ("小倉", "00F00B261267");
    const OITA: (&str, &str) = ("大分", "00F00B38144B");
    const YUFUIN: (&str, &str) = ("由布院", "00F00B361329");

    fn three_legs() -> LinkedLegs {
        link_legs(vec![
            leg(0, "新幹線こだま８３８号", HAKATA, at(6, 7), KOKURA, at(6, 24)),
            leg(1, "特急にちりん３号", KOKURA, at(6, 39), OITA, at(8, 14)),
            leg(2, "特急ゆふ２号", OITA, at(8, 20), YUFUIN, at(9, 6)),
        ])
        .unwrap()
    }

    fn one_leg() -> LinkedLegs {
        link_legs(vec![leg(
            0,
            "特急ゆふ１号",
            HAKATA,
            at(7, 43),
            YUFUIN,
            at(10, 2),
        )])
        .unwrap()
    }

    fn fares() -> Vec<Fare> {
        vec![Fare::new(
            SeatType::Normal,
            TicketType::ETicket,
            Availability::Available,
            5100,
        )]
    }

    #[test]
    fn journey_with_transfers() {
        let journey = Journey::new(240.9, three_legs(), fares()).unwrap();

        assert_eq!(journey.departure_time(), at(6, 7));
        assert_eq!(journey.arrival_time(), at(9, 6));
        assert_eq!(journey.duration(), Duration::minutes(179));
        assert_eq!(journey.distance(), 240.9);
        assert_eq!(journey.transfer_count(), 2);
        assert!(journey.is_transfer());
        assert_eq!(journey.origin().name(), "博多");
        assert_eq!(journey.destination().name(), "由布院");
        assert_eq!(journey.legs().len(), 3);
        assert_eq!(journey.fares().len(), 1);
    }

    #[test]
    fn journey_direct() {
        let journey = Journey::new(130.0, one_leg(), fares()).unwrap();
        assert_eq!(journey.transfer_count(), 0);
        assert!(!journey.is_transfer());
    }

    #[test]
    fn empty_legs_rejected() {
        let result = Journey::new(240.9, LinkedLegs::default(), fares());
        assert_eq!(result, Err(DomainError::EmptyLegs));

        let result = Journey::with_bounds(
            at(10, 0),
            at(11, 0),
            240.9,
            LinkedLegs::default(),
            fares(),
        );
        assert_eq!(result.unwrap_err().to_string(), "legs must not be empty");
    }

    #[test]
    fn empty_fares_rejected() {
        let result = Journey::new(240.9, three_legs(), vec![]);
        assert_eq!(result.unwrap_err().to_string(), "fares must not be empty");
    }

    #[test]
    fn too_many_legs_rejected() {
        let stations: Vec<String> = (0..8).map(|i| format!("駅{i}")).collect();
        let legs: Vec<Leg> = (0..7)
            .map(|i| {
                Leg::new(
                    i,
                    "普通",
                    Station::placeholder(stations[i].clone()),
                    at(6 + i as u32, 0),
                    Station::placeholder(stations[i + 1].clone()),
                    at(6 + i as u32, 30),
                )
            })
            .collect();
        let result = Journey::new(100.0, link_legs(legs).unwrap(), fares());
        assert_eq!(result, Err(DomainError::TooManyLegs { count: 7, max: 6 }));
    }

    #[test]
    fn arrival_must_follow_departure() {
        let result = Journey::with_bounds(at(10, 0), at(10, 0), 1.0, one_leg(), fares());
        assert_eq!(result, Err(DomainError::ArrivalNotAfterDeparture));

        let zero_length = link_legs(vec![leg(0, "普通", HAKATA, at(9, 0), KOKURA, at(9, 0))]).unwrap();
        let result = Journey::new(1.0, zero_length, fares());
        assert_eq!(result, Err(DomainError::ArrivalNotAfterDeparture));
    }

    #[test]
    fn duration_shorter_than_legs_rejected() {
        // Bounds cover 07:43-08:00 but the only leg rides until 10:02
        let result = Journey::with_bounds(at(7, 43), at(8, 0), 1.0, one_leg(), fares());
        assert_eq!(result, Err(DomainError::DurationShorterThanLegs));
    }

    #[test]
    fn layover_time_allowed() {
        let journey = Journey::new(240.9, three_legs(), fares()).unwrap();
        let riding: Duration = journey.legs().iter().map(Leg::duration).sum();
        assert!(journey.duration() > riding);
    }

    #[test]
    fn negative_distance_rejected() {
        let result = Journey::new(-0.1, one_leg(), fares());
        assert_eq!(result, Err(DomainError::InvalidDistance(-0.1)));
        assert!(Journey::new(f64::NAN, one_leg(), fares()).is_err());
    }

    #[test]
    fn cheapest_fare() {
        let fares = vec![
            Fare::new(SeatType::Specific, TicketType::Normal, Availability::Full, 11190),
            Fare::new(SeatType::Free, TicketType::ETicket, Availability::Some, 8710),
        ];
        let journey = Journey::new(240.9, three_legs(), fares).unwrap();
        assert_eq!(journey.cheapest_fare().unwrap().price(), 8710);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Availability, SeatType, Station, TicketType, link_legs};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    proptest! {
        /// Chains of positive-length rides always construct and satisfy the
        /// temporal invariants
        #[test]
        fn constructed_journeys_hold_invariants(
            rides in proptest::collection::vec((1i64..300, 0i64..120), 1..=6),
        ) {
            let mut clock = NaiveDate::from_ymd_opt(2025, 12, 2)
                .unwrap()
                .and_hms_opt(5, 0, 0)
                .unwrap();
            let legs: Vec<Leg> = rides
                .iter()
                .enumerate()
                .map(|(i, (ride, wait))| {
                    let dep = clock + Duration::minutes(*wait);
                    let arr = dep + Duration::minutes(*ride);
                    clock = arr;
                    Leg::new(
                        i,
                        "train",
                        Station::placeholder(format!("S{i}")),
                        dep,
                        Station::placeholder(format!("S{}", i + 1)),
                        arr,
                    )
                })
                .collect();
            let fares = vec![Fare::new(SeatType::Normal, TicketType::Normal, Availability::Available, 0)];

            let result = Journey::new(10.0, link_legs(legs).unwrap(), fares);
            prop_assert!(result.is_ok(), "construction failed: {:?}", result);
            let journey = result.unwrap();
            prop_assert!(journey.arrival_time() > journey.departure_time());
            let riding: Duration = journey.legs().iter().map(Leg::duration).sum();
            prop_assert!(journey.duration() >= riding);
            prop_assert_eq!(journey.legs().len(), rides.len());
        }
    }
}
