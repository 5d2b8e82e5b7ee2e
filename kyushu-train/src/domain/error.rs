//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from HTTP and markup errors.

/// Domain-level errors for journey and leg validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Journey was built without any legs
    #[error("legs must not be empty")]
    EmptyLegs,

    /// Journey has more legs than the site ever returns
    #[error("legs must not be greater than {max} (got {count})")]
    TooManyLegs { count: usize, max: usize },

    /// Journey was built without any fares
    #[error("fares must not be empty")]
    EmptyFares,

    /// Arrival is not strictly after departure
    #[error("arrival time must be after departure time")]
    ArrivalNotAfterDeparture,

    /// Total trip time is shorter than the time spent on trains
    #[error("duration must not be shorter than the sum of leg durations")]
    DurationShorterThanLegs,

    /// Distance is negative or not a number
    #[error("distance must be non-negative (got {0})")]
    InvalidDistance(f64),

    /// A leg was linked to itself
    #[error("leg {0} cannot be linked to itself")]
    SelfLink(usize),

    /// Next leg does not carry the following sequence number
    #[error("next leg sequence must be {expected} (got {found})")]
    NonConsecutiveSequence { expected: usize, found: usize },

    /// Next leg does not depart from where the previous one arrives
    #[error("next leg departs from {departure} but previous leg arrives at {arrival}")]
    StationMismatch { arrival: String, departure: String },
}
