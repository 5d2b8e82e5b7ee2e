//! Leg linking.
//!
//! Legs of one journey are kept in an index-ordered sequence: the leg
//! following `legs[i]` is `legs[i + 1]`. Continuity is checked once, when
//! the sequence is built, so a `LinkedLegs` value is always a valid path.

use std::ops::Deref;

use super::{DomainError, Leg};

/// An ordered sequence of legs in which every adjacent pair connects.
///
/// # Invariants
///
/// - `legs[i + 1].sequence() == legs[i].sequence() + 1`
/// - `legs[i + 1].departure_station() == legs[i].arrival_station()`
///
/// The sequence may be empty; [`Journey`](super::Journey) rejects that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkedLegs(Vec<Leg>);

impl LinkedLegs {
    /// Returns the leg after the one at `index`, if any.
    pub fn next(&self, index: usize) -> Option<&Leg> {
        self.0.get(index + 1)
    }
}

impl Deref for LinkedLegs {
    type Target = [Leg];

    fn deref(&self) -> &[Leg] {
        &self.0
    }
}

/// Link legs into a path, checking every adjacent pair.
///
/// On failure nothing is linked and the error names the first offending
/// pair.
///
/// # Examples
///
/// ```
/// use kyushu_train::domain::{Leg, Station, link_legs};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
/// let at = |h, m| date.and_hms_opt(h, m, 0).unwrap();
///
/// let legs = vec![
///     Leg::new(0, "のぞみ", Station::placeholder("博多"), at(11, 15), Station::placeholder("小倉"), at(11, 30)),
///     Leg::new(1, "ソニック", Station::placeholder("小倉"), at(11, 42), Station::placeholder("大分"), at(13, 1)),
/// ];
/// let linked = link_legs(legs).unwrap();
/// assert_eq!(linked.next(0).unwrap().train_name(), "ソニック");
/// assert!(linked.next(1).is_none());
/// ```
pub fn link_legs(legs: Vec<Leg>) -> Result<LinkedLegs, DomainError> {
    for pair in legs.windows(2) {
        pair[0].check_next(&pair[1])?;
    }
    Ok(LinkedLegs(legs))
}
