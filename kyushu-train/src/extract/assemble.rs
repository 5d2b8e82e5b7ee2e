//! Journey assembly.
//!
//! Turns every journey block of a results page into a validated
//! [`Journey`]. Blocks are independent: one that cannot be assembled is
//! dropped and recorded, and the rest of the page is still used.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use scraper::Html;
use tracing::{debug, warn};

use super::interpret::{
    DateContext, InterpretError, parse_availability, parse_date, parse_distance, parse_price,
    parse_seat_type, ride_times,
};
use super::markup::{
    RawDirectRide, RawFareRow, RawJourneyBlock, RawRideDetail, RawRideLabel, RawRoute,
    extract_page,
};
use crate::domain::{DomainError, Fare, Journey, Leg, Station, link_legs};

/// Why a journey block was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// A transfer table needs one more station label than train details
    #[error("transfer table has {labels} station labels for {details} trains")]
    LabelCountMismatch { labels: usize, details: usize },

    /// A ride time could not be read
    #[error(transparent)]
    Time(#[from] InterpretError),

    /// The legs or fares broke a journey invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A block that did not become a journey.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedBlock {
    /// Position of the block on the page, counting from zero.
    pub index: usize,
    pub reason: BlockError,
}

/// The outcome of assembling one results page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    journeys: Vec<Journey>,
    dropped: Vec<DroppedBlock>,
}

impl Assembly {
    /// Journeys in page order.
    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    /// Blocks that were skipped, in page order.
    pub fn dropped(&self) -> &[DroppedBlock] {
        &self.dropped
    }

    pub fn into_journeys(self) -> Vec<Journey> {
        self.journeys
    }

    /// Returns the journeys only if no block was dropped; otherwise the
    /// first dropped block.
    pub fn into_strict(self) -> Result<Vec<Journey>, DroppedBlock> {
        match self.dropped.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.journeys),
        }
    }
}

/// Assembles journeys from parsed results pages.
#[derive(Debug, Clone, Copy)]
pub struct JourneyAssembler {
    dates: DateContext,
}

impl JourneyAssembler {
    /// Creates an assembler that reads ride dates against `dates`.
    pub fn new(dates: DateContext) -> Self {
        Self { dates }
    }

    /// Assemble every journey block on the page.
    ///
    /// A page without journey blocks yields an empty assembly.
    pub fn assemble(&self, document: &Html) -> Assembly {
        let page = extract_page(document);
        let mut assembly = Assembly::default();

        for (index, block) in page.blocks.iter().enumerate() {
            match self.assemble_block(block, &page.origin_name, &page.destination_name) {
                Ok(journey) => assembly.journeys.push(journey),
                Err(reason) => {
                    warn!(block = index, error = %reason, "Dropping journey block");
                    assembly.dropped.push(DroppedBlock { index, reason });
                }
            }
        }

        debug!(
            blocks = page.blocks.len(),
            journeys = assembly.journeys.len(),
            dropped = assembly.dropped.len(),
            "Assembled results page"
        );

        assembly
    }

    fn assemble_block(
        &self,
        block: &RawJourneyBlock,
        page_origin: &str,
        page_destination: &str,
    ) -> Result<Journey, BlockError> {
        let date = parse_date(&block.date, &self.dates);
        let distance = parse_distance(&block.distance);

        let legs = match &block.route {
            RawRoute::Transfer { labels, details } => transfer_legs(date, labels, details)?,
            RawRoute::Direct(ride) => vec![direct_leg(date, ride, page_origin, page_destination)?],
        };
        let legs = link_legs(legs)?;
        let fares = block.fare_rows.iter().flat_map(row_fares).collect();

        Ok(Journey::new(distance, legs, fares)?)
    }
}

/// Build one leg per train detail, riding from label `k` to label `k + 1`.
fn transfer_legs(
    date: NaiveDate,
    labels: &[RawRideLabel],
    details: &[RawRideDetail],
) -> Result<Vec<Leg>, BlockError> {
    if labels.len() != details.len() + 1 {
        return Err(BlockError::LabelCountMismatch {
            labels: labels.len(),
            details: details.len(),
        });
    }

    let mut legs = Vec::with_capacity(details.len());
    // Last arrival actually printed on the page; sentinel times never move dates
    let mut previous_arrival: Option<NaiveDateTime> = None;

    for (sequence, (detail, ends)) in details.iter().zip(labels.windows(2)).enumerate() {
        let (from, to) = (&ends[0], &ends[1]);
        let ride_date = previous_arrival.map_or(date, |arrival| arrival.date());
        let (mut departs, mut arrives) =
            ride_times(ride_date, from.departure_text(), to.arrival_text())?;

        // A connection after midnight departs on the following day
        if from.departure.is_some() && previous_arrival.is_some_and(|arrival| departs < arrival) {
            departs += Duration::days(1);
            arrives += Duration::days(1);
        }
        previous_arrival = to.arrival.is_some().then_some(arrives);

        legs.push(Leg::new(
            sequence,
            detail.train_name.as_str(),
            Station::placeholder(from.station_name.as_str()),
            departs,
            Station::placeholder(to.station_name.as_str()),
            arrives,
        ));
    }

    Ok(legs)
}

fn direct_leg(
    date: NaiveDate,
    ride: &RawDirectRide,
    page_origin: &str,
    page_destination: &str,
) -> Result<Leg, BlockError> {
    let (departs, arrives) = ride_times(date, &ride.departure, &ride.arrival)?;
    let origin = ride.origin_name.as_deref().unwrap_or(page_origin);
    let destination = ride.destination_name.as_deref().unwrap_or(page_destination);

    Ok(Leg::new(
        0,
        ride.train_name.as_str(),
        Station::placeholder(origin),
        departs,
        Station::placeholder(destination),
        arrives,
    ))
}

fn row_fares(row: &RawFareRow) -> Vec<Fare> {
    let seat_type = parse_seat_type(&row.seat_label);
    row.marked_cells()
        .map(|(ticket_type, cell)| {
            Fare::new(
                seat_type,
                ticket_type,
                parse_availability(&cell.status),
                parse_price(&cell.price),
            )
        })
        .collect()
}
