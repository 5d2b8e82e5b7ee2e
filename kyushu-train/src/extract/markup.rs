//! Raw token extraction from a route search results page.
//!
//! This layer only walks the document tree and copies text out of it. It
//! never interprets what it copies: dates, times, prices and glyphs are
//! handed on as strings. Missing optional elements become sentinel values
//! so that one sparse block never stops extraction.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::domain::TicketType;

/// Sentinel for a missing time of day.
pub const MISSING_TIME: &str = "00:00";

/// Sentinel for a missing distance label.
pub const MISSING_DISTANCE: &str = "0.0Km";

/// Sentinel for a missing price.
pub const MISSING_PRICE: &str = "0";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

static JOURNEY_BLOCK: Lazy<Selector> = Lazy::new(|| selector("div.timeSummary table.tableContent"));
static PAGE_FROM: Lazy<Selector> = Lazy::new(|| selector(".ticketInfoGrid .fromToBox .from .almB"));
static PAGE_TO: Lazy<Selector> = Lazy::new(|| selector(".ticketInfoGrid .fromToBox .to .almB"));

static RIDE_META: Lazy<Selector> = Lazy::new(|| selector(".rideMeta p"));
static RIDE_INFO_TIME: Lazy<Selector> = Lazy::new(|| selector(".rideInfo .rideTime"));
static RIDE_TIME: Lazy<Selector> = Lazy::new(|| selector(".rideTime"));

static RIDE_TABLE: Lazy<Selector> = Lazy::new(|| selector("div.rideTable"));
static RIDE_LABEL: Lazy<Selector> = Lazy::new(|| selector("div.rideLabel"));
static RIDE_DETAIL: Lazy<Selector> = Lazy::new(|| selector("div.rideDetail"));
static NAME: Lazy<Selector> = Lazy::new(|| selector(".name"));
static DEPARTS: Lazy<Selector> = Lazy::new(|| selector(".dpt"));
static ARRIVES: Lazy<Selector> = Lazy::new(|| selector(".arr"));
static TRAIN_NAME: Lazy<Selector> = Lazy::new(|| selector(".trainName"));

static RIDE_UNIT: Lazy<Selector> = Lazy::new(|| selector(".rideUnit"));
static DIRECT_FROM: Lazy<Selector> = Lazy::new(|| selector(".fromToBox .from"));
static DIRECT_TO: Lazy<Selector> = Lazy::new(|| selector(".fromToBox .to"));
static DIRECT_FROM_NAME: Lazy<Selector> = Lazy::new(|| selector(".fromToBox .from .name"));
static DIRECT_TO_NAME: Lazy<Selector> = Lazy::new(|| selector(".fromToBox .to .name"));

static FARE_ROW: Lazy<Selector> = Lazy::new(|| selector("tbody > tr"));
static SEAT_CELL: Lazy<Selector> = Lazy::new(|| selector("td.icoCell"));
static SEAT_LABEL: Lazy<Selector> = Lazy::new(|| selector(".txt"));
static MARK_CELL: Lazy<Selector> = Lazy::new(|| selector("td.markCell"));
static MARK: Lazy<Selector> = Lazy::new(|| selector("div.mark"));
static STATUS: Lazy<Selector> = Lazy::new(|| selector(".status"));
static PRICE: Lazy<Selector> = Lazy::new(|| selector(".price"));

/// Everything copied out of one results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPage {
    /// Page-level origin name; empty if absent.
    pub origin_name: String,
    /// Page-level destination name; empty if absent.
    pub destination_name: String,
    /// Journey blocks in document order.
    pub blocks: Vec<RawJourneyBlock>,
}

/// Raw fragments of one candidate journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJourneyBlock {
    /// Text holding the ride date (e.g. "乗車日：12月2日(火)"); empty if absent.
    pub date: String,
    /// Text holding the distance (e.g. "距離：240.9Km").
    pub distance: String,
    pub route: RawRoute,
    pub fare_rows: Vec<RawFareRow>,
}

/// The ride part of a block: either a transfer table or a single ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRoute {
    /// Journey with changes. Labels mark the stations between rides, so a
    /// well-formed table has one more label than details.
    Transfer {
        labels: Vec<RawRideLabel>,
        details: Vec<RawRideDetail>,
    },
    /// Journey on one train.
    Direct(RawDirectRide),
}

/// A station boundary in a transfer table.
///
/// Times stay optional so the assembler can tell a missing time from a
/// printed `00:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRideLabel {
    pub station_name: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

impl RawRideLabel {
    /// Departure text, or [`MISSING_TIME`] when the label has none.
    pub fn departure_text(&self) -> &str {
        self.departure.as_deref().unwrap_or(MISSING_TIME)
    }

    /// Arrival text, or [`MISSING_TIME`] when the label has none.
    pub fn arrival_text(&self) -> &str {
        self.arrival.as_deref().unwrap_or(MISSING_TIME)
    }
}

/// One ride in a transfer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRideDetail {
    pub train_name: String,
}

/// The single ride of a direct journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDirectRide {
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    /// Leg-local names, when the block carries them.
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
}

/// One seat class row of the fare table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFareRow {
    pub seat_label: String,
    /// Cells in [`TicketType::COLUMNS`] order; `None` where the column has
    /// no fare mark.
    pub cells: [Option<RawFareCell>; 3],
}

impl RawFareRow {
    /// Returns the cells that carry a fare, paired with their ticket type.
    pub fn marked_cells(&self) -> impl Iterator<Item = (TicketType, &RawFareCell)> {
        TicketType::COLUMNS
            .into_iter()
            .zip(self.cells.iter())
            .filter_map(|(ticket, cell)| cell.as_ref().map(|c| (ticket, c)))
    }
}

/// Status glyph and price text of one fare cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFareCell {
    pub status: String,
    pub price: String,
}

/// Extract every journey block from a results page.
///
/// A document without journey blocks yields an empty block list.
pub fn extract_page(document: &Html) -> ResultsPage {
    let root = document.root_element();

    ResultsPage {
        origin_name: first_text(root, &PAGE_FROM).unwrap_or_default(),
        destination_name: first_text(root, &PAGE_TO).unwrap_or_default(),
        blocks: document.select(&JOURNEY_BLOCK).map(extract_block).collect(),
    }
}

fn extract_block(table: ElementRef<'_>) -> RawJourneyBlock {
    let date = first_text(table, &RIDE_META)
        .or_else(|| first_text_containing(table, &RIDE_INFO_TIME, "乗車日"))
        .unwrap_or_default();

    let distance = first_text_containing(table, &RIDE_TIME, "距離")
        .unwrap_or_else(|| MISSING_DISTANCE.to_string());

    let route = match table.select(&RIDE_TABLE).next() {
        Some(ride_table) => extract_transfer(ride_table),
        None => RawRoute::Direct(extract_direct(table)),
    };

    RawJourneyBlock {
        date,
        distance,
        route,
        fare_rows: table.select(&FARE_ROW).filter_map(extract_fare_row).collect(),
    }
}

fn extract_transfer(ride_table: ElementRef<'_>) -> RawRoute {
    let labels = ride_table
        .select(&RIDE_LABEL)
        .map(|label| RawRideLabel {
            station_name: first_text(label, &NAME).unwrap_or_default(),
            departure: first_text(label, &DEPARTS).filter(|s| !s.is_empty()),
            arrival: first_text(label, &ARRIVES).filter(|s| !s.is_empty()),
        })
        .collect();

    let details = ride_table
        .select(&RIDE_DETAIL)
        .map(|detail| RawRideDetail {
            train_name: first_text(detail, &TRAIN_NAME).unwrap_or_default(),
        })
        .collect();

    RawRoute::Transfer { labels, details }
}

fn extract_direct(table: ElementRef<'_>) -> RawDirectRide {
    RawDirectRide {
        train_name: first_text(table, &RIDE_UNIT).unwrap_or_default(),
        departure: first_text(table, &DIRECT_FROM).unwrap_or_else(|| MISSING_TIME.to_string()),
        arrival: first_text(table, &DIRECT_TO).unwrap_or_else(|| MISSING_TIME.to_string()),
        origin_name: first_text(table, &DIRECT_FROM_NAME).filter(|s| !s.is_empty()),
        destination_name: first_text(table, &DIRECT_TO_NAME).filter(|s| !s.is_empty()),
    }
}

fn extract_fare_row(row: ElementRef<'_>) -> Option<RawFareRow> {
    let seat_cell = row.select(&SEAT_CELL).next()?;
    let seat_label = first_text(seat_cell, &SEAT_LABEL).unwrap_or_default();

    let mut cells: [Option<RawFareCell>; 3] = Default::default();
    for (slot, cell) in cells.iter_mut().zip(row.select(&MARK_CELL)) {
        *slot = cell.select(&MARK).next().map(|mark| RawFareCell {
            status: first_text(mark, &STATUS).unwrap_or_default(),
            price: first_text(mark, &PRICE).unwrap_or_else(|| MISSING_PRICE.to_string()),
        });
    }

    Some(RawFareRow { seat_label, cells })
}

/// Text of an element with runs of whitespace collapsed to one space.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn first_text_containing(scope: ElementRef<'_>, selector: &Selector, needle: &str) -> Option<String> {
    scope
        .select(selector)
        .map(element_text)
        .find(|text| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> ResultsPage {
        extract_page(&Html::parse_document(&format!(
            "<html><body>{body}</body></html>"
        )))
    }

    fn block(cells: &str) -> String {
        format!(
            r#"<div class="timeSummary"><table class="tableContent"><tbody>{cells}</tbody></table></div>"#
        )
    }

    #[test]
    fn empty_document_has_no_blocks() {
        let page = page("<p>nothing here</p>");
        assert!(page.blocks.is_empty());
        assert_eq!(page.origin_name, "");
        assert_eq!(page.destination_name, "");
    }

    #[test]
    fn table_outside_summary_is_ignored() {
        let page = page(r#"<table class="tableContent"><tbody><tr><td>x</td></tr></tbody></table>"#);
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn page_level_endpoints() {
        let page = page(
            r#"<div class="ticketInfoGrid"><div class="fromToBox">
                 <div class="from"><span class="almB"> 博多 </span></div>
                 <div class="to"><span class="almB">由布院</span></div>
               </div></div>"#,
        );
        assert_eq!(page.origin_name, "博多");
        assert_eq!(page.destination_name, "由布院");
    }

    #[test]
    fn sparse_direct_block_uses_sentinels() {
        let page = page(&block("<tr><td>empty</td></tr>"));
        assert_eq!(page.blocks.len(), 1);

        let block = &page.blocks[0];
        assert_eq!(block.date, "");
        assert_eq!(block.distance, MISSING_DISTANCE);
        assert!(block.fare_rows.is_empty());
        assert_eq!(
            block.route,
            RawRoute::Direct(RawDirectRide {
                train_name: String::new(),
                departure: MISSING_TIME.to_string(),
                arrival: MISSING_TIME.to_string(),
                origin_name: None,
                destination_name: None,
            })
        );
    }

    #[test]
    fn date_prefers_ride_meta() {
        let page = page(&block(
            r#"<tr><td>
                 <div class="rideInfo"><p class="rideTime">乗車日：12月3日</p></div>
                 <div class="rideMeta"><p>12月2日(火)</p><p>ignored</p></div>
               </td></tr>"#,
        ));
        assert_eq!(page.blocks[0].date, "12月2日(火)");
    }

    #[test]
    fn date_falls_back_to_ride_info() {
        let page = page(&block(
            r#"<tr><td><div class="rideInfo">
                 <p class="rideTime">距離：240.9Km</p>
                 <p class="rideTime">乗車日：12月3日(水)</p>
               </div></td></tr>"#,
        ));
        assert_eq!(page.blocks[0].date, "乗車日：12月3日(水)");
        assert_eq!(page.blocks[0].distance, "距離：240.9Km");
    }

    #[test]
    fn transfer_table_labels_and_details() {
        let page = page(&block(
            r#"<tr><td><div class="rideTable">
                 <div class="rideLabel"><span class="name">博多</span><span class="dpt">11:15</span></div>
                 <div class="rideDetail"><span class="trainName">新幹線のぞみ２４号</span></div>
                 <div class="rideLabel"><span class="arr">11:30</span><span class="name">小倉</span><span class="dpt">11:42</span></div>
                 <div class="rideDetail"><span class="trainName">特急ソニック１７号</span></div>
                 <div class="rideLabel"><span class="arr">13:01</span><span class="name">大分</span></div>
               </div></td></tr>"#,
        ));

        let RawRoute::Transfer { labels, details } = &page.blocks[0].route else {
            panic!("expected a transfer route");
        };
        assert_eq!(labels.len(), 3);
        assert_eq!(details.len(), 2);
        assert_eq!(labels[0].station_name, "博多");
        assert_eq!(labels[0].departure.as_deref(), Some("11:15"));
        assert_eq!(labels[0].arrival, None);
        assert_eq!(labels[0].arrival_text(), MISSING_TIME);
        assert_eq!(labels[1].arrival_text(), "11:30");
        assert_eq!(labels[1].departure_text(), "11:42");
        assert_eq!(labels[2].departure, None);
        assert_eq!(labels[2].departure_text(), MISSING_TIME);
        assert_eq!(details[1].train_name, "特急ソニック１７号");
    }

    #[test]
    fn direct_block_with_local_names() {
        let page = page(&block(
            r#"<tr><td>
                 <div class="fromToBox">
                   <div class="from"><span class="name">博多</span> 07:43</div>
                   <div class="to"><span class="name">由布院</span> 10:02</div>
                 </div>
                 <div class="rideUnit">特急ゆふ１号</div>
               </td></tr>"#,
        ));
        let RawRoute::Direct(ride) = &page.blocks[0].route else {
            panic!("expected a direct route");
        };
        assert_eq!(ride.train_name, "特急ゆふ１号");
        assert_eq!(ride.departure, "博多 07:43");
        assert_eq!(ride.arrival, "由布院 10:02");
        assert_eq!(ride.origin_name.as_deref(), Some("博多"));
        assert_eq!(ride.destination_name.as_deref(), Some("由布院"));
    }

    #[test]
    fn fare_cells_follow_column_order() {
        let page = page(&block(
            r#"<tr>
                 <td class="icoCell"><span class="txt">指定席</span></td>
                 <td class="markCell"><div class="mark"><span class="status">×</span><span class="price">11,190円</span></div></td>
                 <td class="markCell"></td>
                 <td class="markCell"><div class="mark"><span class="status">○</span></div></td>
                 <td class="markCell"><div class="mark"><span class="status">○</span><span class="price">1円</span></div></td>
               </tr>
               <tr><td>no seat cell</td><td class="markCell"><div class="mark">x</div></td></tr>"#,
        ));

        let rows = &page.blocks[0].fare_rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seat_label, "指定席");
        assert_eq!(
            rows[0].cells[0],
            Some(RawFareCell {
                status: "×".into(),
                price: "11,190円".into()
            })
        );
        assert_eq!(rows[0].cells[1], None);
        assert_eq!(
            rows[0].cells[2],
            Some(RawFareCell {
                status: "○".into(),
                price: MISSING_PRICE.into()
            })
        );

        let marked: Vec<_> = rows[0].marked_cells().map(|(t, _)| t).collect();
        assert_eq!(marked, vec![TicketType::Normal, TicketType::NetTicket]);
    }

    #[test]
    fn blocks_keep_document_order() {
        let body = format!(
            "{}{}",
            block(r#"<tr><td><div class="rideMeta"><p>12月1日</p></div></td></tr>"#),
            block(r#"<tr><td><div class="rideMeta"><p>12月2日</p></div></td></tr>"#),
        );
        let page = page(&body);
        let dates: Vec<_> = page.blocks.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["12月1日", "12月2日"]);
    }
}
