//! Fare types.
//!
//! A `Fare` is one combination of seat class and ticket type offered
//! for a journey, with its price and remaining seat availability.

use std::fmt;

/// Seat class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatType {
    /// グリーン車
    Green,
    /// 指定席
    Specific,
    /// 自由席
    Free,
    /// Anything else (e.g. local trains with a single class)
    Normal,
}

impl SeatType {
    /// Returns the site's label for this seat class.
    pub fn label(&self) -> &'static str {
        match self {
            SeatType::Green => "グリーン車",
            SeatType::Specific => "指定席",
            SeatType::Free => "自由席",
            SeatType::Normal => "普通車",
        }
    }
}

/// Ticket type, one per fare table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    /// 通常のきっぷ
    Normal,
    /// eきっぷ
    ETicket,
    /// 九州ネットきっぷ
    NetTicket,
}

impl TicketType {
    /// Ticket types in fare table column order.
    pub const COLUMNS: [TicketType; 3] = [TicketType::Normal, TicketType::ETicket, TicketType::NetTicket];

    /// Returns the site's label for this ticket type.
    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Normal => "通常のきっぷ",
            TicketType::ETicket => "eきっぷ",
            TicketType::NetTicket => "九州ネットきっぷ",
        }
    }
}

/// Seat availability as shown by the status glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// ○: plenty of seats
    Available,
    /// △: few seats left
    Some,
    /// ×: full, or no availability information
    Full,
}

impl Availability {
    /// Returns the glyph the site uses for this availability.
    pub fn glyph(&self) -> char {
        match self {
            Availability::Available => '○',
            Availability::Some => '△',
            Availability::Full => '×',
        }
    }
}

/// Price and availability for one seat/ticket combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fare {
    seat_type: SeatType,
    ticket_type: TicketType,
    availability: Availability,
    price: u32,
}

impl Fare {
    /// Creates a fare. Price is in yen.
    pub fn new(
        seat_type: SeatType,
        ticket_type: TicketType,
        availability: Availability,
        price: u32,
    ) -> Self {
        Self {
            seat_type,
            ticket_type,
            availability,
            price,
        }
    }

    /// Returns the seat class.
    pub fn seat_type(&self) -> SeatType {
        self.seat_type
    }

    /// Returns the ticket type.
    pub fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// Returns the availability.
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Returns the price in yen.
    pub fn price(&self) -> u32 {
        self.price
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}円",
            self.availability.glyph(),
            self.seat_type.label(),
            self.ticket_type.label(),
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_accessors() {
        let fare = Fare::new(
            SeatType::Specific,
            TicketType::ETicket,
            Availability::Some,
            10300,
        );
        assert_eq!(fare.seat_type(), SeatType::Specific);
        assert_eq!(fare.ticket_type(), TicketType::ETicket);
        assert_eq!(fare.availability(), Availability::Some);
        assert_eq!(fare.price(), 10300);
    }

    #[test]
    fn column_order() {
        assert_eq!(
            TicketType::COLUMNS,
            [TicketType::Normal, TicketType::ETicket, TicketType::NetTicket]
        );
    }

    #[test]
    fn display() {
        let fare = Fare::new(SeatType::Free, TicketType::Normal, Availability::Full, 8710);
        assert_eq!(fare.to_string(), "× [自由席] 通常のきっぷ: 8710円");
    }
}
