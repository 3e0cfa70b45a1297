use busbook_types::{Coordinate, SeatIndex, SeatRecord, DAY_NAMES, ROUTE_NAMES, TIME_SLOTS};

use crate::error::LedgerResult;
use crate::outcome::Durability;

/// The seat ledger contract.
///
/// Every operation that takes a coordinate validates it first and fails with
/// [`LedgerError::InvalidSelection`](crate::LedgerError::InvalidSelection)
/// when any axis is out of bounds. Mutations are atomic with respect to each
/// other: validate-then-mutate for a seat cannot interleave with another
/// caller's mutation.
pub trait SeatLedger: Send + Sync {
    fn route_names(&self) -> &'static [&'static str] {
        &ROUTE_NAMES
    }

    fn day_names(&self) -> &'static [&'static str] {
        &DAY_NAMES
    }

    fn time_slots(&self) -> &'static [&'static str] {
        &TIME_SLOTS
    }

    fn is_booked(&self, coordinate: Coordinate) -> LedgerResult<bool>;

    /// A copy of the seat record. Changing it does not change the ledger.
    fn seat(&self, coordinate: Coordinate) -> LedgerResult<SeatRecord>;

    /// Book a free seat. Fails with `SeatAlreadyBooked` if it is taken.
    fn book_seat(
        &self,
        coordinate: Coordinate,
        name: &str,
        id: &str,
        phone: &str,
    ) -> LedgerResult<Durability>;

    /// Cancel a booking.
    ///
    /// A booked seat requires both `id` and `phone` to match exactly. A free
    /// seat cancels successfully whatever credentials are given.
    fn cancel_seat(&self, coordinate: Coordinate, id: &str, phone: &str)
        -> LedgerResult<Durability>;

    /// Write a full snapshot now.
    fn persist(&self) -> LedgerResult<Durability>;

    /// All 40 seats of one departure, in seat order.
    fn trip_seats(&self, route: i64, day: i64, time: i64) -> LedgerResult<Vec<SeatRecord>>;

    /// Number of free seats on one departure.
    fn available_seats(&self, route: i64, day: i64, time: i64) -> LedgerResult<usize> {
        let seats = self.trip_seats(route, day, time)?;
        Ok(seats.iter().filter(|seat| !seat.booked).count())
    }

    /// Every booked seat, in ascending coordinate order.
    fn bookings(&self) -> LedgerResult<Vec<(SeatIndex, SeatRecord)>>;
}
