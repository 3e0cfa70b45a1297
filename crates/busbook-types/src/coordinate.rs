use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of bus routes.
pub const MAX_ROUTES: usize = 8;
/// Number of day-groups.
pub const MAX_DAYS: usize = 3;
/// Number of departure time slots per day-group.
pub const MAX_TIMES: usize = 10;
/// Number of seats on every bus.
pub const MAX_SEATS: usize = 40;

/// Total number of seat records in the ledger.
pub const SEAT_COUNT: usize = MAX_ROUTES * MAX_DAYS * MAX_TIMES * MAX_SEATS;

/// One dimension of the seat coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Route,
    Day,
    Time,
    Seat,
}

impl Axis {
    /// Exclusive upper bound of this axis.
    pub const fn bound(self) -> usize {
        match self {
            Self::Route => MAX_ROUTES,
            Self::Day => MAX_DAYS,
            Self::Time => MAX_TIMES,
            Self::Seat => MAX_SEATS,
        }
    }

    fn check(self, value: i64) -> Result<usize, TypeError> {
        let bound = self.bound();
        match usize::try_from(value) {
            Ok(v) if v < bound => Ok(v),
            _ => Err(TypeError::OutOfRange {
                axis: self,
                value,
                bound,
            }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Route => "route",
            Self::Day => "day",
            Self::Time => "time",
            Self::Seat => "seat",
        };
        f.write_str(name)
    }
}

/// A raw (route, day, time, seat) tuple as supplied by a caller.
///
/// Nothing about a `Coordinate` is validated. Turn it into a [`SeatIndex`]
/// before touching any seat state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub route: i64,
    pub day: i64,
    pub time: i64,
    pub seat: i64,
}

impl Coordinate {
    pub const fn new(route: i64, day: i64, time: i64, seat: i64) -> Self {
        Self {
            route,
            day,
            time,
            seat,
        }
    }

    /// Validate against the fixed bounds. Shorthand for [`SeatIndex::new`].
    pub fn index(&self) -> Result<SeatIndex, TypeError> {
        SeatIndex::new(*self)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {} / day {} / time {} / seat {}",
            self.route, self.day, self.time, self.seat
        )
    }
}

/// A validated (route, day, time) triple: one scheduled departure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripIndex {
    route: u8,
    day: u8,
    time: u8,
}

impl TripIndex {
    pub fn new(route: i64, day: i64, time: i64) -> Result<Self, TypeError> {
        Ok(Self {
            route: Axis::Route.check(route)? as u8,
            day: Axis::Day.check(day)? as u8,
            time: Axis::Time.check(time)? as u8,
        })
    }

    pub fn route(&self) -> usize {
        self.route as usize
    }

    pub fn day(&self) -> usize {
        self.day as usize
    }

    pub fn time(&self) -> usize {
        self.time as usize
    }

    /// Index of seat `seat` on this departure.
    pub fn seat(&self, seat: i64) -> Result<SeatIndex, TypeError> {
        let seat = Axis::Seat.check(seat)?;
        Ok(SeatIndex((self.first_offset() + seat) as u16))
    }

    /// All 40 seat indices of this departure, in seat order.
    pub fn seats(&self) -> impl Iterator<Item = SeatIndex> {
        let first = self.first_offset();
        (first..first + MAX_SEATS).map(|offset| SeatIndex(offset as u16))
    }

    fn first_offset(&self) -> usize {
        ((self.route() * MAX_DAYS + self.day()) * MAX_TIMES + self.time()) * MAX_SEATS
    }
}

/// Validated position of one seat in the flat ledger table.
///
/// Offsets run `0..SEAT_COUNT` in (route, day, time, seat) lexicographic
/// order, so sorting indices sorts by coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatIndex(u16);

impl SeatIndex {
    /// The bound-check gate: every coordinate entering the system passes here.
    pub fn new(coordinate: Coordinate) -> Result<Self, TypeError> {
        TripIndex::new(coordinate.route, coordinate.day, coordinate.time)?
            .seat(coordinate.seat)
    }

    /// Rebuild an index from a flat offset.
    pub fn from_offset(offset: usize) -> Option<Self> {
        (offset < SEAT_COUNT).then_some(Self(offset as u16))
    }

    pub fn offset(&self) -> usize {
        self.0 as usize
    }

    /// The departure this seat belongs to.
    pub fn trip(&self) -> TripIndex {
        let trip = self.offset() / MAX_SEATS;
        TripIndex {
            route: (trip / (MAX_DAYS * MAX_TIMES)) as u8,
            day: (trip / MAX_TIMES % MAX_DAYS) as u8,
            time: (trip % MAX_TIMES) as u8,
        }
    }

    /// Zero-based seat number within its bus.
    pub fn seat(&self) -> usize {
        self.offset() % MAX_SEATS
    }

    pub fn coordinate(&self) -> Coordinate {
        let trip = self.trip();
        Coordinate::new(
            trip.route() as i64,
            trip.day() as i64,
            trip.time() as i64,
            self.seat() as i64,
        )
    }

    /// Every index in the ledger, in ascending order.
    pub fn all() -> impl Iterator<Item = SeatIndex> {
        (0..SEAT_COUNT).map(|offset| SeatIndex(offset as u16))
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.coordinate(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seat_count_is_fixed() {
        assert_eq!(SEAT_COUNT, 9600);
        assert_eq!(SeatIndex::all().count(), SEAT_COUNT);
    }

    #[test]
    fn first_and_last_offsets() {
        let first = Coordinate::new(0, 0, 0, 0).index().unwrap();
        let last = Coordinate::new(7, 2, 9, 39).index().unwrap();
        assert_eq!(first.offset(), 0);
        assert_eq!(last.offset(), SEAT_COUNT - 1);
    }

    #[test]
    fn out_of_range_reports_axis() {
        let err = Coordinate::new(8, 0, 0, 0).index().unwrap_err();
        assert_eq!(
            err,
            TypeError::OutOfRange {
                axis: Axis::Route,
                value: 8,
                bound: MAX_ROUTES
            }
        );

        let err = Coordinate::new(0, 0, 0, -1).index().unwrap_err();
        assert!(matches!(err, TypeError::OutOfRange { axis: Axis::Seat, value: -1, .. }));

        assert!(Coordinate::new(0, 3, 0, 0).index().is_err());
        assert!(Coordinate::new(0, 0, 10, 0).index().is_err());
        assert!(Coordinate::new(0, 0, 0, 40).index().is_err());
        assert!(Coordinate::new(i64::MIN, 0, 0, 0).index().is_err());
    }

    #[test]
    fn trip_seats_are_contiguous() {
        let trip = TripIndex::new(3, 1, 4).unwrap();
        let seats: Vec<_> = trip.seats().collect();
        assert_eq!(seats.len(), MAX_SEATS);
        for (n, index) in seats.iter().enumerate() {
            assert_eq!(index.trip(), trip);
            assert_eq!(index.seat(), n);
        }
    }

    #[test]
    fn from_offset_rejects_past_end() {
        assert!(SeatIndex::from_offset(SEAT_COUNT - 1).is_some());
        assert!(SeatIndex::from_offset(SEAT_COUNT).is_none());
    }

    #[test]
    fn display_names_axis() {
        assert_eq!(Axis::Time.to_string(), "time");
        let index = Coordinate::new(1, 2, 3, 4).index().unwrap();
        assert_eq!(index.to_string(), "route 1 / day 2 / time 3 / seat 4");
    }

    proptest! {
        #[test]
        fn valid_coordinates_survive_the_gate(
            r in 0i64..8, d in 0i64..3, t in 0i64..10, s in 0i64..40,
        ) {
            let coordinate = Coordinate::new(r, d, t, s);
            let index = coordinate.index().unwrap();
            prop_assert_eq!(index.coordinate(), coordinate);
        }
    }
}
