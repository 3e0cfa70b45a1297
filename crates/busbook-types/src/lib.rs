//! Foundation types for busbook.
//!
//! Every seat in the system lives at a fixed coordinate
//! (route, day-group, time slot, seat). This crate owns that index space and
//! the single bound-check gate every other crate goes through.
//!
//! # Key Types
//!
//! - [`Coordinate`] -- raw, caller-supplied (route, day, time, seat) tuple
//! - [`SeatIndex`] -- validated flat offset into the 9600-seat ledger
//! - [`TripIndex`] -- validated (route, day, time) triple, one bus departure
//! - [`SeatRecord`] -- booking state and passenger data for one seat

pub mod coordinate;
pub mod error;
pub mod labels;
pub mod seat;

pub use coordinate::{
    Axis, Coordinate, SeatIndex, TripIndex, MAX_DAYS, MAX_ROUTES, MAX_SEATS, MAX_TIMES,
    SEAT_COUNT,
};
pub use error::TypeError;
pub use labels::{day_name, route_name, time_slot, DAY_NAMES, ROUTE_NAMES, TIME_SLOTS};
pub use seat::SeatRecord;
