//! Static label tables, indexed by the same integers as [`Coordinate`].
//!
//! [`Coordinate`]: crate::Coordinate

use crate::coordinate::{MAX_DAYS, MAX_ROUTES, MAX_TIMES};

pub const ROUTE_NAMES: [&str; MAX_ROUTES] = [
    "Uttara to NSU",
    "NSU to Uttara",
    "Dhanmondi to NSU",
    "NSU to Dhanmondi",
    "Mirpur to NSU",
    "NSU to Mirpur",
    "Banani to NSU",
    "NSU to Banani",
];

pub const DAY_NAMES: [&str; MAX_DAYS] = ["ST", "MW", "RA"];

pub const TIME_SLOTS: [&str; MAX_TIMES] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

pub fn route_name(index: usize) -> Option<&'static str> {
    ROUTE_NAMES.get(index).copied()
}

pub fn day_name(index: usize) -> Option<&'static str> {
    DAY_NAMES.get(index).copied()
}

pub fn time_slot(index: usize) -> Option<&'static str> {
    TIME_SLOTS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_match_tables() {
        assert_eq!(route_name(0), Some("Uttara to NSU"));
        assert_eq!(route_name(7), Some("NSU to Banani"));
        assert_eq!(day_name(1), Some("MW"));
        assert_eq!(time_slot(9), Some("17:00"));
    }

    #[test]
    fn lookups_past_end_are_none() {
        assert_eq!(route_name(MAX_ROUTES), None);
        assert_eq!(day_name(MAX_DAYS), None);
        assert_eq!(time_slot(MAX_TIMES), None);
    }
}
