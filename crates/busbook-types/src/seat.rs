use serde::{Deserialize, Serialize};

/// Booking state and passenger data for one seat.
///
/// An unbooked record always has empty passenger fields; [`SeatRecord::clear`]
/// is the only way back to unbooked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub booked: bool,
    pub passenger_name: String,
    pub passenger_id: String,
    pub passenger_phone: String,
}

impl SeatRecord {
    /// An unbooked seat.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A booked seat holding the given passenger.
    pub fn booked(name: impl Into<String>, id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            booked: true,
            passenger_name: name.into(),
            passenger_id: id.into(),
            passenger_phone: phone.into(),
        }
    }

    /// Reset to unbooked, dropping all passenger data.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Exact match of both halves of the credential pair.
    pub fn credentials_match(&self, id: &str, phone: &str) -> bool {
        self.passenger_id == id && self.passenger_phone == phone
    }
}
