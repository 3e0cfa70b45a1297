use std::path::PathBuf;

use busbook_store::SyncMode;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Snapshot file used when no path is configured.
pub const DEFAULT_SNAPSHOT_PATH: &str = "bus_booking_details.txt";

/// Startup configuration for a [`BookingLedger`](crate::BookingLedger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Snapshot file. `None` runs the ledger without persistence.
    pub snapshot_path: Option<PathBuf>,
    /// Flush strategy for snapshot writes.
    pub sync: SyncMode,
    /// Extra checks applied when booking.
    pub credentials: CredentialPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            sync: SyncMode::default(),
            credentials: CredentialPolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// A configuration with no snapshot file.
    pub fn volatile() -> Self {
        Self {
            snapshot_path: None,
            ..Default::default()
        }
    }
}

/// Booking-time credential checks.
///
/// Both checks are off by default: a booking is accepted with whatever
/// name, id, and phone the caller supplies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    /// Reject bookings with an empty name, id, or phone.
    pub require_credentials: bool,
    /// Reject a booking whose passenger id already holds a seat on the same
    /// route, day, and time.
    pub reject_duplicate_ids: bool,
}

impl CredentialPolicy {
    /// Both checks enabled.
    pub fn strict() -> Self {
        Self {
            require_credentials: true,
            reject_duplicate_ids: true,
        }
    }

    pub(crate) fn check_present(&self, name: &str, id: &str, phone: &str) -> LedgerResult<()> {
        if !self.require_credentials {
            return Ok(());
        }
        for (field, value) in [("name", name), ("id", id), ("phone", phone)] {
            if value.is_empty() {
                return Err(LedgerError::MissingCredentials { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = LedgerConfig::default();
        assert_eq!(c.snapshot_path, Some(PathBuf::from("bus_booking_details.txt")));
        assert_eq!(c.sync, SyncMode::OsDefault);
        assert!(!c.credentials.require_credentials);
        assert!(!c.credentials.reject_duplicate_ids);
    }

    #[test]
    fn volatile_has_no_path() {
        assert!(LedgerConfig::volatile().snapshot_path.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: LedgerConfig =
            serde_json::from_str(r#"{"credentials": {"require_credentials": true}}"#).unwrap();
        assert!(c.credentials.require_credentials);
        assert!(!c.credentials.reject_duplicate_ids);
        assert_eq!(c.snapshot_path, Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)));
    }

    #[test]
    fn lenient_policy_accepts_blanks() {
        assert!(CredentialPolicy::default().check_present("", "", "").is_ok());
    }

    #[test]
    fn strict_policy_names_first_blank_field() {
        let policy = CredentialPolicy::strict();
        assert_eq!(
            policy.check_present("Anna", "", ""),
            Err(LedgerError::MissingCredentials { field: "id" })
        );
        assert!(policy.check_present("Anna", "ID1", "555").is_ok());
    }
}
