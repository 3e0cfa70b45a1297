//! Seat ledger for busbook.
//!
//! This crate is the single source of truth for seat state. It provides:
//! - The [`SeatLedger`] trait: the query/mutate contract every ledger backend
//!   satisfies and every caller programs against
//! - [`BookingLedger`]: the 9600-seat in-memory table, persisted through any
//!   [`SnapshotStore`](busbook_store::SnapshotStore) after every mutation
//! - [`LedgerConfig`] / [`CredentialPolicy`]: startup configuration
//! - Explicit persistence results ([`Durability`], [`LoadStatus`]) so the
//!   caller, not the ledger, decides what a failed write means

pub mod config;
pub mod error;
pub mod ledger;
pub mod outcome;
pub mod traits;

pub use config::{CredentialPolicy, LedgerConfig, DEFAULT_SNAPSHOT_PATH};
pub use error::{LedgerError, LedgerResult};
pub use ledger::BookingLedger;
pub use outcome::{Durability, LoadStatus};
pub use traits::SeatLedger;
