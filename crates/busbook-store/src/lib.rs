//! Durable snapshot storage for the busbook seat ledger.
//!
//! The ledger is persisted as a sparse, line-oriented text snapshot: one line
//! per booked seat, unbooked seats omitted.
//!
//! ```text
//! route,day,time,seat,name,id,phone
//! ```
//!
//! Passenger fields are escaped (`\\`, `\,`, `\n`) so a line never contains
//! an unescaped comma inside a field or a literal newline.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FileSnapshotStore`] -- flat file, replaced atomically on every save
//! - [`InMemorySnapshotStore`] -- holds the encoded text, for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every save rewrites the whole snapshot; there is no incremental append.
//! 2. A save either fully replaces the previous file or leaves it untouched.
//! 3. A missing snapshot is not an error: it loads as `None`.
//! 4. Lines with fewer than seven fields are skipped; any other malformed
//!    line fails the whole load.

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use codec::{decode_snapshot, encode_snapshot, escape, split_fields, unescape};
pub use error::{StoreError, StoreResult};
pub use file::{FileSnapshotStore, SyncMode};
pub use memory::InMemorySnapshotStore;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use traits::SnapshotStore;
