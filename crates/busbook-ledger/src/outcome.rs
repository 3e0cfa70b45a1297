use serde::{Deserialize, Serialize};

/// What happened to the durable snapshot after a mutation or flush.
///
/// A mutation that returns `Ok` has been applied in memory regardless of
/// the variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Durability {
    /// The full snapshot was written.
    Persisted { records: usize },
    /// The write failed; the in-memory state is ahead of the snapshot.
    Failed { reason: String },
    /// The ledger has no snapshot store.
    Volatile,
}

impl Durability {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// How the startup load went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// A snapshot was read and applied.
    Loaded { records: usize, skipped: usize },
    /// The store had nothing saved yet.
    NoSnapshot,
    /// The snapshot could not be read or decoded; the ledger started empty.
    Failed { reason: String },
    /// The ledger has no snapshot store.
    Volatile,
}
