use crate::error::StoreResult;
use crate::snapshot::Snapshot;

/// Durable home for ledger snapshots.
///
/// Implementations must satisfy these invariants:
/// - `save` replaces the previous snapshot as a whole. A reader never sees a
///   mix of old and new lines.
/// - `load` returns `Ok(None)` when nothing has been saved yet.
/// - All I/O and decode errors are returned; the caller decides whether to
///   ignore them.
pub trait SnapshotStore: Send + Sync {
    /// Read the most recently saved snapshot.
    fn load(&self) -> StoreResult<Option<Snapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> StoreResult<()>;
}
