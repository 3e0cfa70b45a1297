use std::sync::RwLock;

use crate::codec::{decode_snapshot, encode_snapshot};
use crate::error::{StoreError, StoreResult};
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;

/// In-memory snapshot store for tests and embedding.
///
/// Holds the encoded snapshot text rather than the decoded entries, so loads
/// and saves go through the same codec as the file store.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    text: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    /// Create an empty store (nothing saved yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with snapshot text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }

    /// The currently stored snapshot text, if any.
    pub fn text(&self) -> StoreResult<Option<String>> {
        let text = self.text.read().map_err(|_| StoreError::Poisoned)?;
        Ok(text.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> StoreResult<Option<Snapshot>> {
        let text = self.text.read().map_err(|_| StoreError::Poisoned)?;
        text.as_deref().map(decode_snapshot).transpose()
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let encoded = encode_snapshot(snapshot);
        let mut text = self.text.write().map_err(|_| StoreError::Poisoned)?;
        *text = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotEntry;
    use busbook_types::Coordinate;

    #[test]
    fn empty_store_loads_none() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.text().unwrap().is_none());
    }

    #[test]
    fn save_stores_encoded_text() {
        let store = InMemorySnapshotStore::new();
        let snapshot = Snapshot {
            entries: vec![SnapshotEntry {
                seat: Coordinate::new(1, 2, 3, 4).index().unwrap(),
                name: "Bob\nJr".into(),
                id: "X".into(),
                phone: "1".into(),
            }],
            skipped: 0,
        };
        store.save(&snapshot).unwrap();

        assert_eq!(store.text().unwrap().as_deref(), Some("1,2,3,4,Bob\\nJr,X,1\n"));
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn preloaded_text_is_decoded() {
        let store = InMemorySnapshotStore::with_text("0,0,0,1,A,B,C\nshort\n");
        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.skipped, 1);
    }
}
