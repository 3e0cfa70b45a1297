use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::codec::{decode_snapshot, encode_snapshot};
use crate::error::StoreResult;
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;

/// Flush/sync strategy for snapshot writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// `fsync` the new snapshot before it replaces the old one.
    EveryWrite,
    /// Rely on OS page-cache buffering.
    OsDefault,
}

impl Default for SyncMode {
    fn default() -> Self {
        Self::OsDefault
    }
}

/// Snapshot store backed by a single flat file.
///
/// Saves write the full snapshot to a temporary file in the same directory
/// and rename it over the target, so a crash mid-save leaves either the old
/// or the new snapshot, never a mix.
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    sync_mode: SyncMode,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_sync_mode(path, SyncMode::default())
    }

    pub fn with_sync_mode(path: impl Into<PathBuf>, sync_mode: SyncMode) -> Self {
        Self {
            path: path.into(),
            sync_mode,
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> StoreResult<Option<Snapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = decode_snapshot(&text)?;
        debug!(
            path = %self.path.display(),
            records = snapshot.len(),
            skipped = snapshot.skipped,
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(encode_snapshot(snapshot).as_bytes())?;
        tmp.flush()?;
        if matches!(self.sync_mode, SyncMode::EveryWrite) {
            tmp.as_file().sync_all()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), records = snapshot.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::snapshot::SnapshotEntry;
    use busbook_types::Coordinate;

    fn sample() -> Snapshot {
        Snapshot {
            entries: vec![SnapshotEntry {
                seat: Coordinate::new(0, 0, 0, 0).index().unwrap(),
                name: "Anna, B.".into(),
                id: "ID\\1".into(),
                phone: "555-0100".into(),
            }],
            skipped: 0,
        }
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("absent.txt"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("bookings.txt"));
        store.save(&sample()).unwrap();

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk, "0,0,0,0,Anna\\, B.,ID\\\\1,555-0100\n");
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("bookings.txt"));
        store.save(&sample()).unwrap();
        store.save(&Snapshot::default()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert_eq!(store.load().unwrap(), Some(Snapshot::default()));
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("bookings.txt"));
        store.save(&sample()).unwrap();
        store.save(&sample()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("bookings.txt")]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::with_sync_mode(
            dir.path().join("nested/deeper/bookings.txt"),
            SyncMode::EveryWrite,
        );
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.txt");
        fs::write(&path, "0,0,0,0,A,1,2\nnope,0,0,1,B,3,4\n").unwrap();

        let err = FileSnapshotStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { line: 2, .. }));
    }

    #[test]
    fn sync_mode_serializes_snake_case() {
        let json = serde_json::to_string(&SyncMode::EveryWrite).unwrap();
        assert_eq!(json, "\"every_write\"");
    }
}
