//! Storage
//!
//! The store persists its whole state as one snapshot document under a fixed
//! key after every mutation, and rehydrates it once at startup. The medium
//! is pluggable: hosts register a [`SnapshotStorage`] implementation, the
//! store never does I/O on its own. Saves are fire-and-forget; a failed
//! write is logged and the in-memory state stays the source of truth.

use std::{
    collections::HashMap,
    fmt, fs, io,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, orders::Order, products::Product, profile::Profile};

/// Fixed key the store persists its snapshot under.
pub const STORAGE_KEY: &str = "skyshop-state";

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the backing medium.
    #[error("failed to access snapshot storage: {0}")]
    Io(#[from] io::Error),

    /// YAML serialization or parsing error.
    #[error("failed to encode or parse snapshot: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// The persisted subset of the store's state.
///
/// Bonuses are deliberately absent: the bonus catalogue is static seed data
/// and re-supplied on every startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Product catalogue.
    pub products: Vec<Product>,

    /// Shopper profile.
    pub profile: Profile,

    /// Whether the admin panel is unlocked.
    pub admin_authenticated: bool,

    /// Active cart lines.
    pub cart: Cart,

    /// Order history, most recent first.
    pub orders: Vec<Order>,

    /// Active discount percentage, zero when none.
    pub active_discount: Decimal,
}

/// A key-value medium the store persists snapshots to.
///
/// Implementations are registered on the store by the host; the store calls
/// [`SnapshotStorage::save`] after every mutation and
/// [`SnapshotStorage::load`] once during construction.
pub trait SnapshotStorage: fmt::Debug {
    /// Read the snapshot stored under `key`, or `None` when the slot is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be read or the stored
    /// document does not parse.
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StorageError>;

    /// Write `snapshot` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the snapshot cannot be encoded or the
    /// medium cannot be written.
    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// File-backed storage: one YAML document per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at the given directory. The directory is
    /// created lazily on the first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.yaml"))
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StorageError> {
        let contents = match fs::read_to_string(self.path(key)) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_norway::from_str(&contents)?))
    }

    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError> {
        let document = serde_norway::to_string(snapshot)?;

        fs::create_dir_all(&self.root)?;
        fs::write(self.path(key), document)?;

        Ok(())
    }
}

/// In-memory storage holding serialized documents, for tests and hosts
/// without a filesystem.
///
/// Documents are stored in serialized form so the round-trip through the
/// wire format is exercised exactly as with [`FileStorage`]. Clones share
/// the same slots, so a handle kept outside the store observes every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock just means another handle panicked mid-write;
        // the map itself is still usable.
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StorageError> {
        self.lock()
            .get(key)
            .map(|document| Ok(serde_norway::from_str(document)?))
            .transpose()
    }

    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError> {
        let document = serde_norway::to_string(snapshot)?;

        self.lock().insert(key.to_owned(), document);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            products: Vec::new(),
            profile: Profile {
                id: "u1".into(),
                name: "Alex Carter".into(),
                miles: 1250,
            },
            admin_authenticated: false,
            cart: Cart::new(),
            orders: Vec::new(),
            active_discount: Decimal::ZERO,
        }
    }

    #[test]
    fn memory_storage_round_trips_a_snapshot() -> TestResult {
        let mut storage = MemoryStorage::new();
        let original = snapshot();

        storage.save(STORAGE_KEY, &original)?;
        let restored = storage.load(STORAGE_KEY)?;

        assert_eq!(restored, Some(original));

        Ok(())
    }

    #[test]
    fn memory_storage_empty_slot_loads_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.load(STORAGE_KEY)?, None);

        Ok(())
    }

    #[test]
    fn memory_storage_save_replaces_the_slot() -> TestResult {
        let mut storage = MemoryStorage::new();
        let mut snap = snapshot();

        storage.save(STORAGE_KEY, &snap)?;
        snap.profile.miles = 9000;
        storage.save(STORAGE_KEY, &snap)?;

        assert_eq!(storage.len(), 1);
        let restored = storage.load(STORAGE_KEY)?;
        assert_eq!(restored.map(|s| s.profile.miles), Some(9000));

        Ok(())
    }

    #[test]
    fn memory_storage_clones_share_slots() -> TestResult {
        let probe = MemoryStorage::new();
        let mut storage = probe.clone();

        storage.save(STORAGE_KEY, &snapshot())?;

        assert_eq!(probe.len(), 1, "clone observes the save");

        Ok(())
    }

    #[test]
    fn file_storage_round_trips_a_snapshot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path());
        let original = snapshot();

        storage.save(STORAGE_KEY, &original)?;
        let restored = storage.load(STORAGE_KEY)?;

        assert_eq!(restored, Some(original));

        Ok(())
    }

    #[test]
    fn file_storage_missing_file_loads_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.load(STORAGE_KEY)?, None);

        Ok(())
    }

    #[test]
    fn file_storage_garbage_document_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        fs::write(dir.path().join(format!("{STORAGE_KEY}.yaml")), ":\n  - {")?;

        assert!(matches!(
            storage.load(STORAGE_KEY),
            Err(StorageError::Yaml(_))
        ));

        Ok(())
    }
}
