//! Session persistence for the Fabula story engine.
//!
//! The session state is persisted as a single opaque blob through the
//! [`StateStore`] seam. [`FileStore`] keeps the blob in a file;
//! [`MemoryStore`] backs tests. Serialization of the state itself is the
//! caller's concern; this crate only moves blobs.

use fabula_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, instrument};

/// File name of the persisted session blob.
pub const SESSION_FILE: &str = "session.json";

/// A single-slot blob store for the persisted session.
pub trait StateStore: Send + Sync {
    /// Read the stored blob, `None` when nothing has been stored.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored blob.
    fn save(&self, blob: &str) -> Result<(), StorageError>;

    /// Remove the stored blob; clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: StateStore + ?Sized> StateStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> Result<(), StorageError> {
        (**self).save(blob)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// File-backed store for the session blob.
///
/// # Examples
///
/// ```no_run
/// use fabula_storage::{FileStore, StateStore};
///
/// let store = FileStore::default_location().unwrap();
/// store.save("{}").unwrap();
/// assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the conventional per-user location.
    pub fn default_location() -> Result<Self, StorageError> {
        let base = dirs::data_dir().ok_or_else(|| {
            StorageError::new(StorageErrorKind::Read(
                "no user data directory available".to_string(),
            ))
        })?;
        Ok(Self::new(base.join("fabula").join(SESSION_FILE)))
    }

    /// The file path this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => {
                debug!(bytes = blob.len(), "Loaded session blob");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session blob stored");
                Ok(None)
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::Read(e.to_string()))),
        }
    }

    #[instrument(skip(self, blob), fields(path = %self.path.display(), bytes = blob.len()))]
    fn save(&self, blob: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::new(StorageErrorKind::Write(e.to_string())))?;
        }
        std::fs::write(&self.path, blob)
            .map_err(|e| StorageError::new(StorageErrorKind::Write(e.to_string())))?;
        debug!("Saved session blob");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared session blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Clear(e.to_string()))),
        }
    }
}

/// In-memory store for tests.
///
/// # Examples
///
/// ```
/// use fabula_storage::{MemoryStore, StateStore};
///
/// let store = MemoryStore::new();
/// assert_eq!(store.load().unwrap(), None);
/// store.save("blob").unwrap();
/// assert_eq!(store.load().unwrap().as_deref(), Some("blob"));
/// store.clear().unwrap();
/// assert_eq!(store.load().unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .blob
            .lock()
            .map_err(|e| StorageError::new(StorageErrorKind::Read(e.to_string())))?
            .clone())
    }

    fn save(&self, blob: &str) -> Result<(), StorageError> {
        *self
            .blob
            .lock()
            .map_err(|e| StorageError::new(StorageErrorKind::Write(e.to_string())))? =
            Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self
            .blob
            .lock()
            .map_err(|e| StorageError::new(StorageErrorKind::Clear(e.to_string())))? = None;
        Ok(())
    }
}
