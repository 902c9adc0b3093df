//! File-backed storage backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageError};

/// Backend that keeps one JSON file per key inside a data directory.
///
/// The key becomes the file stem (`products` -> `products.json`). Keys are
/// the fixed constants in [`super::keys`], so no escaping is needed.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The data directory this backend writes to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match std::fs::write(self.path_for(key), value) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::StorageFull => Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
            }),
            Err(source) => Err(StorageError::Write {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
