//! Key-value persistence layer.
//!
//! All application state lives under a handful of well-known string keys,
//! each holding one JSON document. Every write rewrites the whole document
//! for its key; there are no partial updates and no cross-key transactions.
//! Concurrent writers are last-write-wins.
//!
//! [`Store`] is the typed adapter the services use. Reads are self-healing:
//! a missing or unparseable document logs a warning, resets the key and
//! yields the type's default, so one corrupt entry never takes the store
//! down. Writes are fallible and surface [`StorageError`] to the caller.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Full product catalog, a JSON array of products.
    pub const PRODUCTS: &str = "products";
    /// Monotonic counter backing product id assignment, an integer string.
    pub const PRODUCT_ID_COUNTER: &str = "productIdCounter";
    /// The shared shopping cart, a JSON array of cart items.
    pub const CART: &str = "cart";
    /// Reviews grouped by product id.
    pub const REVIEWS: &str = "reviews";
    /// All registered users.
    pub const USERS: &str = "users";
    /// The active session, or `null` when logged out.
    pub const ACTIVE_SESSION: &str = "activeSession";
    /// Completed orders, append-only.
    pub const ORDERS: &str = "orders";
}

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend is out of space.
    #[error("storage quota exceeded while writing key \"{key}\"")]
    QuotaExceeded {
        /// Key whose write was rejected.
        key: String,
    },

    /// Reading a key failed for a reason other than absence.
    #[error("failed to read key \"{key}\"")]
    Read {
        /// Key that could not be read.
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a key failed.
    #[error("failed to write key \"{key}\"")]
    Write {
        /// Key that could not be written.
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized to JSON.
    #[error("failed to serialize value for key \"{key}\"")]
    Serialize {
        /// Key whose value failed to serialize.
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Backend abstraction over raw string storage.
///
/// Implementations map string keys to string values, nothing more. The
/// typed layer above handles JSON.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the backend fails for a reason
    /// other than the key being absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` when the backend is full,
    /// `StorageError::Write` for other failures.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if removal fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed JSON store over a [`StorageBackend`].
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// An in-memory store, mainly for tests and the demo seeder.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Read and deserialize the document under `key`.
    ///
    /// A missing document yields `T::default()`. A document that no longer
    /// parses is treated as corrupt: it is logged, the key is reset to the
    /// default, and the default is returned. Callers never see a parse
    /// error from data written by an older or broken client.
    pub fn get<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                return T::default();
            }
        };

        match raw {
            None => T::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "corrupt document, resetting key");
                    let fallback = T::default();
                    if let Err(e) = self.put(key, &fallback) {
                        tracing::warn!(key, error = %e, "failed to reset corrupt key");
                    }
                    fallback
                }
            },
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialize` if the value cannot be encoded,
    /// otherwise whatever the backend write reports.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_owned(),
            source,
        })?;
        self.backend.write(key, &raw)
    }

    /// Remove the document under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the backend fails to remove it.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Whether a document exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.read(key), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_yields_default() {
        let store = Store::in_memory();
        let value: Vec<String> = store.get("products");
        assert!(value.is_empty());
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let store = Store::in_memory();
        store
            .put("products", &vec!["a".to_owned(), "b".to_owned()])
            .expect("write");
        let value: Vec<String> = store.get("products");
        assert_eq!(value, vec!["a", "b"]);
    }

    #[test]
    fn test_corrupt_document_resets_to_default() {
        let backend = MemoryBackend::new();
        backend.write("cart", "{not json").expect("raw write");
        let store = Store::new(backend);

        let value: Vec<u32> = store.get("cart");
        assert!(value.is_empty());

        // The key was healed, a raw read now parses.
        let healed: Vec<u32> = store.get("cart");
        assert!(healed.is_empty());
        assert!(store.contains("cart"));
    }

    #[test]
    fn test_remove_clears_key() {
        let store = Store::in_memory();
        store.put("activeSession", &Some(1_u32)).expect("write");
        store.remove("activeSession").expect("remove");
        assert!(!store.contains("activeSession"));
    }
}
