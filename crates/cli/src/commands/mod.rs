//! CLI command implementations.

pub mod orders;
pub mod products;
pub mod seed;
pub mod stats;

use ferreteria_storefront::storage::FileBackend;
use ferreteria_storefront::{AppError, Store, StorefrontConfig};

/// Open the file-backed store at the configured data directory.
pub fn open_store() -> Result<Store, AppError> {
    let config = StorefrontConfig::from_env()?;
    let backend = FileBackend::open(&config.data_dir).map_err(AppError::Storage)?;
    tracing::debug!(dir = %config.data_dir.display(), "store opened");
    Ok(Store::new(backend))
}
