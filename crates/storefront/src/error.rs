//! Unified application error.
//!
//! Service errors stay typed at the service boundary; `AppError` is the
//! top-level aggregation front ends and the CLI report through.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::catalog::CatalogError;
use crate::services::checkout::CheckoutError;
use crate::services::reviews::ReviewError;
use crate::storage::StorageError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Review operation failed.
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Message safe to show an end user. Storage internals are collapsed
    /// into one generic line; validation messages pass through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(StorageError::QuotaExceeded { .. })
            | Self::Catalog(CatalogError::Storage(StorageError::QuotaExceeded { .. })) => {
                "No hay espacio de almacenamiento disponible. Libera espacio e intenta de nuevo."
                    .to_owned()
            }
            Self::Storage(_) => {
                "No se pudo guardar la información. Intenta de nuevo.".to_owned()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_errors_get_a_friendly_message() {
        let err = AppError::Storage(StorageError::QuotaExceeded {
            key: "products".to_owned(),
        });
        assert!(err.user_message().contains("espacio"));
    }

    #[test]
    fn test_validation_messages_pass_through() {
        let err = AppError::Catalog(CatalogError::Validation(
            "price must be greater than zero".to_owned(),
        ));
        assert!(err.user_message().contains("price"));
    }
}
