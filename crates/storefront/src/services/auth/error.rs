//! Authentication error types.

use thiserror::Error;

use ferreteria_core::EmailError;

use crate::storage::StorageError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password is wrong. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A non-email registration field failed validation.
    #[error("invalid registration: {0}")]
    Validation(String),

    /// Hashing a password failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
