//! Admin account manifest.
//!
//! Deployments can ship a JSON file listing admin accounts. It is read on
//! every login attempt and merged into the user store: listed emails are
//! created as admins if absent, or promoted if present. Entries marked
//! inactive are skipped. The manifest being missing or broken only logs a
//! warning; login proceeds against the store as-is.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// One manifest entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestAdmin {
    pub email: String,
    pub password: SecretString,
    #[serde(alias = "activo", default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl ManifestAdmin {
    /// The plaintext password from the manifest file.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Errors loading the manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read admin manifest {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse admin manifest {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loader for the admin manifest file.
#[derive(Debug, Clone)]
pub struct AdminManifest {
    path: PathBuf,
}

impl AdminManifest {
    /// Point at a manifest file. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The manifest file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the manifest, keeping only active entries.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Io` if the file cannot be read,
    /// `ManifestError::Parse` if it is not a JSON array of entries.
    pub fn load(&self) -> Result<Vec<ManifestAdmin>, ManifestError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })?;
        let entries: Vec<ManifestAdmin> =
            serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(entries.into_iter().filter(|e| e.active).collect())
    }
}

/// Derive a first name from an email local part, `carlos.gomez` -> `Carlos`.
#[must_use]
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let base = local.split(['.', '_', '-']).next().unwrap_or(local);
    let mut chars = base.chars();
    chars.next().map_or_else(
        || "Admin".to_owned(),
        |first| first.to_uppercase().collect::<String>() + chars.as_str(),
    )
}
