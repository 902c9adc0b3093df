//! User, credential and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferreteria_core::{Email, Role};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    pub email: Email,
    pub password: StoredCredential,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "fechaRegistro")]
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the header greeting. Falls back to a generic label
    /// when the first name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.first_names.trim();
        if trimmed.is_empty() { "Usuario" } else { trimmed }
    }
}

/// A stored password credential.
///
/// Persisted as a bare string for compatibility with records written
/// before hashing existed. Anything carrying an Argon2 prefix is a hash;
/// everything else is a legacy plaintext password, migrated in place on
/// the owner's next successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoredCredential {
    /// PHC-format Argon2 hash.
    Argon2(String),
    /// Plaintext left behind by the pre-hashing store format.
    Legacy(String),
}

impl From<String> for StoredCredential {
    fn from(raw: String) -> Self {
        if raw.starts_with("$argon2") {
            Self::Argon2(raw)
        } else {
            Self::Legacy(raw)
        }
    }
}

impl From<StoredCredential> for String {
    fn from(credential: StoredCredential) -> Self {
        match credential {
            StoredCredential::Argon2(s) | StoredCredential::Legacy(s) => s,
        }
    }
}

/// The active session, persisted under its own key. `None` means logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "usuario")]
    pub display_name: String,
    pub email: Email,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "fechaLogin")]
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session may enter the admin panel.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Raw registration form input, validated by the auth service.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}
