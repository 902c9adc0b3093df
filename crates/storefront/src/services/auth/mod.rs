//! Authentication service.
//!
//! Registration, login, the persisted session and route guards. Passwords
//! are stored as Argon2 hashes; records written before hashing existed
//! carry plaintext and are migrated in place on their next successful
//! login.

mod error;
pub mod manifest;

pub use error::AuthError;
pub use manifest::{AdminManifest, ManifestAdmin, ManifestError};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use ferreteria_core::{Email, Role};

use crate::models::{RegistrationForm, Session, StoredCredential, User};
use crate::storage::{Store, keys};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Where a denied guard sends the visitor.
pub mod redirects {
    /// Unauthenticated visitors go to the login page.
    pub const LOGIN: &str = "Login.html";
    /// Authenticated visitors lacking the role go back to the start page.
    pub const HOME: &str = "Index.html";
    /// Admins landing on shopper pages go to their own panel.
    pub const ADMIN_PANEL: &str = "admin/panel-admin.html";
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access granted for this session.
    Granted(Session),
    /// Access denied; send the visitor to `redirect`.
    Denied {
        redirect: &'static str,
    },
}

impl AccessDecision {
    /// Whether access was granted.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// The granted session, if any.
    #[must_use]
    pub fn session(self) -> Option<Session> {
        match self {
            Self::Granted(session) => Some(session),
            Self::Denied { .. } => None,
        }
    }
}

/// Authentication service over a [`Store`].
pub struct AuthService<'a> {
    store: &'a Store,
    manifest: Option<AdminManifest>,
}

impl<'a> AuthService<'a> {
    /// Create an auth service without an admin manifest.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            store,
            manifest: None,
        }
    }

    /// Create an auth service that syncs the admin manifest on login.
    #[must_use]
    pub const fn with_manifest(store: &'a Store, manifest: AdminManifest) -> Self {
        Self {
            store,
            manifest: Some(manifest),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new user.
    ///
    /// The very first account ever registered becomes an admin; everyone
    /// after that is a regular user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for blank names, mismatched
    /// passwords or unaccepted terms, `AuthError::InvalidEmail` and
    /// `AuthError::WeakPassword` for those fields, and
    /// `AuthError::EmailTaken` if the email is already registered.
    pub fn register(&self, form: &RegistrationForm) -> Result<User, AuthError> {
        let first_names = form.first_names.trim();
        if first_names.is_empty() {
            return Err(AuthError::Validation("first names must not be empty".to_owned()));
        }
        let last_names = form.last_names.trim();
        if last_names.is_empty() {
            return Err(AuthError::Validation("last names must not be empty".to_owned()));
        }
        let email = Email::parse(&form.email)?;
        validate_password(&form.password)?;
        if form.password != form.confirm_password {
            return Err(AuthError::Validation("passwords do not match".to_owned()));
        }
        if !form.accepted_terms {
            return Err(AuthError::Validation(
                "terms and conditions must be accepted".to_owned(),
            ));
        }

        let mut users = self.users();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        // Bootstrap rule: the store's first account administers it.
        let role = if users.is_empty() {
            Role::Admin
        } else {
            Role::Usuario
        };

        let user = User {
            first_names: first_names.to_owned(),
            last_names: last_names.to_owned(),
            email,
            password: StoredCredential::Argon2(hash_password(&form.password)?),
            role,
            registered_at: Utc::now(),
        };
        users.push(user.clone());
        self.store.put(keys::USERS, &users)?;

        tracing::info!(email = %user.email, role = %user.role, "user registered");
        Ok(user)
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Log in and persist the session.
    ///
    /// If a manifest is configured it is merged first, so manifest admins
    /// can log in without ever having registered. A legacy plaintext
    /// credential that matches is upgraded to a hash in the same breath.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or
    /// wrong password, `AuthError::Storage` if persisting the session
    /// fails.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if let Some(manifest) = &self.manifest
            && let Err(e) = self.sync_manifest(manifest)
        {
            tracing::warn!(error = %e, "admin manifest sync failed, continuing");
        }

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let mut users = self.users();
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        let needs_upgrade = match &user.password {
            StoredCredential::Argon2(hash) => {
                verify_password(password, hash)?;
                false
            }
            StoredCredential::Legacy(stored) => {
                if stored != password {
                    return Err(AuthError::InvalidCredentials);
                }
                true
            }
        };

        if needs_upgrade {
            // Upgrade in place; failure to persist must not block login.
            user.password = StoredCredential::Argon2(hash_password(password)?);
            if let Err(e) = self.store.put(keys::USERS, &users) {
                tracing::warn!(email = %email, error = %e, "credential upgrade not persisted");
            } else {
                tracing::info!(email = %email, "legacy credential upgraded");
            }
        }

        self.open_session(&email)
    }

    /// Clear the persisted session. Logging out while logged out is fine.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the write fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(keys::ACTIVE_SESSION)?;
        Ok(())
    }

    /// The persisted session, if someone is logged in.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.store.get(keys::ACTIVE_SESSION)
    }

    // =========================================================================
    // Route Guards
    // =========================================================================

    /// Require a logged-in non-admin. Shopper pages are not for admins;
    /// they get sent to their own panel instead.
    #[must_use]
    pub fn guard_shopper(&self) -> AccessDecision {
        match self.current_session() {
            None => AccessDecision::Denied {
                redirect: redirects::LOGIN,
            },
            Some(session) if session.is_admin() => AccessDecision::Denied {
                redirect: redirects::ADMIN_PANEL,
            },
            Some(session) => AccessDecision::Granted(session),
        }
    }

    /// Require a logged-in admin. Non-admins are sent home, not to login.
    #[must_use]
    pub fn guard_admin(&self) -> AccessDecision {
        match self.current_session() {
            None => AccessDecision::Denied {
                redirect: redirects::LOGIN,
            },
            Some(session) if session.is_admin() => AccessDecision::Granted(session),
            Some(_) => AccessDecision::Denied {
                redirect: redirects::HOME,
            },
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn users(&self) -> Vec<User> {
        self.store.get(keys::USERS)
    }

    fn open_session(&self, email: &Email) -> Result<Session, AuthError> {
        let users = self.users();
        let user = users
            .iter()
            .find(|u| &u.email == email)
            .ok_or(AuthError::InvalidCredentials)?;
        let session = Session {
            display_name: user.display_name().to_owned(),
            email: user.email.clone(),
            role: user.role,
            logged_in_at: Utc::now(),
        };
        self.store.put(keys::ACTIVE_SESSION, &Some(session.clone()))?;
        tracing::info!(email = %session.email, role = %session.role, "session opened");
        Ok(session)
    }

    /// Merge manifest entries into the user store. Listed emails are
    /// created as admins if absent and promoted if present.
    fn sync_manifest(&self, manifest: &AdminManifest) -> Result<(), AuthError> {
        let entries = match manifest.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %manifest.path().display(), error = %e, "admin manifest unavailable");
                return Ok(());
            }
        };

        let mut users = self.users();
        let mut changed = false;
        for entry in entries {
            let Ok(email) = Email::parse(&entry.email) else {
                tracing::warn!(email = %entry.email, "skipping manifest entry with invalid email");
                continue;
            };
            match users.iter_mut().find(|u| u.email == email) {
                Some(user) => {
                    if user.role != Role::Admin {
                        user.role = Role::Admin;
                        changed = true;
                        tracing::info!(email = %email, "user promoted to admin by manifest");
                    }
                }
                None => {
                    users.push(User {
                        first_names: manifest::display_name_from_email(email.as_str()),
                        last_names: "Administrador".to_owned(),
                        email: email.clone(),
                        password: StoredCredential::Argon2(hash_password(entry.password())?),
                        role: Role::Admin,
                        registered_at: Utc::now(),
                    });
                    changed = true;
                    tracing::info!(email = %email, "admin created from manifest");
                }
            }
        }
        if changed {
            self.store.put(keys::USERS, &users)?;
        }
        Ok(())
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Validate password strength requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored Argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
