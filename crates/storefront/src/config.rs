//! Application configuration from environment variables.
//!
//! Every variable has a sensible default, so a bare `from_env()` works out
//! of the box for local demos. A `.env` file is honored when present.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use ferreteria_core::Email;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but not valid for its purpose.
    #[error("invalid environment variable {name}: {reason}")]
    InvalidEnvVar {
        name: &'static str,
        reason: String,
    },
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the file-backed store writes into.
    pub data_dir: PathBuf,
    /// Optional admin manifest file, merged on login when set.
    pub admin_manifest: Option<PathBuf>,
    /// Company name used in notifications.
    pub company_name: String,
    /// Sender address used in notifications.
    pub company_email: Email,
}

impl StorefrontConfig {
    /// Load configuration from the environment, reading `.env` first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `FERRETERIA_COMPANY_EMAIL`
    /// is set to something that is not an email address.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();

        let data_dir = PathBuf::from(get_env_or_default("FERRETERIA_DATA_DIR", "data"));
        let admin_manifest = get_optional_env("FERRETERIA_ADMIN_MANIFEST").map(PathBuf::from);
        let company_name = get_env_or_default("FERRETERIA_COMPANY_NAME", "FerreterIA");
        let raw_email = get_env_or_default("FERRETERIA_COMPANY_EMAIL", "info@ferreteria.com");
        let company_email =
            Email::parse(&raw_email).map_err(|e| ConfigError::InvalidEnvVar {
                name: "FERRETERIA_COMPANY_EMAIL",
                reason: e.to_string(),
            })?;

        Ok(Self {
            data_dir,
            admin_manifest,
            company_name,
            company_email,
        })
    }
}

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(name: &str, default: &str) -> String {
    get_optional_env(name).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    // One test: the environment is process-global, so the variable
    // juggling must not run concurrently with itself.
    #[test]
    fn test_env_overrides_defaults_and_validation() {
        unsafe {
            env::set_var("FERRETERIA_DATA_DIR", "/tmp/ferreteria-test");
            env::set_var("FERRETERIA_ADMIN_MANIFEST", "/tmp/admins.json");
            env::set_var("FERRETERIA_COMPANY_NAME", "Tornillos SA");
            env::set_var("FERRETERIA_COMPANY_EMAIL", "ventas@tornillos.co");
        }
        let config = StorefrontConfig::from_env().expect("config");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ferreteria-test"));
        assert_eq!(
            config.admin_manifest.as_deref(),
            Some(std::path::Path::new("/tmp/admins.json"))
        );
        assert_eq!(config.company_name, "Tornillos SA");
        assert_eq!(config.company_email.as_str(), "ventas@tornillos.co");

        // Empty values count as unset and fall back to the defaults.
        unsafe {
            env::set_var("FERRETERIA_ADMIN_MANIFEST", "");
            env::set_var("FERRETERIA_COMPANY_NAME", "  ");
            env::set_var("FERRETERIA_COMPANY_EMAIL", "");
        }
        let config = StorefrontConfig::from_env().expect("config");
        assert!(config.admin_manifest.is_none());
        assert_eq!(config.company_name, "FerreterIA");
        assert_eq!(config.company_email.as_str(), "info@ferreteria.com");

        // A set-but-broken company email is a configuration error.
        unsafe {
            env::set_var("FERRETERIA_COMPANY_EMAIL", "not-an-email");
        }
        let err = StorefrontConfig::from_env().expect_err("bad email");
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar {
                name: "FERRETERIA_COMPANY_EMAIL",
                ..
            }
        ));

        unsafe {
            env::remove_var("FERRETERIA_DATA_DIR");
            env::remove_var("FERRETERIA_ADMIN_MANIFEST");
            env::remove_var("FERRETERIA_COMPANY_NAME");
            env::remove_var("FERRETERIA_COMPANY_EMAIL");
        }
    }
}
