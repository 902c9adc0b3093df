//! User roles.

use serde::{Deserialize, Serialize};

/// Role of a registered user.
///
/// The first account ever registered is promoted to `Admin` (bootstrap rule);
/// later admins come only from the external admin manifest. Serialized values
/// match the persisted store (`"admin"` / `"usuario"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the catalog; cannot shop.
    Admin,
    /// Regular shopper.
    #[default]
    Usuario,
}

impl Role {
    /// Whether this role grants access to the admin panel.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Usuario => write!(f, "usuario"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "usuario" => Ok(Self::Usuario),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
