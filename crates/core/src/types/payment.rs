//! Payment methods accepted at checkout.

use serde::{Deserialize, Serialize};

/// Payment method chosen on the checkout form.
///
/// Serialized values match the persisted order records
/// (`"efectivo"` / `"transferencia"` / `"tarjeta"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Efectivo,
    /// Bank transfer.
    Transferencia,
    /// Credit or debit card.
    Tarjeta,
}

impl PaymentMethod {
    /// Label shown on confirmation screens and emails.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Efectivo => "Efectivo contra entrega",
            Self::Transferencia => "Transferencia bancaria",
            Self::Tarjeta => "Tarjeta de crédito/débito",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Efectivo => write!(f, "efectivo"),
            Self::Transferencia => write!(f, "transferencia"),
            Self::Tarjeta => write!(f, "tarjeta"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "efectivo" => Ok(Self::Efectivo),
            "transferencia" => Ok(Self::Transferencia),
            "tarjeta" => Ok(Self::Tarjeta),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
