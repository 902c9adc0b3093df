//! Shopping cart models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferreteria_core::{Price, ProductId};

use super::product::Product;

/// One line of the persisted cart. Only the reference and quantity are
/// stored; product details are resolved against the catalog at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "agregadoEn")]
    pub added_at: DateTime<Utc>,
}

/// A cart line joined with its current catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
    /// Unit price times quantity, at current catalog prices.
    pub subtotal: Price,
}

/// Result of validating the cart against current stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReport {
    /// Problems found, one message per offending line.
    pub errors: Vec<String>,
}

impl StockReport {
    /// Whether every line can be fulfilled.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
