//! Catalog product model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferreteria_core::{Price, ProductId, StockState};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "precio")]
    pub price: Price,
    pub stock: u32,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        rename = "calificacionInicial",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_rating: Option<u8>,
}

impl Product {
    /// Qualitative stock bucket for badges and low-stock reports.
    #[must_use]
    pub const fn stock_state(&self) -> StockState {
        StockState::for_quantity(self.stock)
    }
}

/// Input for creating a product. The id and timestamps are assigned by the
/// catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub description: Option<String>,
    pub image: Option<String>,
    pub initial_rating: Option<u8>,
}

impl NewProduct {
    /// A product with just the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price, stock: u32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock,
            description: None,
            image: None,
            initial_rating: None,
        }
    }
}

/// Partial update for a product. `None` fields are left untouched.
///
/// For `description` and `image`, a provided empty (or whitespace-only)
/// string clears the field.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub initial_rating: Option<u8>,
}

/// Aggregate catalog numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Total number of products.
    pub total: usize,
    /// Products whose stock is in the low bucket.
    pub low_stock: usize,
    /// Number of distinct categories.
    pub categories: usize,
    /// Sum of price times stock over the whole catalog.
    pub inventory_value: Price,
}
