//! Product review model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferreteria_core::{ProductId, ReviewId};

/// A review left on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "nombreUsuario")]
    pub author: String,
    #[serde(rename = "comentario")]
    pub comment: String,
    /// Stars, 1 to 5.
    #[serde(rename = "calificacion")]
    pub rating: u8,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
}

/// Input for a new review, before validation.
///
/// The rating arrives as a raw integer because form layers hand over
/// whatever the user typed; validation pins it to 1..=5.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub author: String,
    pub comment: String,
    pub rating: i64,
}
