//! Order and checkout form models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferreteria_core::{Email, PaymentMethod, Price, ProductId};

/// A completed order, appended to the order log at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "nombre")]
    pub customer_name: String,
    pub email: Email,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "codigoPostal", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "metodoPago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(rename = "fecha")]
    pub placed_at: DateTime<Utc>,
}

/// One line of an order. Name and unit price are snapshotted so later
/// catalog edits never rewrite order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "nombre")]
    pub product_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio")]
    pub unit_price: Price,
    pub subtotal: Price,
}

/// Raw checkout form input, validated by the checkout service.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}
