//! Persisted data models.
//!
//! Field renames pin the JSON wire format to the Spanish names the store
//! has always persisted, so existing data files load unchanged while the
//! Rust side stays in English.

pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::{CartItem, CartLine, StockReport};
pub use order::{CheckoutForm, Order, OrderItem};
pub use product::{CatalogStats, NewProduct, Product, ProductUpdate};
pub use review::{NewReview, Review};
pub use user::{RegistrationForm, Session, StoredCredential, User};
