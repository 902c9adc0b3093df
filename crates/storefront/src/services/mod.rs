//! Application services.
//!
//! Each service borrows a [`crate::storage::Store`] and implements one
//! slice of the store: catalog, cart, reviews, checkout, auth and the
//! outbound notification seam.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notify;
pub mod reviews;

pub use auth::{AccessDecision, AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, CatalogService, ProductFilter, SearchField, StockFilter};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutService};
pub use notify::{NotificationOutcome, Notifier, SimulatedMailer};
pub use reviews::{RatingDisplay, ReviewError, ReviewService};
