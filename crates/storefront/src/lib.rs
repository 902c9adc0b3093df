//! FerreterIA storefront services.
//!
//! Everything the hardware store does at runtime lives here: the catalog,
//! the shopping cart, reviews, checkout and authentication. State persists
//! through a small key-value [`storage::Store`] so the whole stack runs
//! without a database server.
//!
//! Services are plain structs borrowing a [`storage::Store`]; construct them
//! where needed, they hold no state of their own.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::AppError;
pub use storage::Store;
