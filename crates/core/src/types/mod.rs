//! Core types for FerreterIA.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod payment;
pub mod price;
pub mod role;
pub mod stock;

pub use email::{Email, EmailError};
pub use id::*;
pub use payment::PaymentMethod;
pub use price::Price;
pub use role::Role;
pub use stock::StockState;
