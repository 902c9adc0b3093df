//! FerreterIA Core - Shared types library.
//!
//! This crate provides common types used across all FerreterIA components:
//! - `storefront` - Catalog, cart, checkout and auth services over the local store
//! - `cli` - Command-line tools for seeding and inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and
//!   stock classification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
