//! Integration tests for FerreterIA.
//!
//! The crates under test are synchronous and file- or memory-backed, so
//! these tests need no external services. Each test builds its own store.
//!
//! # Test Categories
//!
//! - `checkout_flow` - full shopper journey from registration to order
//! - `auth_flow` - bootstrap admin, manifest sync, credential migration
//! - `store_persistence` - file backend durability and self-healing

#![cfg_attr(not(test), forbid(unsafe_code))]

use ferreteria_core::Price;
use ferreteria_storefront::Store;
use ferreteria_storefront::models::{NewProduct, RegistrationForm};
use ferreteria_storefront::services::{AuthService, CatalogService};

/// A registration form with sane defaults for the given email.
#[must_use]
pub fn registration(first_names: &str, email: &str) -> RegistrationForm {
    RegistrationForm {
        first_names: first_names.to_owned(),
        last_names: "De Prueba".to_owned(),
        email: email.to_owned(),
        password: "clave-segura".to_owned(),
        confirm_password: "clave-segura".to_owned(),
        accepted_terms: true,
    }
}

/// Seed one product and return its id. Panics on failure; test-only.
#[must_use]
pub fn seed_product(store: &Store, name: &str, pesos: i64, stock: u32) -> ferreteria_core::ProductId {
    CatalogService::new(store)
        .create(NewProduct::new(
            name,
            "Herramientas",
            Price::from_pesos(pesos),
            stock,
        ))
        .expect("seed product")
        .id
}

/// Register a user and panic on failure; test-only.
pub fn register(store: &Store, first_names: &str, email: &str) {
    AuthService::new(store)
        .register(&registration(first_names, email))
        .expect("register user");
}
