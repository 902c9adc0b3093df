//! Shopping cart service.
//!
//! The cart persists only product references and quantities; prices and
//! names are resolved against the catalog on every read, so catalog edits
//! show up in the cart immediately. Stock is checked against a fresh
//! catalog read at mutation time and again before checkout.

use chrono::Utc;
use thiserror::Error;

use ferreteria_core::{Price, ProductId};

use crate::models::{CartItem, CartLine, StockReport};
use crate::services::catalog::CatalogService;
use crate::storage::{Store, StorageError, keys};

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The referenced product is not in the catalog.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The requested quantity exceeds what remains in stock.
    #[error("insufficient stock for \"{name}\": available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Called after every successful cart mutation with the new item count.
/// UI layers hang badge updates off this.
pub type ChangeHook<'a> = Box<dyn Fn(u32) + Send + Sync + 'a>;

/// Cart service over a [`Store`].
pub struct CartService<'a> {
    store: &'a Store,
    on_change: Option<ChangeHook<'a>>,
}

impl<'a> CartService<'a> {
    /// Create a cart service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            store,
            on_change: None,
        }
    }

    /// Create a cart service that reports item-count changes to `hook`.
    #[must_use]
    pub fn with_change_hook(store: &'a Store, hook: ChangeHook<'a>) -> Self {
        Self {
            store,
            on_change: Some(hook),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of a product, accumulating onto any existing
    /// line. The combined quantity must fit within current stock.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the id is unknown,
    /// `CartError::InsufficientStock` if stock cannot cover the combined
    /// line, `CartError::Storage` if the write fails. On error the cart is
    /// left unchanged.
    pub fn add_item(&self, id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        let product = CatalogService::new(self.store)
            .get_by_id(id)
            .ok_or_else(|| CartError::ProductNotFound(id.clone()))?;

        let mut items = self.items();
        let existing = items
            .iter()
            .find(|i| &i.product_id == id)
            .map_or(0, |i| i.quantity);
        let combined = existing.saturating_add(quantity);
        if combined > product.stock {
            return Err(CartError::InsufficientStock {
                name: product.name,
                available: product.stock.saturating_sub(existing),
                requested: quantity,
            });
        }

        match items.iter_mut().find(|i| &i.product_id == id) {
            Some(line) => line.quantity = combined,
            None => items.push(CartItem {
                product_id: id.clone(),
                quantity,
                added_at: Utc::now(),
            }),
        }

        self.write(&items)?;
        tracing::debug!(id = %id, quantity, "cart item added");
        Ok(())
    }

    /// Remove a line entirely. Returns whether the line existed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the write fails.
    pub fn remove_item(&self, id: &ProductId) -> Result<bool, CartError> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|i| &i.product_id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(&items)?;
        Ok(true)
    }

    /// Set a line's quantity outright. Zero removes the line. Returns
    /// whether a line was updated or removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InsufficientStock` if stock cannot cover the new
    /// quantity, `CartError::ProductNotFound` if the product left the
    /// catalog, `CartError::Storage` if the write fails.
    pub fn set_quantity(&self, id: &ProductId, quantity: u32) -> Result<bool, CartError> {
        if quantity == 0 {
            return self.remove_item(id);
        }

        let mut items = self.items();
        let Some(line) = items.iter_mut().find(|i| &i.product_id == id) else {
            return Ok(false);
        };

        let product = CatalogService::new(self.store)
            .get_by_id(id)
            .ok_or_else(|| CartError::ProductNotFound(id.clone()))?;
        if quantity > product.stock {
            return Err(CartError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested: quantity,
            });
        }

        line.quantity = quantity;
        self.write(&items)?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the write fails.
    pub fn clear(&self) -> Result<(), CartError> {
        self.write(&[])
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Raw persisted cart lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.store.get(keys::CART)
    }

    /// Cart lines joined with current catalog products. Lines whose product
    /// has left the catalog are dropped from the view; they still count in
    /// [`Self::validate_stock`].
    #[must_use]
    pub fn items_with_detail(&self) -> Vec<CartLine> {
        let catalog = CatalogService::new(self.store);
        self.items()
            .into_iter()
            .filter_map(|item| {
                let product = catalog.get_by_id(&item.product_id)?;
                let subtotal = product.price.times(item.quantity);
                Some(CartLine {
                    item,
                    product,
                    subtotal,
                })
            })
            .collect()
    }

    /// Cart total at current catalog prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items_with_detail()
            .into_iter()
            .map(|line| line.subtotal)
            .sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items().iter().map(|i| i.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Check every line against current stock, collecting one message per
    /// problem. Vanished products are reported, not skipped.
    #[must_use]
    pub fn validate_stock(&self) -> StockReport {
        let catalog = CatalogService::new(self.store);
        let mut errors = Vec::new();
        for item in self.items() {
            match catalog.get_by_id(&item.product_id) {
                None => errors.push(format!(
                    "product {} is no longer available",
                    item.product_id
                )),
                Some(product) if product.stock < item.quantity => errors.push(format!(
                    "insufficient stock for \"{}\": available {}, requested {}",
                    product.name, product.stock, item.quantity
                )),
                Some(_) => {}
            }
        }
        StockReport { errors }
    }

    fn write(&self, items: &[CartItem]) -> Result<(), CartError> {
        self.store.put(keys::CART, &items)?;
        if let Some(hook) = &self.on_change {
            hook(items.iter().map(|i| i.quantity).sum());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::models::NewProduct;
    use crate::services::catalog::CatalogService;

    fn seeded_store() -> (Store, ProductId) {
        let store = Store::in_memory();
        let product = CatalogService::new(&store)
            .create(NewProduct::new(
                "Martillo",
                "Herramientas",
                Price::from_pesos(15_000),
                10,
            ))
            .expect("seed product");
        (store, product.id)
    }

    #[test]
    fn test_add_accumulates_onto_existing_line() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);

        cart.add_item(&id, 2).expect("add");
        cart.add_item(&id, 3).expect("add again");

        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), Price::from_pesos(75_000));
    }

    #[test]
    fn test_add_beyond_stock_fails_and_leaves_cart_unchanged() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);
        cart.add_item(&id, 8).expect("add");

        let err = cart.add_item(&id, 3).expect_err("over stock");
        match err {
            CartError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cart.total_quantity(), 8);
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let (store, _) = seeded_store();
        let cart = CartService::new(&store);
        let err = cart
            .add_item(&ProductId::from("999"), 1)
            .expect_err("missing");
        assert!(matches!(err, CartError::ProductNotFound(_)));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);
        cart.add_item(&id, 2).expect("add");

        assert!(cart.set_quantity(&id, 0).expect("set"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_checks_stock() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);
        cart.add_item(&id, 2).expect("add");

        let err = cart.set_quantity(&id, 11).expect_err("over stock");
        assert!(matches!(err, CartError::InsufficientStock { .. }));
        assert_eq!(cart.total_quantity(), 2);

        assert!(cart.set_quantity(&id, 10).expect("exactly stock"));
        assert_eq!(cart.total_quantity(), 10);
    }

    #[test]
    fn test_set_quantity_on_absent_line_is_a_noop() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);
        assert!(!cart.set_quantity(&id, 3).expect("no line"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_detail_drops_vanished_product_but_validation_reports_it() {
        let (store, id) = seeded_store();
        let cart = CartService::new(&store);
        cart.add_item(&id, 2).expect("add");

        CatalogService::new(&store).delete(&id).expect("delete");

        assert!(cart.items_with_detail().is_empty());
        assert_eq!(cart.total(), Price::ZERO);

        let report = cart.validate_stock();
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_change_hook_sees_new_totals() {
        let (store, id) = seeded_store();
        let last_count = AtomicU32::new(0);
        let cart = CartService::with_change_hook(
            &store,
            Box::new(|count| last_count.store(count, Ordering::SeqCst)),
        );

        cart.add_item(&id, 4).expect("add");
        assert_eq!(last_count.load(Ordering::SeqCst), 4);

        cart.remove_item(&id).expect("remove");
        assert_eq!(last_count.load(Ordering::SeqCst), 0);
    }
}
