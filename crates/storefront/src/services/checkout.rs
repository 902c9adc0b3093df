//! Checkout service.
//!
//! Finalizing runs three phases: validate the cart against fresh stock,
//! validate the form, then commit. The commit appends the order, decrements
//! all stock in a single catalog write and clears the cart. Notification is
//! last and never fails the sale.

use chrono::Utc;
use thiserror::Error;

use ferreteria_core::Email;

use crate::models::{CheckoutForm, Order, OrderItem};
use crate::services::cart::CartService;
use crate::services::catalog::{CatalogError, CatalogService};
use crate::services::notify::{NotificationOutcome, Notifier};
use crate::storage::{Store, StorageError, keys};

/// Phone digit count bounds (after stripping the optional `+` and spaces).
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Errors from finalizing a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more cart lines no longer fit current stock.
    #[error("stock validation failed: {}", .0.join("; "))]
    Stock(Vec<String>),

    /// The checkout form has invalid fields.
    #[error("form validation failed: {}", .0.join("; "))]
    Form(Vec<String>),

    /// Committing the stock decrement failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A completed checkout: the recorded order plus the notification outcome.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub notification: NotificationOutcome,
}

/// Checkout service over a [`Store`] and an outbound [`Notifier`].
pub struct CheckoutService<'a, N: Notifier> {
    store: &'a Store,
    notifier: &'a N,
}

impl<'a, N: Notifier> CheckoutService<'a, N> {
    /// Create a checkout service.
    #[must_use]
    pub const fn new(store: &'a Store, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    /// Finalize the current cart into an order.
    ///
    /// On any error before the commit phase, nothing has been written: the
    /// cart, catalog and order log are exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart`, `CheckoutError::Stock` or
    /// `CheckoutError::Form` from the validation phases, and
    /// `CheckoutError::Catalog` / `CheckoutError::Storage` if a commit
    /// write fails.
    pub fn finalize(&self, form: &CheckoutForm) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = CartService::new(self.store);
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let report = cart.validate_stock();
        if !report.is_valid() {
            return Err(CheckoutError::Stock(report.errors));
        }

        let errors = validate_form(form);
        if !errors.is_empty() {
            return Err(CheckoutError::Form(errors));
        }
        // validate_form guarantees both parse.
        let email = Email::parse(&form.email).map_err(|e| CheckoutError::Form(vec![e.to_string()]))?;
        let payment_method = form
            .payment_method
            .ok_or_else(|| CheckoutError::Form(vec!["payment method is required".to_owned()]))?;

        let lines = cart.items_with_detail();
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id.clone(),
                product_name: line.product.name.clone(),
                quantity: line.item.quantity,
                unit_price: line.product.price,
                subtotal: line.subtotal,
            })
            .collect();
        let total = items.iter().map(|i| i.subtotal).sum();

        let order = Order {
            customer_name: form.full_name.trim().to_owned(),
            email,
            phone: form.phone.trim().to_owned(),
            address: form.address.trim().to_owned(),
            city: form.city.trim().to_owned(),
            postal_code: form
                .postal_code
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned),
            payment_method,
            notes: form
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            items,
            total,
            placed_at: Utc::now(),
        };

        // Commit phase. Order first, then stock, then the cart.
        let mut orders: Vec<Order> = self.store.get(keys::ORDERS);
        orders.push(order.clone());
        self.store.put(keys::ORDERS, &orders)?;

        let decrements: Vec<_> = order
            .items
            .iter()
            .map(|i| (i.product_id.clone(), i.quantity))
            .collect();
        CatalogService::new(self.store).commit_stock_decrements(&decrements)?;

        cart.clear().map_err(|e| match e {
            crate::services::cart::CartError::Storage(s) => CheckoutError::Storage(s),
            other => CheckoutError::Form(vec![other.to_string()]),
        })?;

        tracing::info!(
            customer = %order.email,
            total = %order.total,
            lines = order.items.len(),
            "order placed"
        );
        let notification = self.notifier.send_order_confirmation(&order);

        Ok(CheckoutReceipt {
            order,
            notification,
        })
    }

    /// All recorded orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.store.get(keys::ORDERS)
    }
}

/// Validate the checkout form, returning every problem found.
#[must_use]
pub fn validate_form(form: &CheckoutForm) -> Vec<String> {
    let mut errors = Vec::new();

    let name_len = form.full_name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        errors.push("full name must be 2 to 100 characters".to_owned());
    }

    if Email::parse(&form.email).is_err() {
        errors.push("email address is invalid".to_owned());
    }

    let phone = form.phone.trim();
    let digits = phone
        .strip_prefix('+')
        .unwrap_or(phone)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<Vec<_>>();
    if digits.is_empty() || !digits.iter().all(char::is_ascii_digit) {
        errors.push("phone number is required and must contain only digits".to_owned());
    } else if !PHONE_DIGITS.contains(&digits.len()) {
        errors.push("phone number must have 7 to 15 digits".to_owned());
    }

    let address_len = form.address.trim().chars().count();
    if !(5..=200).contains(&address_len) {
        errors.push("address must be 5 to 200 characters".to_owned());
    }

    let city_len = form.city.trim().chars().count();
    if !(2..=100).contains(&city_len) {
        errors.push("city must be 2 to 100 characters".to_owned());
    }

    if form.payment_method.is_none() {
        errors.push("payment method is required".to_owned());
    }

    if let Some(notes) = &form.notes
        && notes.trim().chars().count() > 500
    {
        errors.push("notes must be at most 500 characters".to_owned());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    use ferreteria_core::{PaymentMethod, Price, ProductId};

    use crate::models::NewProduct;
    use crate::services::notify::SimulatedMailer;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Juan Pérez".to_owned(),
            email: "juan@example.com".to_owned(),
            phone: "+57 300 1234567".to_owned(),
            address: "Calle 10 # 5-23".to_owned(),
            city: "Bogotá".to_owned(),
            postal_code: Some("110111".to_owned()),
            payment_method: Some(PaymentMethod::Efectivo),
            notes: None,
        }
    }

    fn seeded_store() -> (Store, ProductId) {
        let store = Store::in_memory();
        let product = CatalogService::new(&store)
            .create(NewProduct::new(
                "Martillo",
                "Herramientas",
                Price::from_pesos(15_000),
                10,
            ))
            .expect("seed");
        (store, product.id)
    }

    #[test]
    fn test_finalize_records_order_decrements_stock_clears_cart() {
        let (store, id) = seeded_store();
        CartService::new(&store).add_item(&id, 3).expect("add");

        let mailer = SimulatedMailer::default();
        let checkout = CheckoutService::new(&store, &mailer);
        let receipt = checkout.finalize(&valid_form()).expect("finalize");

        assert_eq!(receipt.order.total, Price::from_pesos(45_000));
        assert_eq!(receipt.order.items.len(), 1);
        assert!(receipt.notification.simulated);

        assert_eq!(
            CatalogService::new(&store).get_by_id(&id).expect("p").stock,
            7
        );
        assert!(CartService::new(&store).is_empty());
        assert_eq!(checkout.orders().len(), 1);
    }

    #[test]
    fn test_finalize_empty_cart_fails() {
        let (store, _) = seeded_store();
        let mailer = SimulatedMailer::default();
        let err = CheckoutService::new(&store, &mailer)
            .finalize(&valid_form())
            .expect_err("empty cart");
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_failed_checkout_changes_nothing() {
        let (store, id) = seeded_store();
        CartService::new(&store).add_item(&id, 3).expect("add");

        // Stock drops under the cart between add and checkout.
        CatalogService::new(&store)
            .update(
                &id,
                crate::models::ProductUpdate {
                    stock: Some(1),
                    ..Default::default()
                },
            )
            .expect("shrink stock");

        let mailer = SimulatedMailer::default();
        let checkout = CheckoutService::new(&store, &mailer);
        let err = checkout.finalize(&valid_form()).expect_err("stock short");
        assert!(matches!(err, CheckoutError::Stock(_)));

        // Retrying fails identically; no partial writes happened.
        assert!(matches!(
            checkout.finalize(&valid_form()),
            Err(CheckoutError::Stock(_))
        ));
        assert_eq!(CartService::new(&store).total_quantity(), 3);
        assert!(checkout.orders().is_empty());
        assert_eq!(
            CatalogService::new(&store).get_by_id(&id).expect("p").stock,
            1
        );
    }

    #[test]
    fn test_form_validation_collects_all_errors() {
        let form = CheckoutForm {
            full_name: "J".to_owned(),
            email: "not-an-email".to_owned(),
            phone: "12ab".to_owned(),
            address: "Cll".to_owned(),
            city: "B".to_owned(),
            postal_code: None,
            payment_method: None,
            notes: Some("x".repeat(501)),
        };
        let errors = validate_form(&form);
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_form_accepts_optional_fields_absent() {
        let mut form = valid_form();
        form.postal_code = None;
        form.notes = None;
        assert!(validate_form(&form).is_empty());
    }

    #[test]
    fn test_invalid_form_blocks_finalize() {
        let (store, id) = seeded_store();
        CartService::new(&store).add_item(&id, 1).expect("add");

        let mut form = valid_form();
        form.payment_method = None;

        let mailer = SimulatedMailer::default();
        let err = CheckoutService::new(&store, &mailer)
            .finalize(&form)
            .expect_err("bad form");
        assert!(matches!(err, CheckoutError::Form(_)));
        assert_eq!(CartService::new(&store).total_quantity(), 1);
    }
}
