//! Order notification seam.
//!
//! Checkout reports the outcome of sending a confirmation but never fails
//! because of it. The default implementation only logs; a real mailer can
//! slot in behind [`Notifier`] without touching checkout.

use crate::models::Order;

/// Result of attempting an order confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub success: bool,
    pub message: String,
    /// True when no real delivery was attempted.
    pub simulated: bool,
}

/// Outbound notification channel for completed orders.
pub trait Notifier {
    /// Send (or simulate) an order confirmation. Must not panic; failures
    /// are reported through the outcome.
    fn send_order_confirmation(&self, order: &Order) -> NotificationOutcome;
}

/// Notifier that logs the confirmation instead of sending it.
pub struct SimulatedMailer {
    company_name: String,
    company_email: String,
}

impl SimulatedMailer {
    /// Create a simulated mailer with the given sender identity.
    #[must_use]
    pub fn new(company_name: impl Into<String>, company_email: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            company_email: company_email.into(),
        }
    }
}

impl Default for SimulatedMailer {
    fn default() -> Self {
        Self::new("FerreterIA", "info@ferreteria.com")
    }
}

impl Notifier for SimulatedMailer {
    fn send_order_confirmation(&self, order: &Order) -> NotificationOutcome {
        let summary = order_summary(order);
        tracing::info!(
            to = %order.email,
            from = %self.company_email,
            company = %self.company_name,
            "order confirmation (simulated)\n{summary}"
        );
        NotificationOutcome {
            success: true,
            message: format!("confirmation for {} simulated, no mailer configured", order.email),
            simulated: true,
        }
    }
}

/// Plain-text purchase summary, the body a real mailer would send.
#[must_use]
pub fn order_summary(order: &Order) -> String {
    use std::fmt::Write as _;

    let mut body = String::new();
    let _ = writeln!(body, "Resumen de tu compra");
    let _ = writeln!(body, "Cliente: {}", order.customer_name);
    let _ = writeln!(body, "Fecha: {}", order.placed_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(body);
    for item in &order.items {
        let _ = writeln!(
            body,
            "  {} x{} @ {} = {}",
            item.product_name,
            item.quantity,
            item.unit_price.display_cop(),
            item.subtotal.display_cop()
        );
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "Total: {}", order.total.display_cop());
    let _ = writeln!(body, "Método de pago: {}", order.payment_method.label());
    let _ = writeln!(body, "Envío a: {}, {}", order.address, order.city);
    body
}
