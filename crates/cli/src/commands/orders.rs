//! Order log inspection.

use ferreteria_storefront::AppError;
use ferreteria_storefront::models::Order;
use ferreteria_storefront::storage::keys;

/// Print every recorded order, oldest first.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[allow(clippy::print_stdout)]
pub fn list() -> Result<(), AppError> {
    let store = super::open_store()?;
    let orders: Vec<Order> = store.get(keys::ORDERS);

    if orders.is_empty() {
        println!("No orders");
        return Ok(());
    }
    for order in &orders {
        println!(
            "{}  {}  {} line(s)  {}  [{}]",
            order.placed_at.format("%Y-%m-%d %H:%M"),
            order.email,
            order.items.len(),
            order.total,
            order.payment_method.label()
        );
        for item in &order.items {
            println!(
                "    {} x{} = {}",
                item.product_name, item.quantity, item.subtotal
            );
        }
    }
    println!("{} order(s)", orders.len());
    Ok(())
}
