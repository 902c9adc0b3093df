//! Catalog statistics report.

use ferreteria_storefront::AppError;
use ferreteria_storefront::services::CatalogService;

/// Print the aggregate catalog numbers.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[allow(clippy::print_stdout)]
pub fn run() -> Result<(), AppError> {
    let store = super::open_store()?;
    let stats = CatalogService::new(&store).statistics();

    println!("Products:        {}", stats.total);
    println!("Low stock:       {}", stats.low_stock);
    println!("Categories:      {}", stats.categories);
    println!("Inventory value: {}", stats.inventory_value);
    Ok(())
}
