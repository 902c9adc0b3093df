//! Product listing and search.

use thiserror::Error;

use ferreteria_storefront::AppError;
use ferreteria_storefront::models::Product;
use ferreteria_storefront::services::{CatalogService, SearchField};

/// Errors specific to product commands.
#[derive(Debug, Error)]
pub enum ProductsCmdError {
    /// The `--field` argument is not a searchable field.
    #[error("invalid search field: {0}. Valid fields: name, category, id")]
    InvalidField(String),
}

/// Print every product.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn list() -> Result<(), AppError> {
    let store = super::open_store()?;
    print_products(&CatalogService::new(&store).list());
    Ok(())
}

/// Search products on one field and print the matches.
///
/// # Errors
///
/// Returns an error if the field name is unknown or the store cannot be
/// opened.
pub fn search(field: &str, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let field = match field {
        "name" => SearchField::Name,
        "category" => SearchField::Category,
        "id" => SearchField::Id,
        other => return Err(ProductsCmdError::InvalidField(other.to_owned()).into()),
    };
    let store = super::open_store()?;
    print_products(&CatalogService::new(&store).search(field, query));
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products");
        return;
    }
    for p in products {
        println!(
            "{}  {:<30} {:<14} {:>12}  stock {:>4} ({})",
            p.id,
            p.name,
            p.category,
            p.price.display_cop(),
            p.stock,
            p.stock_state().label()
        );
    }
    println!("{} product(s)", products.len());
}
