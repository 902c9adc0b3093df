//! Demo catalog seeding.

use ferreteria_core::Price;
use ferreteria_storefront::AppError;
use ferreteria_storefront::models::NewProduct;
use ferreteria_storefront::services::CatalogService;

/// Seed the store with a small demo catalog.
///
/// Refuses to touch a non-empty catalog unless `force` is set; with
/// `force`, existing products are kept and duplicates are skipped.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or a write fails.
#[allow(clippy::print_stdout)]
pub fn run(force: bool) -> Result<(), AppError> {
    let store = super::open_store()?;
    let catalog = CatalogService::new(&store);

    if !catalog.list().is_empty() && !force {
        println!("Catalog already has products, use --force to seed anyway");
        return Ok(());
    }

    let mut created = 0_usize;
    for product in demo_catalog() {
        let name = product.name.clone();
        match catalog.create(product) {
            Ok(p) => {
                created += 1;
                println!("  {} {}", p.id, p.name);
            }
            Err(e) => tracing::warn!(name = %name, error = %e, "skipping seed product"),
        }
    }
    println!("Seeded {created} products");
    Ok(())
}

fn demo_catalog() -> Vec<NewProduct> {
    let mut items = vec![
        with_description(
            NewProduct::new("Martillo de uña", "Herramientas", Price::from_pesos(15_000), 25),
            "Mango de madera, cabeza de acero forjado",
        ),
        with_description(
            NewProduct::new("Destornillador Phillips", "Herramientas", Price::from_pesos(8_000), 40),
            "Punta magnética #2",
        ),
        NewProduct::new("Taladro percutor 650W", "Eléctricas", Price::from_pesos(189_000), 8),
        NewProduct::new("Caja de clavos 2\"", "Fijación", Price::from_pesos(6_500), 120),
        NewProduct::new("Pintura blanca 1 galón", "Pinturas", Price::from_pesos(62_000), 14),
        NewProduct::new("Brocha 3\"", "Pinturas", Price::from_pesos(9_500), 3),
        NewProduct::new("Cinta métrica 5m", "Medición", Price::from_pesos(12_000), 30),
        NewProduct::new("Llave inglesa 10\"", "Herramientas", Price::from_pesos(28_000), 11),
    ];
    if let Some(first) = items.first_mut() {
        first.initial_rating = Some(5);
    }
    items
}

fn with_description(mut product: NewProduct, description: &str) -> NewProduct {
    product.description = Some(description.to_owned());
    product
}
