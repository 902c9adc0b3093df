//! Catalog service.
//!
//! CRUD over the product list plus the read helpers the storefront and the
//! admin dashboard render from. The whole catalog lives under one storage
//! key and every mutation rewrites it.

use chrono::Utc;
use thiserror::Error;

use ferreteria_core::{Price, ProductId, StockState};

use crate::models::{CatalogStats, NewProduct, Product, ProductUpdate};
use crate::storage::{Store, StorageError, keys};

/// Maximum product name length accepted on create and update.
const MAX_NAME_LENGTH: usize = 100;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the given id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Another product already uses this name (case-insensitive).
    #[error("a product named \"{0}\" already exists")]
    DuplicateName(String),

    /// Input failed validation.
    #[error("invalid product: {0}")]
    Validation(String),

    /// A stock decrement asked for more units than remain.
    #[error("insufficient stock for product {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: ProductId,
        available: u32,
        requested: u32,
    },

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Which field a catalog search matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Category,
    Id,
}

/// Stock constraint for [`ProductFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    /// No stock constraint.
    #[default]
    Any,
    /// Stock above zero.
    InStock,
    /// Stock in the low bucket.
    LowStock,
}

/// Combined filter for the storefront product grid.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name and description.
    pub text: Option<String>,
    /// Exact category (case-insensitive).
    pub category: Option<String>,
    pub stock: StockFilter,
}

/// Catalog service over a [`Store`].
pub struct CatalogService<'a> {
    store: &'a Store,
}

impl<'a> CatalogService<'a> {
    /// Create a catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All products, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.store.get(keys::PRODUCTS)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get_by_id(&self, id: &ProductId) -> Option<Product> {
        self.list().into_iter().find(|p| &p.id == id)
    }

    /// Case-insensitive substring search on a single field.
    #[must_use]
    pub fn search(&self, field: SearchField, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list();
        }
        self.list()
            .into_iter()
            .filter(|p| {
                let haystack = match field {
                    SearchField::Name => p.name.to_lowercase(),
                    SearchField::Category => p.category.to_lowercase(),
                    SearchField::Id => p.id.as_str().to_lowercase(),
                };
                haystack.contains(&needle)
            })
            .collect()
    }

    /// Apply the storefront grid filter.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<Product> {
        let text = filter
            .text
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        let category = filter
            .category
            .as_deref()
            .map(str::to_lowercase)
            .filter(|c| !c.is_empty());

        self.list()
            .into_iter()
            .filter(|p| {
                if let Some(text) = &text {
                    let in_name = p.name.to_lowercase().contains(text);
                    let in_description = p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(text));
                    if !in_name && !in_description {
                        return false;
                    }
                }
                if let Some(category) = &category
                    && p.category.to_lowercase() != *category
                {
                    return false;
                }
                match filter.stock {
                    StockFilter::Any => true,
                    StockFilter::InStock => p.stock > 0,
                    StockFilter::LowStock => p.stock_state() == StockState::Low,
                }
            })
            .collect()
    }

    /// Distinct categories, sorted, preserving the casing of first use.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for product in self.list() {
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(&product.category)) {
                seen.push(product.category);
            }
        }
        seen.sort();
        seen
    }

    /// Dashboard aggregates.
    #[must_use]
    pub fn statistics(&self) -> CatalogStats {
        let products = self.list();
        let low_stock = products
            .iter()
            .filter(|p| p.stock_state() == StockState::Low)
            .count();
        let inventory_value = products.iter().map(|p| p.price.times(p.stock)).sum();
        let categories = {
            let mut names: Vec<String> =
                products.iter().map(|p| p.category.to_lowercase()).collect();
            names.sort();
            names.dedup();
            names.len()
        };
        CatalogStats {
            total: products.len(),
            low_stock,
            categories,
            inventory_value,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a product, assigning the next sequential id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for bad input,
    /// `CatalogError::DuplicateName` if the name is already taken
    /// (case-insensitive), and `CatalogError::Storage` if the write fails.
    pub fn create(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let name = validate_name(&input.name)?;
        let category = validate_category(&input.category)?;
        validate_price(input.price)?;
        if let Some(rating) = input.initial_rating {
            validate_initial_rating(rating)?;
        }

        let mut products = self.list();
        if products
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&name))
        {
            return Err(CatalogError::DuplicateName(name));
        }

        let counter = self.current_counter() + 1;
        let now = Utc::now();
        let product = Product {
            id: ProductId::from_counter(counter),
            name,
            category,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
            description: normalize_optional(input.description),
            image: normalize_optional(input.image),
            initial_rating: input.initial_rating,
        };

        products.push(product.clone());
        self.store.put(keys::PRODUCTS, &products)?;
        self.store.put(keys::PRODUCT_ID_COUNTER, &counter.to_string())?;

        tracing::info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Apply a partial update and refresh the update timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is unknown, plus the same
    /// validation and storage errors as [`Self::create`].
    pub fn update(&self, id: &ProductId, update: ProductUpdate) -> Result<Product, CatalogError> {
        let mut products = self.list();
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        let new_name = match update.name {
            Some(raw) => {
                let name = validate_name(&raw)?;
                let taken = products
                    .iter()
                    .enumerate()
                    .any(|(i, p)| i != index && p.name.eq_ignore_ascii_case(&name));
                if taken {
                    return Err(CatalogError::DuplicateName(name));
                }
                Some(name)
            }
            None => None,
        };
        let new_category = match update.category {
            Some(raw) => Some(validate_category(&raw)?),
            None => None,
        };
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(rating) = update.initial_rating {
            validate_initial_rating(rating)?;
        }

        let product = products
            .get_mut(index)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        if let Some(name) = new_name {
            product.name = name;
        }
        if let Some(category) = new_category {
            product.category = category;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(description) = update.description {
            product.description = normalize_optional(Some(description));
        }
        if let Some(image) = update.image {
            product.image = normalize_optional(Some(image));
        }
        if let Some(rating) = update.initial_rating {
            product.initial_rating = Some(rating);
        }
        product.updated_at = Utc::now();

        let updated = product.clone();
        self.store.put(keys::PRODUCTS, &products)?;
        tracing::info!(id = %updated.id, "product updated");
        Ok(updated)
    }

    /// Delete a product. The id counter never goes backwards, so the id is
    /// not reused.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is unknown,
    /// `CatalogError::Storage` if the write fails.
    pub fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let mut products = self.list();
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Err(CatalogError::NotFound(id.clone()));
        }
        self.store.put(keys::PRODUCTS, &products)?;
        tracing::info!(id = %id, "product deleted");
        Ok(())
    }

    /// Decrement stock for a batch of lines in one catalog write.
    ///
    /// Checks every line before touching anything, so a short line leaves
    /// the whole catalog unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` or `CatalogError::InsufficientStock`
    /// for the first offending line, `CatalogError::Storage` if the write
    /// fails.
    pub fn commit_stock_decrements(
        &self,
        lines: &[(ProductId, u32)],
    ) -> Result<(), CatalogError> {
        let mut products = self.list();

        for (id, requested) in lines {
            let product = products
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
            if product.stock < *requested {
                return Err(CatalogError::InsufficientStock {
                    id: id.clone(),
                    available: product.stock,
                    requested: *requested,
                });
            }
        }

        let now = Utc::now();
        for (id, requested) in lines {
            if let Some(product) = products.iter_mut().find(|p| &p.id == id) {
                product.stock -= requested;
                product.updated_at = now;
            }
        }
        self.store.put(keys::PRODUCTS, &products)?;
        Ok(())
    }

    /// Stock bucket for an arbitrary count.
    #[must_use]
    pub const fn stock_state(stock: u32) -> StockState {
        StockState::for_quantity(stock)
    }

    /// Price formatted for display, `$ 45.000` style.
    #[must_use]
    pub fn format_price(price: Price) -> String {
        price.display_cop()
    }

    fn current_counter(&self) -> u64 {
        let raw: String = self.store.get(keys::PRODUCT_ID_COUNTER);
        raw.trim_matches('"').parse().unwrap_or(0)
    }
}

fn validate_name(raw: &str) -> Result<String, CatalogError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation("name must not be empty".to_owned()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CatalogError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_owned())
}

fn validate_category(raw: &str) -> Result<String, CatalogError> {
    let category = raw.trim();
    if category.is_empty() {
        return Err(CatalogError::Validation(
            "category must not be empty".to_owned(),
        ));
    }
    Ok(category.to_owned())
}

fn validate_price(price: Price) -> Result<(), CatalogError> {
    if price.is_positive() {
        Ok(())
    } else {
        Err(CatalogError::Validation(
            "price must be greater than zero".to_owned(),
        ))
    }
}

fn validate_initial_rating(rating: u8) -> Result<(), CatalogError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(CatalogError::Validation(
            "initial rating must be between 1 and 5".to_owned(),
        ))
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_store() -> Store {
        Store::in_memory()
    }

    fn martillo() -> NewProduct {
        NewProduct::new("Martillo", "Herramientas", Price::from_pesos(15_000), 10)
    }

    #[test]
    fn test_create_assigns_padded_sequential_ids() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);

        let first = catalog.create(martillo()).expect("create");
        assert_eq!(first.id.as_str(), "001");

        let second = catalog
            .create(NewProduct::new(
                "Destornillador",
                "Herramientas",
                Price::from_pesos(8_000),
                20,
            ))
            .expect("create");
        assert_eq!(second.id.as_str(), "002");
    }

    #[test]
    fn test_create_then_get_by_id_round_trips() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);

        let created = catalog.create(martillo()).expect("create");
        let fetched = catalog.get_by_id(&created.id).expect("found");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        catalog.create(martillo()).expect("create");

        let err = catalog
            .create(NewProduct::new(
                "MARTILLO",
                "Otros",
                Price::from_pesos(1_000),
                1,
            ))
            .expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateName(_)));
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let err = catalog
            .create(NewProduct::new("Clavos", "Fijación", Price::ZERO, 100))
            .expect_err("zero price");
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_delete_does_not_reuse_ids() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);

        let first = catalog.create(martillo()).expect("create");
        catalog.delete(&first.id).expect("delete");

        let next = catalog
            .create(NewProduct::new(
                "Taladro",
                "Herramientas",
                Price::from_pesos(120_000),
                5,
            ))
            .expect("create");
        assert_eq!(next.id.as_str(), "002");
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let err = catalog
            .delete(&ProductId::from("999"))
            .expect_err("missing");
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_update_changes_only_provided_fields() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let created = catalog.create(martillo()).expect("create");

        let updated = catalog
            .update(
                &created.id,
                ProductUpdate {
                    price: Some(Price::from_pesos(18_000)),
                    ..ProductUpdate::default()
                },
            )
            .expect("update");

        assert_eq!(updated.price, Price::from_pesos(18_000));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.stock, created.stock);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_empty_string_clears_optional_fields() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let mut input = martillo();
        input.description = Some("Mango de madera".to_owned());
        input.image = Some("martillo.jpg".to_owned());
        let created = catalog.create(input).expect("create");

        // An absent field is left alone.
        let untouched = catalog
            .update(
                &created.id,
                ProductUpdate {
                    stock: Some(5),
                    ..ProductUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(untouched.description.as_deref(), Some("Mango de madera"));

        // An empty string clears, a blank one too.
        let cleared = catalog
            .update(
                &created.id,
                ProductUpdate {
                    description: Some(String::new()),
                    image: Some("   ".to_owned()),
                    ..ProductUpdate::default()
                },
            )
            .expect("clear");
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.image, None);
    }

    #[test]
    fn test_update_keeping_own_name_is_not_a_duplicate() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let created = catalog.create(martillo()).expect("create");

        let updated = catalog
            .update(
                &created.id,
                ProductUpdate {
                    name: Some("martillo".to_owned()),
                    ..ProductUpdate::default()
                },
            )
            .expect("rename to own name");
        assert_eq!(updated.name, "martillo");
    }

    #[test]
    fn test_search_by_each_field() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        catalog.create(martillo()).expect("create");
        catalog
            .create(NewProduct::new(
                "Pintura blanca",
                "Pinturas",
                Price::from_pesos(30_000),
                8,
            ))
            .expect("create");

        assert_eq!(catalog.search(SearchField::Name, "marti").len(), 1);
        assert_eq!(catalog.search(SearchField::Category, "PINT").len(), 1);
        assert_eq!(catalog.search(SearchField::Id, "002").len(), 1);
        assert_eq!(catalog.search(SearchField::Name, "  ").len(), 2);
    }

    #[test]
    fn test_filter_combines_text_category_and_stock() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        catalog.create(martillo()).expect("create");
        let mut low = NewProduct::new("Brocha", "Pinturas", Price::from_pesos(5_000), 2);
        low.description = Some("Brocha de cerda natural".to_owned());
        catalog.create(low).expect("create");

        let low_stock = catalog.filter(&ProductFilter {
            stock: StockFilter::LowStock,
            ..ProductFilter::default()
        });
        assert_eq!(low_stock.len(), 1);
        assert_eq!(low_stock.first().map(|p| p.name.as_str()), Some("Brocha"));

        let by_description = catalog.filter(&ProductFilter {
            text: Some("cerda".to_owned()),
            category: Some("pinturas".to_owned()),
            stock: StockFilter::InStock,
        });
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn test_statistics() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        catalog.create(martillo()).expect("create");
        catalog
            .create(NewProduct::new(
                "Brocha",
                "Pinturas",
                Price::from_pesos(5_000),
                2,
            ))
            .expect("create");

        let stats = catalog.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.categories, 2);
        // 15000 * 10 + 5000 * 2
        assert_eq!(stats.inventory_value, Price::from_pesos(160_000));
    }

    #[test]
    fn test_commit_stock_decrements_is_all_or_nothing() {
        let store = catalog_with_store();
        let catalog = CatalogService::new(&store);
        let hammer = catalog.create(martillo()).expect("create");
        let brush = catalog
            .create(NewProduct::new(
                "Brocha",
                "Pinturas",
                Price::from_pesos(5_000),
                2,
            ))
            .expect("create");

        let err = catalog
            .commit_stock_decrements(&[(hammer.id.clone(), 3), (brush.id.clone(), 5)])
            .expect_err("second line short");
        assert!(matches!(err, CatalogError::InsufficientStock { .. }));

        // Nothing was written.
        assert_eq!(catalog.get_by_id(&hammer.id).expect("hammer").stock, 10);
        assert_eq!(catalog.get_by_id(&brush.id).expect("brush").stock, 2);

        catalog
            .commit_stock_decrements(&[(hammer.id.clone(), 3), (brush.id.clone(), 2)])
            .expect("both fit");
        assert_eq!(catalog.get_by_id(&hammer.id).expect("hammer").stock, 7);
        assert_eq!(catalog.get_by_id(&brush.id).expect("brush").stock, 0);
    }
}
