use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use storefront_core::domain::product::{Product, ProductDraft, ProductId};

use super::ServiceError;
use crate::repositories::ProductRepository;

/// Read and write paths into the catalog: free-text search, single-product
/// lookup, and the product-creation flow.
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Free-text catalog search, newest first. An empty result set is a
    /// value, not an error; the caller decides how to present it.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.search(query).await?)
    }

    /// Validate a draft, assign an id and timestamps, and persist it.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let product = draft.into_product(Utc::now())?;
        self.products.save(product.clone()).await?;
        Ok(product)
    }

    /// Start a request-scoped lookup. Create one per incoming request and
    /// drop it at the end; it must not be shared across requests.
    pub fn lookup(&self) -> ProductLookup<'_> {
        ProductLookup::new(self.products.as_ref())
    }
}

/// Single-product lookup with request-scoped memoization: repeated gets
/// for the same id within one request hit the store once. Both hits and
/// misses are remembered; store failures are not.
pub struct ProductLookup<'a> {
    products: &'a dyn ProductRepository,
    seen: HashMap<ProductId, Option<Product>>,
}

impl<'a> ProductLookup<'a> {
    pub fn new(products: &'a dyn ProductRepository) -> Self {
        Self { products, seen: HashMap::new() }
    }

    pub async fn get(&mut self, id: &ProductId) -> Result<Product, ServiceError> {
        if let Some(remembered) = self.seen.get(id) {
            return remembered.clone().ok_or_else(|| ServiceError::NotFound(id.clone()));
        }

        let fetched = self.products.find_by_id(id).await?;
        self.seen.insert(id.clone(), fetched.clone());
        fetched.ok_or_else(|| ServiceError::NotFound(id.clone()))
    }
}
