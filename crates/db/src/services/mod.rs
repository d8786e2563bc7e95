use thiserror::Error;

use storefront_core::domain::product::ProductId;
use storefront_core::errors::DomainError;

use crate::repositories::RepositoryError;

pub mod cart;
pub mod catalog;

pub use cart::CartService;
pub use catalog::{CatalogService, ProductLookup};

/// Failure taxonomy the storefront surfaces to callers: a missing product,
/// a rejected input, or an unreachable store.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("store unavailable: {0}")]
    Unavailable(#[from] RepositoryError),
}
