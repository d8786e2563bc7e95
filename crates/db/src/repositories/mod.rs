use async_trait::async_trait;
use thiserror::Error;

use storefront_core::domain::cart::{Cart, CartId, CartLine, SessionId};
use storefront_core::domain::product::{Product, ProductId};

pub mod cart;
pub mod memory;
pub mod product;

pub use cart::SqlCartRepository;
pub use memory::{InMemoryCartRepository, InMemoryProductRepository};
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Case-insensitive substring search over name and description, newest
    /// first (descending identifier). An empty query matches everything.
    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError>;

    async fn save(&self, product: Product) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Cart>, RepositoryError>;

    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError>;

    async fn upsert_line(&self, cart_id: &CartId, line: &CartLine) -> Result<(), RepositoryError>;

    async fn delete_line(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError>;
}
