use std::collections::HashMap;

use tokio::sync::RwLock;

use storefront_core::domain::cart::{Cart, CartId, CartLine, SessionId};
use storefront_core::domain::product::{Product, ProductId};

use super::{CartRepository, ProductRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.get(&id.0).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        let mut matches: Vec<Product> =
            products.values().filter(|product| product.matches(query)).cloned().collect();
        matches.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        Ok(matches)
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        products.insert(product.id.0.clone(), product);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<String, Cart>>,
}

#[async_trait::async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let carts = self.carts.read().await;
        Ok(carts.get(&session_id.0).cloned())
    }

    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.session_id.0.clone(), cart.clone());
        Ok(())
    }

    async fn upsert_line(&self, cart_id: &CartId, line: &CartLine) -> Result<(), RepositoryError> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .values_mut()
            .find(|cart| &cart.id == cart_id)
            .ok_or_else(|| RepositoryError::Decode(format!("unknown cart id: {}", cart_id.0)))?;
        cart.set_line_quantity(&line.product_id, line.quantity);
        Ok(())
    }

    async fn delete_line(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .values_mut()
            .find(|cart| &cart.id == cart_id)
            .ok_or_else(|| RepositoryError::Decode(format!("unknown cart id: {}", cart_id.0)))?;
        cart.set_line_quantity(product_id, 0);
        Ok(())
    }
}
