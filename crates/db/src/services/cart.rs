use std::sync::Arc;

use chrono::Utc;

use storefront_core::domain::cart::{Cart, CartEntry, CartView, LineChange, SessionId};
use storefront_core::domain::product::ProductId;
use storefront_core::errors::DomainError;

use super::catalog::ProductLookup;
use super::ServiceError;
use crate::repositories::{CartRepository, ProductRepository};

/// The cart store and quantity mutator: reads a session's cart, applies
/// absolute quantity changes, and hands back the updated view so callers
/// can re-render without a second read.
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }

    /// Read the cart for a session. A session that never mutated anything
    /// reads as an empty cart, not an error.
    pub async fn cart(&self, session_id: &SessionId) -> Result<CartView, ServiceError> {
        match self.carts.find_by_session(session_id).await? {
            Some(cart) => {
                let mut lookup = ProductLookup::new(self.products.as_ref());
                self.view(cart, &mut lookup).await
            }
            None => Ok(CartView::empty(session_id.clone())),
        }
    }

    /// Set the absolute quantity of a product in the session's cart.
    /// Zero removes the line; the cart itself is created lazily on the
    /// first mutation. Concurrent calls for the same (session, product)
    /// resolve last-write-wins at the store.
    pub async fn set_quantity(
        &self,
        session_id: &SessionId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, ServiceError> {
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::QuantityOutOfRange(quantity))?;

        let mut lookup = ProductLookup::new(self.products.as_ref());
        // Check the product up front so an unknown id surfaces as NotFound
        // instead of a storage constraint failure.
        lookup.get(product_id).await?;

        let mut cart = self.load_or_create(session_id).await?;
        let change = cart.set_line_quantity(product_id, quantity);
        self.apply(&cart, change).await?;
        self.view(cart, &mut lookup).await
    }

    /// The add-to-cart action: bump the product's line by one, starting
    /// at one when absent.
    pub async fn add_one(
        &self,
        session_id: &SessionId,
        product_id: &ProductId,
    ) -> Result<CartView, ServiceError> {
        let mut lookup = ProductLookup::new(self.products.as_ref());
        lookup.get(product_id).await?;

        let mut cart = self.load_or_create(session_id).await?;
        let change = cart.increment_line(product_id);
        self.apply(&cart, change).await?;
        self.view(cart, &mut lookup).await
    }

    async fn load_or_create(&self, session_id: &SessionId) -> Result<Cart, ServiceError> {
        if let Some(cart) = self.carts.find_by_session(session_id).await? {
            return Ok(cart);
        }

        let cart = Cart::new(session_id.clone(), Utc::now());
        self.carts.create(&cart).await?;
        Ok(cart)
    }

    async fn apply(&self, cart: &Cart, change: LineChange) -> Result<(), ServiceError> {
        match change {
            LineChange::Upserted(line) => self.carts.upsert_line(&cart.id, &line).await?,
            LineChange::Removed(product_id) => {
                self.carts.delete_line(&cart.id, &product_id).await?;
            }
            LineChange::Unchanged => {}
        }
        Ok(())
    }

    /// Join cart lines with their current catalog records. The subtotal
    /// falls out of the view itself, derived from live prices.
    async fn view(
        &self,
        cart: Cart,
        lookup: &mut ProductLookup<'_>,
    ) -> Result<CartView, ServiceError> {
        let mut items = Vec::with_capacity(cart.lines.len());
        for line in &cart.lines {
            let product = lookup.get(&line.product_id).await?;
            items.push(CartEntry { product, quantity: line.quantity });
        }
        Ok(CartView { session_id: cart.session_id, items })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use storefront_core::domain::cart::SessionId;
    use storefront_core::domain::product::{Product, ProductId};
    use storefront_core::errors::DomainError;

    use super::{CartService, ServiceError};
    use crate::repositories::{
        CartRepository, InMemoryCartRepository, InMemoryProductRepository, ProductRepository,
    };

    async fn service_with_products(products: &[(&str, i64)]) -> CartService {
        let product_repo = InMemoryProductRepository::default();
        for (id, price_cents) in products {
            product_repo
                .save(Product {
                    id: ProductId(id.to_string()),
                    name: format!("Product {id}"),
                    description: "A product".to_string(),
                    image_url: format!("https://img.example/{id}.jpg"),
                    price_cents: *price_cents,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .await
                .expect("seed product");
        }
        CartService::new(Arc::new(InMemoryCartRepository::default()), Arc::new(product_repo))
    }

    fn session() -> SessionId {
        SessionId("session-1".to_string())
    }

    #[tokio::test]
    async fn unknown_session_reads_as_an_empty_cart() {
        let service = service_with_products(&[]).await;

        let view = service.cart(&session()).await.expect("read cart");

        assert!(view.items.is_empty());
        assert_eq!(view.subtotal_cents(), 0);
    }

    #[tokio::test]
    async fn set_quantity_round_trips_through_the_store() {
        let service = service_with_products(&[("p1", 500)]).await;
        let product_id = ProductId("p1".to_string());

        service.set_quantity(&session(), &product_id, 5).await.expect("set quantity");
        let view = service.cart(&session()).await.expect("read cart");

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].product.id, product_id);
        assert_eq!(view.items[0].quantity, 5);
    }

    #[tokio::test]
    async fn set_quantity_twice_is_idempotent() {
        let service = service_with_products(&[("p1", 500)]).await;
        let product_id = ProductId("p1".to_string());

        let once = service.set_quantity(&session(), &product_id, 3).await.expect("first set");
        let twice = service.set_quantity(&session(), &product_id, 3).await.expect("second set");

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn zero_quantity_removes_the_line_entirely() {
        let service = service_with_products(&[("p1", 500)]).await;
        let product_id = ProductId("p1".to_string());

        service.set_quantity(&session(), &product_id, 2).await.expect("add line");
        let view = service.set_quantity(&session(), &product_id, 0).await.expect("remove line");

        assert!(view.items.iter().all(|item| item.product.id != product_id));
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal_cents(), 0);
    }

    #[tokio::test]
    async fn zero_quantity_for_an_absent_line_is_a_noop_not_an_error() {
        let service = service_with_products(&[("p1", 500)]).await;

        let view = service
            .set_quantity(&session(), &ProductId("p1".to_string()), 0)
            .await
            .expect("no-op removal");

        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn subtotal_is_derived_from_live_prices() {
        let service = service_with_products(&[("p1", 500), ("p2", 1200)]).await;

        service.set_quantity(&session(), &ProductId("p1".to_string()), 2).await.expect("p1");
        let view =
            service.set_quantity(&session(), &ProductId("p2".to_string()), 1).await.expect("p2");

        assert_eq!(view.subtotal_cents(), 2200);
    }

    #[tokio::test]
    async fn set_quantity_overwrites_instead_of_incrementing() {
        let service = service_with_products(&[("p1", 500)]).await;
        let product_id = ProductId("p1".to_string());

        service.set_quantity(&session(), &product_id, 2).await.expect("first set");
        let view = service.set_quantity(&session(), &product_id, 7).await.expect("second set");

        assert_eq!(view.items[0].quantity, 7);
        assert_eq!(view.items.len(), 1);
    }

    #[tokio::test]
    async fn add_one_increments_from_absent_to_one_then_two() {
        let service = service_with_products(&[("p1", 500)]).await;
        let product_id = ProductId("p1".to_string());

        let first = service.add_one(&session(), &product_id).await.expect("first add");
        assert_eq!(first.items[0].quantity, 1);

        let second = service.add_one(&session(), &product_id).await.expect("second add");
        assert_eq!(second.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn unknown_product_is_rejected_before_touching_the_cart() {
        let service = service_with_products(&[]).await;

        let result = service.set_quantity(&session(), &ProductId("ghost".to_string()), 3).await;

        match result {
            Err(ServiceError::NotFound(id)) => assert_eq!(id, ProductId("ghost".to_string())),
            other => panic!("expected NotFound, got {other:?}"),
        }
        let view = service.cart(&session()).await.expect("read cart");
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn negative_quantity_is_a_validation_error() {
        let service = service_with_products(&[("p1", 500)]).await;

        let result = service.set_quantity(&session(), &ProductId("p1".to_string()), -1).await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(DomainError::QuantityOutOfRange(-1)))
        ));
    }

    #[tokio::test]
    async fn first_mutation_creates_the_cart_lazily() {
        let carts = Arc::new(InMemoryCartRepository::default());
        let products = InMemoryProductRepository::default();
        products
            .save(Product {
                id: ProductId("p1".to_string()),
                name: "Product p1".to_string(),
                description: "A product".to_string(),
                image_url: "https://img.example/p1.jpg".to_string(),
                price_cents: 500,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .expect("seed product");
        let service = CartService::new(carts.clone(), Arc::new(products));

        assert_eq!(carts.find_by_session(&session()).await.expect("probe"), None);
        service.set_quantity(&session(), &ProductId("p1".to_string()), 1).await.expect("mutate");
        assert!(carts.find_by_session(&session()).await.expect("probe").is_some());
    }
}
