use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::{Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub String);

impl CartId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Anonymous session key a cart hangs off. How the id is issued (cookie,
/// header, fixture) is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product/quantity pairing inside a cart. Quantity is always >= 1
/// while the line exists; a mutation to zero removes the line instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub session_id: SessionId,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a quantity mutation did to the cart, so the store can persist
/// exactly that change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineChange {
    Upserted(CartLine),
    Removed(ProductId),
    Unchanged,
}

impl Cart {
    pub fn new(session_id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id: CartId::generate(),
            session_id,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// Set the absolute quantity for a product. Zero removes the line if
    /// present and is a no-op otherwise.
    pub fn set_line_quantity(&mut self, product_id: &ProductId, quantity: u32) -> LineChange {
        if quantity == 0 {
            let before = self.lines.len();
            self.lines.retain(|line| &line.product_id != product_id);
            if self.lines.len() == before {
                return LineChange::Unchanged;
            }
            return LineChange::Removed(product_id.clone());
        }

        match self.lines.iter_mut().find(|line| &line.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                LineChange::Upserted(line.clone())
            }
            None => {
                let line = CartLine { product_id: product_id.clone(), quantity };
                self.lines.push(line.clone());
                LineChange::Upserted(line)
            }
        }
    }

    /// The add-to-cart action: bump the line by one, creating it at 1.
    pub fn increment_line(&mut self, product_id: &ProductId) -> LineChange {
        let next = self.line(product_id).map_or(1, |line| line.quantity.saturating_add(1));
        self.set_line_quantity(product_id, next)
    }
}

/// A cart entry resolved against the live catalog record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total_cents(&self) -> i64 {
        self.product.price_cents * i64::from(self.quantity)
    }
}

/// The read-side cart: line items joined with current products. The
/// subtotal is derived from current prices every time, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub session_id: SessionId,
    pub items: Vec<CartEntry>,
}

impl CartView {
    pub fn empty(session_id: SessionId) -> Self {
        Self { session_id, items: Vec::new() }
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(CartEntry::line_total_cents).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Cart, CartEntry, CartLine, CartView, LineChange, SessionId};
    use crate::domain::product::{Product, ProductId};

    fn cart() -> Cart {
        Cart::new(SessionId("session-1".to_string()), Utc::now())
    }

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: format!("Product {id}"),
            description: "A product".to_string(),
            image_url: "https://img.example/p.jpg".to_string(),
            price_cents,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn setting_quantity_creates_a_missing_line() {
        let mut cart = cart();
        let product_id = ProductId("p1".to_string());

        let change = cart.set_line_quantity(&product_id, 3);

        assert_eq!(change, LineChange::Upserted(CartLine { product_id: product_id.clone(), quantity: 3 }));
        assert_eq!(cart.line(&product_id).map(|line| line.quantity), Some(3));
    }

    #[test]
    fn setting_quantity_overwrites_rather_than_increments() {
        let mut cart = cart();
        let product_id = ProductId("p1".to_string());

        cart.set_line_quantity(&product_id, 2);
        cart.set_line_quantity(&product_id, 5);

        assert_eq!(cart.line(&product_id).map(|line| line.quantity), Some(5));
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn setting_quantity_is_idempotent() {
        let mut first = cart();
        let mut second = first.clone();
        let product_id = ProductId("p1".to_string());

        first.set_line_quantity(&product_id, 3);
        second.set_line_quantity(&product_id, 3);
        second.set_line_quantity(&product_id, 3);

        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = cart();
        let product_id = ProductId("p1".to_string());

        cart.set_line_quantity(&product_id, 2);
        let change = cart.set_line_quantity(&product_id, 0);

        assert_eq!(change, LineChange::Removed(product_id.clone()));
        assert!(cart.line(&product_id).is_none());
        assert!(cart.lines.is_empty());
    }

    #[test]
    fn zero_quantity_on_an_absent_line_is_a_noop() {
        let mut cart = cart();
        let change = cart.set_line_quantity(&ProductId("p1".to_string()), 0);
        assert_eq!(change, LineChange::Unchanged);
    }

    #[test]
    fn increment_creates_the_line_at_one_then_bumps_it() {
        let mut cart = cart();
        let product_id = ProductId("p1".to_string());

        cart.increment_line(&product_id);
        cart.increment_line(&product_id);

        assert_eq!(cart.line(&product_id).map(|line| line.quantity), Some(2));
    }

    #[test]
    fn subtotal_sums_price_times_quantity_over_all_lines() {
        let view = CartView {
            session_id: SessionId("session-1".to_string()),
            items: vec![
                CartEntry { product: product("p1", 500), quantity: 2 },
                CartEntry { product: product("p2", 1200), quantity: 1 },
            ],
        };

        assert_eq!(view.subtotal_cents(), 2200);
    }

    #[test]
    fn empty_view_has_zero_subtotal() {
        let view = CartView::empty(SessionId("session-1".to_string()));
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal_cents(), 0);
    }
}
