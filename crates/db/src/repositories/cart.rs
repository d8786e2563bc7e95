use sqlx::Row;

use storefront_core::domain::cart::{Cart, CartId, CartLine, SessionId};
use storefront_core::domain::product::ProductId;

use super::{CartRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCartRepository {
    pool: DbPool,
}

impl SqlCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CartRepository for SqlCartRepository {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let Some(row) = sqlx::query(
            "SELECT id, session_id, created_at, updated_at FROM cart WHERE session_id = ?1",
        )
        .bind(&session_id.0)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let cart_id: String = row.try_get("id")?;
        let line_rows = sqlx::query(
            "SELECT product_id, quantity FROM cart_item WHERE cart_id = ?1 ORDER BY product_id",
        )
        .bind(&cart_id)
        .fetch_all(&self.pool)
        .await?;

        let mut lines = Vec::with_capacity(line_rows.len());
        for line_row in &line_rows {
            let quantity: i64 = line_row.try_get("quantity")?;
            let quantity = u32::try_from(quantity).map_err(|_| {
                RepositoryError::Decode(format!("cart_item.quantity out of range: {quantity}"))
            })?;
            lines.push(CartLine { product_id: ProductId(line_row.try_get("product_id")?), quantity });
        }

        Ok(Some(Cart {
            id: CartId(cart_id),
            session_id: SessionId(row.try_get("session_id")?),
            lines,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }

    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO cart (id, session_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&cart.id.0)
        .bind(&cart.session_id.0)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_line(&self, cart_id: &CartId, line: &CartLine) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO cart_item (cart_id, product_id, quantity) VALUES (?1, ?2, ?3) \
             ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = excluded.quantity",
        )
        .bind(&cart_id.0)
        .bind(&line.product_id.0)
        .bind(i64::from(line.quantity))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_line(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE cart_id = ?1 AND product_id = ?2")
            .bind(&cart_id.0)
            .bind(&product_id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
