use serde::Serialize;
use sqlx::{Executor, Row};

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical demo products, kept in sync with the SQL fixture by the seed
/// contract tests.
pub const SEED_PRODUCTS: &[SeededProduct] = &[
    SeededProduct { id: "prod-demo-001", name: "Walnut Desk Lamp", price_cents: 7900 },
    SeededProduct { id: "prod-demo-002", name: "Felt Desk Mat", price_cents: 2400 },
    SeededProduct { id: "prod-demo-003", name: "Mechanical Keyboard", price_cents: 12900 },
    SeededProduct { id: "prod-demo-004", name: "Ceramic Mug", price_cents: 1800 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeededProduct {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SeedResult {
    pub products_seeded: Vec<SeededProduct>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

/// Deterministic demo catalog for local runs and end-to-end checks.
pub struct DemoCatalog;

impl DemoCatalog {
    /// SQL fixture content for the demo catalog.
    pub const SQL: &str = include_str!("../../../config/fixtures/demo_catalog.sql");

    /// Load the demo catalog. Re-running replaces the same rows, so the
    /// command stays idempotent.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::raw_sql(Self::SQL)).await?;
        tx.commit().await?;

        Ok(SeedResult { products_seeded: SEED_PRODUCTS.to_vec() })
    }

    /// Verify every seeded product exists with the expected name and price.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::with_capacity(SEED_PRODUCTS.len());

        for seeded in SEED_PRODUCTS {
            let row = sqlx::query(
                "SELECT COUNT(*) AS count FROM product \
                 WHERE id = ?1 AND name = ?2 AND price_cents = ?3",
            )
            .bind(seeded.id)
            .bind(seeded.name)
            .bind(seeded.price_cents)
            .fetch_one(pool)
            .await?;
            let present = row.get::<i64, _>("count") == 1;
            checks.push((seeded.id, present));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }
}
