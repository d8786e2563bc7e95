use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    /// Mint a time-ordered identifier, so sorting ids descending
    /// approximates newest-first.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry. Prices are integer minor units (cents) and products
/// are immutable once created; there is no edit flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Catalog search predicate: case-insensitive substring match against
    /// name or description. An empty query matches every product.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Input for the product-creation flow, before an id and timestamps are
/// assigned by the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_cents: i64,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::MissingField("description"));
        }
        if self.image_url.trim().is_empty() {
            return Err(DomainError::MissingField("image_url"));
        }
        if self.price_cents < 0 {
            return Err(DomainError::NegativePrice(self.price_cents));
        }
        Ok(())
    }

    pub fn into_product(self, now: DateTime<Utc>) -> Result<Product, DomainError> {
        self.validate()?;
        Ok(Product {
            id: ProductId::generate(),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price_cents: self.price_cents,
            created_at: now,
            updated_at: now,
        })
    }
}
