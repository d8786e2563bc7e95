//! Catalog endpoints: listing/search, product detail, and the
//! product-creation write path.
//!
//! - `GET  /api/v1/products?q=`    — free-text search, newest first
//! - `GET  /api/v1/products/{id}`  — single product, 404 when missing
//! - `POST /api/v1/products`       — create a product from a draft

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_core::domain::product::{Product, ProductDraft, ProductId};
use storefront_core::money::format_price;
use storefront_db::CatalogService;

use crate::api::ApiFailure;

#[derive(Clone)]
pub struct CatalogState {
    catalog: Arc<CatalogService>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_cents: i64,
    pub price_display: String,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.0,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            price_cents: product.price_cents,
            price_display: format_price(product.price_cents),
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price_cents: i64,
}

pub fn router(catalog: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/v1/products", get(search_products).post(create_product))
        .route("/api/v1/products/{id}", get(product_detail))
        .with_state(CatalogState { catalog })
}

pub async fn search_products(
    State(state): State<CatalogState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ProductListResponse>, ApiFailure> {
    let products = state.catalog.search(&params.q).await?;
    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

pub async fn product_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiFailure> {
    let mut lookup = state.catalog.lookup();
    let product = lookup.get(&ProductId(id)).await?;
    Ok(Json(ProductResponse::from(product)))
}

pub async fn create_product(
    State(state): State<CatalogState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiFailure> {
    let product = state
        .catalog
        .create_product(ProductDraft {
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            price_cents: request.price_cents,
        })
        .await?;

    info!(
        event_name = "catalog.product.created",
        product_id = %product.id,
        "product added to the catalog"
    );

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}
