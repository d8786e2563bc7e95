//! Cart endpoints for the anonymous session presented in `x-session-id`.
//!
//! - `GET  /api/v1/cart`        — read the session's cart (empty when none)
//! - `PUT  /api/v1/cart/items`  — set the absolute quantity of a product
//! - `POST /api/v1/cart/items`  — add one of a product
//!
//! Mutations mint a fresh session id when the client presents none and
//! echo the effective id back in the payload and the `x-session-id`
//! response header. Issuing the id to the browser (cookie or otherwise)
//! is the client's concern.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_core::domain::cart::{CartView, SessionId};
use storefront_core::domain::product::ProductId;
use storefront_core::money::format_price;
use storefront_db::CartService;

use crate::api::ApiFailure;
use crate::catalog::ProductResponse;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct CartState {
    carts: Arc<CartService>,
}

#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub product: ProductResponse,
    pub quantity: u32,
    pub line_total_cents: i64,
    pub line_total_display: String,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub session_id: Option<String>,
    pub items: Vec<CartItemResponse>,
    pub subtotal_cents: i64,
    pub subtotal_display: String,
}

impl CartResponse {
    fn from_view(view: CartView, session_id: Option<String>) -> Self {
        let subtotal_cents = view.subtotal_cents();
        Self {
            session_id,
            items: view
                .items
                .into_iter()
                .map(|entry| {
                    let line_total_cents = entry.line_total_cents();
                    CartItemResponse {
                        product: ProductResponse::from(entry.product),
                        quantity: entry.quantity,
                        line_total_cents,
                        line_total_display: format_price(line_total_cents),
                    }
                })
                .collect(),
            subtotal_cents,
            subtotal_display: format_price(subtotal_cents),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

pub fn router(carts: Arc<CartService>) -> Router {
    Router::new()
        .route("/api/v1/cart", get(get_cart))
        .route("/api/v1/cart/items", put(set_quantity).post(add_item))
        .with_state(CartState { carts })
}

fn presented_session(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| SessionId(value.to_string()))
}

pub async fn get_cart(
    State(state): State<CartState>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiFailure> {
    let Some(session_id) = presented_session(&headers) else {
        // A browser with no session yet simply has an empty cart.
        return Ok(Json(CartResponse::from_view(
            CartView::empty(SessionId(String::new())),
            None,
        )));
    };

    let view = state.carts.cart(&session_id).await?;
    Ok(Json(CartResponse::from_view(view, Some(session_id.0))))
}

pub async fn set_quantity(
    State(state): State<CartState>,
    headers: HeaderMap,
    Json(request): Json<SetQuantityRequest>,
) -> Result<([(&'static str, String); 1], Json<CartResponse>), ApiFailure> {
    let session_id = presented_session(&headers).unwrap_or_else(SessionId::generate);
    let product_id = ProductId(request.product_id);

    let view = state.carts.set_quantity(&session_id, &product_id, request.quantity).await?;

    info!(
        event_name = "cart.quantity.set",
        session_id = %session_id,
        product_id = %product_id,
        quantity = request.quantity,
        "cart line updated"
    );

    Ok((
        [(SESSION_HEADER, session_id.0.clone())],
        Json(CartResponse::from_view(view, Some(session_id.0))),
    ))
}

pub async fn add_item(
    State(state): State<CartState>,
    headers: HeaderMap,
    Json(request): Json<AddItemRequest>,
) -> Result<([(&'static str, String); 1], Json<CartResponse>), ApiFailure> {
    let session_id = presented_session(&headers).unwrap_or_else(SessionId::generate);
    let product_id = ProductId(request.product_id);

    let view = state.carts.add_one(&session_id, &product_id).await?;

    info!(
        event_name = "cart.item.added",
        session_id = %session_id,
        product_id = %product_id,
        "cart line incremented"
    );

    Ok((
        [(SESSION_HEADER, session_id.0.clone())],
        Json(CartResponse::from_view(view, Some(session_id.0))),
    ))
}
