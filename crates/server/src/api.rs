//! Shared JSON error surface for the API routers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::warn;

use storefront_db::ServiceError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Wraps a service failure so handlers can `?` their way out. Missing
/// records map to 404, rejected input to 400, and store trouble to 503.
#[derive(Debug)]
pub struct ApiFailure(pub ServiceError);

impl From<ServiceError> for ApiFailure {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status == StatusCode::SERVICE_UNAVAILABLE {
            warn!(event_name = "system.api.store_unavailable", error = %self.0, "request failed against the store");
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
