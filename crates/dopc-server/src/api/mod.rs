mod delivery;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use dopc_core::{PricingError, PricingOrchestrator};
use dopc_venue::VenueClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingOrchestrator<VenueClient>>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
    /// Overrides the status derived from `error.code`.
    #[serde(skip)]
    status: Option<StatusCode>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Welcome {
    message: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
            status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status.unwrap_or(match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" | "delivery_not_available" => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        });
        (status, Json(self)).into_response()
    }
}

/// Upstream status to pass through, when it is an error status.
fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(super) fn map_pricing_error(request_id: String, error: &PricingError) -> ApiError {
    match error {
        PricingError::OutOfRange { .. } => ApiError::new(
            request_id,
            "delivery_not_available",
            "Delivery not available for this distance.",
        ),
        PricingError::InvalidRequest(validation) => {
            ApiError::new(request_id, "validation_error", validation.to_string())
        }
        PricingError::VenueData(message) => {
            tracing::error!(error = %message, "venue data failed validation");
            ApiError::new(request_id, "venue_data_error", error.to_string())
        }
        PricingError::Gateway { status, message } => {
            tracing::error!(upstream_status = ?status, error = %message, "venue data service failed");
            ApiError::new(request_id, "upstream_error", error.to_string())
                .with_status(upstream_status(*status))
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/delivery-order-price",
            get(delivery::delivery_order_price),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(Welcome {
        message: "Welcome to the Delivery Order Price Calculator API!",
    })
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
