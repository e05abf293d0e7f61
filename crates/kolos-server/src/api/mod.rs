mod members;
mod retell;
mod signals;
mod stream;
mod webhook;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use kolos_airtable::{AirtableClient, AirtableError};
use kolos_retell::RetellClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::events::{CallEventEmitter, CallEventHub};
use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub members: AirtableClient,
    /// `None` when no Retell API key is configured.
    pub retell: Option<RetellClient>,
    pub retell_agent_id: Option<String>,
    /// Where webhook results are published.
    pub emitter: Arc<dyn CallEventEmitter>,
    /// Source for the SSE stream.
    pub events: CallEventHub,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
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
    #[serde(skip)]
    status: Option<StatusCode>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    retell: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
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
                details: None,
            },
            meta: ResponseMeta::new(request_id.into()),
            status: None,
        }
    }

    /// Overrides the status derived from the error code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.error.details = Some(details.into());
        self
    }

    fn status_code(&self) -> StatusCode {
        if let Some(status) = self.status {
            return status;
        }
        match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}

pub(super) fn map_store_error(request_id: String, error: &AirtableError) -> ApiError {
    tracing::error!(error = %error, "member store request failed");
    ApiError::new(request_id, "upstream_error", "member store request failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/webhook/retell", post(webhook::retell_webhook))
        .route("/api/v1/events", get(stream::call_events))
        .route(
            "/api/v1/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/api/v1/members/latest", get(members::latest_member))
        .route("/api/v1/members/{id}", get(members::get_member))
        .route(
            "/api/v1/signals",
            get(signals::signals_for_member).post(signals::signals_for_profile),
        )
        .route(
            "/api/v1/retell/access-token",
            get(retell::access_token_status).post(retell::create_access_token),
        )
        .route("/api/v1/retell/calls/{call_id}", get(retell::get_call))
}

pub fn build_app(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let retell = if state.retell.is_some() {
        "configured"
    } else {
        "unconfigured"
    };

    (
        StatusCode::OK,
        Json(ApiResponse::new(
            HealthData {
                status: "ok",
                retell,
            },
            req_id.0,
        )),
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
