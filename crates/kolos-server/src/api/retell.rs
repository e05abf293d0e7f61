use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kolos_retell::{RetellClient, RetellError};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccessTokenStatus {
    agent_id_configured: bool,
    api_key_configured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccessToken {
    access_token: String,
    call_id: String,
}

pub(super) async fn access_token_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<AccessTokenStatus>> {
    Json(ApiResponse::new(
        AccessTokenStatus {
            agent_id_configured: state.retell_agent_id.is_some(),
            api_key_configured: state.retell.is_some(),
        },
        req_id.0,
    ))
}

/// Starts a browser web call against the configured agent.
pub(super) async fn create_access_token(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<AccessToken>>, ApiError> {
    let client = configured_client(&state, &req_id.0)?;
    let agent_id = state.retell_agent_id.as_deref().ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_configured",
            "Retell agent id not configured",
        )
    })?;

    let call = client
        .create_web_call(agent_id)
        .await
        .map_err(|e| map_retell_error(req_id.0.clone(), &e))?;

    tracing::info!(call_id = %call.call_id, "web call created");

    Ok(Json(ApiResponse::new(
        AccessToken {
            access_token: call.access_token,
            call_id: call.call_id,
        },
        req_id.0,
    )))
}

pub(super) async fn get_call(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(call_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let client = configured_client(&state, &req_id.0)?;

    let call = client
        .get_call(&call_id)
        .await
        .map_err(|e| map_retell_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(call, req_id.0)))
}

fn configured_client<'a>(
    state: &'a AppState,
    request_id: &str,
) -> Result<&'a RetellClient, ApiError> {
    state.retell.as_ref().ok_or_else(|| {
        ApiError::new(
            request_id,
            "not_configured",
            "Retell API key not configured",
        )
    })
}

/// Upstream HTTP failures keep Retell's status and body; anything else is a
/// plain internal error.
fn map_retell_error(request_id: String, error: &RetellError) -> ApiError {
    tracing::error!(error = %error, "retell request failed");
    match error {
        RetellError::Status { status, body } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            ApiError::new(request_id, "upstream_error", "Retell request failed")
                .with_status(status)
                .with_details(body.clone())
        }
        _ => ApiError::new(request_id, "internal_error", "Retell request failed")
            .with_details(error.to_string()),
    }
}
