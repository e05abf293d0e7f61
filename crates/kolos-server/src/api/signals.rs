use axum::{
    extract::{Query, State},
    Extension, Json,
};
use kolos_core::{generate_signals_now, ProfileRecord, SignalRecord};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignalsQuery {
    pub member_id: Option<String>,
}

/// Signals for a stored member, regenerated from its current profile.
pub(super) async fn signals_for_member(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SignalsQuery>,
) -> Result<Json<ApiResponse<Vec<SignalRecord>>>, ApiError> {
    let member_id = query
        .member_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "memberId is required"))?;

    let member = state
        .members
        .get_member(member_id)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("member '{member_id}' not found"),
            )
        })?;

    let signals = generate_signals_now(&member.profile);
    Ok(Json(ApiResponse::new(signals, req_id.0)))
}

/// Signals for an ad-hoc profile. Nothing is persisted.
pub(super) async fn signals_for_profile(
    Extension(req_id): Extension<RequestId>,
    Json(profile): Json<ProfileRecord>,
) -> Json<ApiResponse<Vec<SignalRecord>>> {
    Json(ApiResponse::new(generate_signals_now(&profile), req_id.0))
}
