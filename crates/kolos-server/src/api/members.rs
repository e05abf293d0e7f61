use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kolos_airtable::MemberRecord;
use kolos_core::{generate_signals_now, ProfileRecord, SignalRecord};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatedMember {
    member_id: String,
    signals_count: usize,
    signals: Vec<SignalRecord>,
}

pub(super) async fn list_members(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MemberRecord>>>, ApiError> {
    let members = state
        .members
        .list_members()
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(members, req_id.0)))
}

pub(super) async fn latest_member(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<MemberRecord>>, ApiError> {
    let member = state
        .members
        .latest_member()
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no members recorded"))?;

    Ok(Json(ApiResponse::new(member, req_id.0)))
}

pub(super) async fn get_member(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MemberRecord>>, ApiError> {
    let member = state
        .members
        .get_member(&id)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "not_found", format!("member '{id}' not found"))
        })?;

    Ok(Json(ApiResponse::new(member, req_id.0)))
}

/// Manual member entry: persists the profile, then derives signals from it.
pub(super) async fn create_member(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(profile): Json<ProfileRecord>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedMember>>), ApiError> {
    let member_id = state
        .members
        .create_member(&profile)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let signals = generate_signals_now(&profile);
    tracing::info!(member_id = %member_id, signals = signals.len(), "member created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            CreatedMember {
                member_id,
                signals_count: signals.len(),
                signals,
            },
            req_id.0,
        )),
    ))
}
