//! `POST /api/v1/webhook/retell`
//!
//! Every delivery is acknowledged with `200 {"message":"Webhook received"}`,
//! including malformed bodies and unknown events, so Retell never retries.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::Utc;
use kolos_retell::{WebhookEventKind, WebhookPayload};
use serde::Serialize;

use crate::events::CallDataEvent;
use crate::intake::{ingest_transcript, IntakeOutcome};

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct WebhookAck {
    message: &'static str,
}

fn ack() -> (StatusCode, Json<WebhookAck>) {
    (
        StatusCode::OK,
        Json(WebhookAck {
            message: "Webhook received",
        }),
    )
}

pub(super) async fn retell_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<WebhookAck>) {
    let raw: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "webhook body is not valid JSON");
            return ack();
        }
    };

    let event_name = raw
        .get("event")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let payload: WebhookPayload = match serde_json::from_value(raw) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(event = %event_name, error = %e, "webhook payload rejected");
            return ack();
        }
    };

    let call_id = payload.call_id().unwrap_or_default();

    match payload.event {
        WebhookEventKind::CallStarted => {
            tracing::info!(call_id, "call started");
        }
        WebhookEventKind::CallEnded => {
            tracing::info!(call_id, "call ended");
            handle_call_ended(&state, &payload).await;
        }
        WebhookEventKind::CallAnalyzed => {
            tracing::info!(call_id, "call analyzed");
            if let Some(transcript) = payload.transcript() {
                let outcome =
                    ingest_transcript(&state.members, transcript, payload.call_id()).await;
                tracing::info!(
                    call_id,
                    member_id = outcome.member_id.as_deref().unwrap_or_default(),
                    "analyzed call processed"
                );
            }
        }
        WebhookEventKind::Unknown => {
            tracing::info!(event = %event_name, call_id, "received unknown webhook event");
        }
    }

    ack()
}

async fn handle_call_ended(state: &AppState, payload: &WebhookPayload) {
    let call_data = fetch_call_data(state, payload.call_id()).await;

    let (member_data, member_id, signals) = match payload.transcript() {
        Some(transcript) => {
            let IntakeOutcome {
                profile,
                member_id,
                signals,
            } = ingest_transcript(&state.members, transcript, payload.call_id()).await;
            (Some(profile), member_id, signals)
        }
        None => (None, None, Vec::new()),
    };

    state.emitter.emit(CallDataEvent {
        event: WebhookEventKind::CallEnded,
        call_id: payload.call_id().map(str::to_owned),
        call_data,
        member_data,
        member_id,
        signals,
        timestamp: Utc::now(),
    });
}

async fn fetch_call_data(state: &AppState, call_id: Option<&str>) -> Option<serde_json::Value> {
    let call_id = call_id?;
    let Some(retell) = state.retell.as_ref() else {
        tracing::warn!(call_id, "retell client not configured; skipping call detail");
        return None;
    };

    match retell.get_call(call_id).await {
        Ok(detail) => Some(detail),
        Err(e) => {
            tracing::error!(call_id, error = %e, "failed to fetch call detail");
            None
        }
    }
}
