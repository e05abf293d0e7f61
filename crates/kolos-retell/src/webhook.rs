//! Inbound webhook payloads.
//!
//! Retell posts `{ "event": "<name>", "call": { ... } }` for every call
//! lifecycle change. Only the documented event names are modelled; any other
//! value deserializes to [`WebhookEventKind::Unknown`] so it can still be
//! acknowledged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventKind {
    CallStarted,
    CallEnded,
    CallAnalyzed,
    #[serde(other)]
    Unknown,
}

impl WebhookEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WebhookEventKind::CallStarted => "call_started",
            WebhookEventKind::CallEnded => "call_ended",
            WebhookEventKind::CallAnalyzed => "call_analyzed",
            WebhookEventKind::Unknown => "unknown",
        }
    }
}

/// The `call` object embedded in a webhook. Fields beyond the id and
/// transcript are kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookCall {
    #[serde(default)]
    pub call_id: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WebhookCall {
    /// The transcript, if present and not blank.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: WebhookEventKind,
    #[serde(default)]
    pub call: Option<WebhookCall>,
}

impl WebhookPayload {
    #[must_use]
    pub fn call_id(&self) -> Option<&str> {
        self.call.as_ref().and_then(|c| c.call_id.as_deref())
    }

    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.call.as_ref().and_then(WebhookCall::transcript)
    }
}
