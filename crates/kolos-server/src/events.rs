//! Real-time `call_data` events pushed to dashboard clients.
//!
//! Handlers receive an [`CallEventEmitter`] through `AppState`; the
//! production implementation is [`CallEventHub`], a broadcast channel that
//! the SSE endpoint subscribes to.

use chrono::{DateTime, Utc};
use kolos_core::{ProfileRecord, SignalRecord};
use kolos_retell::WebhookEventKind;
use serde::Serialize;
use tokio::sync::broadcast;

/// SSE event name for call results.
pub const CALL_DATA_EVENT: &str = "call_data";

/// Everything the dashboard needs after a call ends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDataEvent {
    pub event: WebhookEventKind,
    pub call_id: Option<String>,
    pub call_data: Option<serde_json::Value>,
    pub member_data: Option<ProfileRecord>,
    pub member_id: Option<String>,
    pub signals: Vec<SignalRecord>,
    pub timestamp: DateTime<Utc>,
}

/// Sink for call events. Emission is fire-and-forget and never fails the
/// caller.
pub trait CallEventEmitter: Send + Sync {
    fn emit(&self, event: CallDataEvent);
}

/// Broadcast hub fanning call events out to every connected subscriber.
#[derive(Debug, Clone)]
pub struct CallEventHub {
    tx: broadcast::Sender<CallDataEvent>,
}

impl CallEventHub {
    /// `capacity` bounds how many events a slow subscriber may lag behind
    /// before it starts missing them. Must be non-zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CallDataEvent> {
        self.tx.subscribe()
    }
}

impl CallEventEmitter for CallEventHub {
    fn emit(&self, event: CallDataEvent) {
        let call_id = event.call_id.clone().unwrap_or_default();
        match self.tx.send(event) {
            Ok(receivers) => {
                tracing::info!(call_id = %call_id, receivers, "emitted call data event");
            }
            Err(_) => {
                tracing::warn!(call_id = %call_id, "no subscribers for call data event");
            }
        }
    }
}
