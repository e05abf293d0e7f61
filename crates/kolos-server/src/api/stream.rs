//! `GET /api/v1/events`: server-sent stream of `call_data` events.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{stream, Stream};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::events::{CallDataEvent, CALL_DATA_EVENT};

use super::AppState;

pub(super) async fn call_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("event stream subscriber connected");
    Sse::new(event_stream(state.events.subscribe())).keep_alive(KeepAlive::default())
}

fn event_stream(
    rx: broadcast::Receiver<CallDataEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event(CALL_DATA_EVENT).json_data(&event) {
                    Ok(sse) => return Some((Ok(sse), rx)),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode call data event");
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event stream subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}
