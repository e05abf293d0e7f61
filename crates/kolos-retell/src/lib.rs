//! Client and webhook types for the Retell voice-call API.

pub mod client;
pub mod error;
pub mod types;
pub mod webhook;

pub use client::RetellClient;
pub use error::RetellError;
pub use types::WebCall;
pub use webhook::{WebhookCall, WebhookEventKind, WebhookPayload};
