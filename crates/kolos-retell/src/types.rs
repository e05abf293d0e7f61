//! Retell REST response types.

use serde::{Deserialize, Serialize};

/// Result of `POST /v2/create-web-call`: the token a browser client uses to
/// join the call, and the call id that later appears in webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebCall {
    #[serde(alias = "token")]
    pub access_token: String,
    pub call_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateWebCallRequest<'a> {
    pub agent_id: &'a str,
}
