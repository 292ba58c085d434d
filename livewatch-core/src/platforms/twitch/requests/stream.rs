// ========================================================
// File: livewatch-core/src/platforms/twitch/requests/stream.rs
// ========================================================
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Error;
use crate::platforms::twitch::client::TwitchGqlClient;

/// Body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GqlRequest {
    pub query: String,
    pub variables: serde_json::Map<String, serde_json::Value>,
}

/// `{ data: { user: { stream: { id } | null } | null } }`
#[derive(Debug, Deserialize)]
pub struct StreamStatusResponse {
    pub data: Option<StreamStatusData>,
    #[serde(default)]
    pub errors: Vec<GqlError>,
}

#[derive(Debug, Deserialize)]
pub struct StreamStatusData {
    pub user: Option<GqlUser>,
}

#[derive(Debug, Deserialize)]
pub struct GqlUser {
    pub stream: Option<GqlStream>,
}

#[derive(Debug, Deserialize)]
pub struct GqlStream {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct GqlError {
    pub message: String,
}

/// What the probe learned about a single login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStatus {
    pub stream_id: Option<String>,
}

impl StreamStatus {
    pub fn is_live(&self) -> bool {
        self.stream_id.is_some()
    }
}

/// Builds the `user(login:) { stream { id } }` query for `username`.
///
/// The login is embedded as a JSON string literal, which is also a valid GraphQL string.
pub fn build_stream_status_query(username: &str) -> Result<GqlRequest, Error> {
    let login = serde_json::to_string(username)?;
    Ok(GqlRequest {
        query: format!("query {{ user(login: {login}) {{ stream {{ id }} }} }}"),
        variables: serde_json::Map::new(),
    })
}

/// Interprets a raw GQL response body. A null `stream` means offline; a null `user`
/// means the login does not exist.
pub fn parse_stream_status(body: &str, username: &str) -> Result<StreamStatus, Error> {
    let resp: StreamStatusResponse = serde_json::from_str(body)
        .map_err(|e| Error::Platform(format!("stream status parse error: {}", e)))?;

    let data = match resp.data {
        Some(d) => d,
        None => {
            let reasons: Vec<String> = resp.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::Platform(format!(
                "stream status: no data in response ({})",
                reasons.join("; ")
            )));
        }
    };

    let user = data
        .user
        .ok_or_else(|| Error::NotFound(format!("Twitch user '{}' not found", username)))?;

    Ok(StreamStatus {
        stream_id: user.stream.map(|s| s.id),
    })
}

/// Asks Twitch whether `username` currently has a live stream.
pub async fn fetch_stream_status(
    client: &TwitchGqlClient,
    username: &str,
) -> Result<StreamStatus, Error> {
    let request = build_stream_status_query(username)?;

    let mut headers = HashMap::new();
    headers.insert("Client-Id".to_string(), client.client_id().to_string());

    let body = client
        .http_client()
        .post_json(client.endpoint().to_string(), headers, serde_json::to_value(&request)?)
        .await?;
    trace!("stream status body for '{}': {}", username, body);

    parse_stream_status(&body, username)
}
