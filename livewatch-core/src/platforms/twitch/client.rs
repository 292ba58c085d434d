// File: livewatch-core/src/platforms/twitch/client.rs

use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;

use crate::Error;
use crate::http::HttpClient;
use crate::platforms::StatusProbe;
use crate::platforms::twitch::requests::stream::fetch_stream_status;

pub const GQL_ENDPOINT: &str = "https://gql.twitch.tv/gql";

/// Client id of the public Twitch web player. The GQL endpoint accepts it without OAuth.
pub const PUBLIC_CLIENT_ID: &str = "kimne78kx3ncx6brgo4mv6wki5h1ko";

/// A small wrapper client for the unauthenticated Twitch GraphQL endpoint.
pub struct TwitchGqlClient {
    http: Arc<dyn HttpClient>,
    endpoint: String,
    client_id: String,
}

impl TwitchGqlClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            endpoint: GQL_ENDPOINT.to_string(),
            client_id: PUBLIC_CLIENT_ID.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn http_client(&self) -> Arc<dyn HttpClient> {
        self.http.clone()
    }
}

#[async_trait]
impl StatusProbe for TwitchGqlClient {
    async fn is_user_live(&self, username: &str) -> Result<bool, Error> {
        let status = fetch_stream_status(self, username).await?;
        debug!("Twitch GQL: '{}' live={} (stream_id={:?})", username, status.is_live(), status.stream_id);
        Ok(status.is_live())
    }
}
