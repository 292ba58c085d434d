//! HTTP client abstraction for the streaming-platform probe.
//!
//! The probe talks to its backend through the [`HttpClient`] trait so tests can feed it
//! canned response bodies without touching the network. [`DefaultHttpClient`] wraps
//! reqwest and is what the server wires in.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::trace;

use crate::Error;

/// A generic trait for making HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POSTs `body` as JSON and returns the response body text.
    /// Non-success status codes are errors.
    async fn post_json(
        &self,
        url: String,
        headers: HashMap<String, String>,
        body: serde_json::Value,
    ) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    /// Every request made through this client is cut off after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_json(
        &self,
        url: String,
        headers: HashMap<String, String>,
        body: serde_json::Value,
    ) -> Result<String, Error> {
        let mut request = self.client.post(&url).json(&body);
        for (key, value) in headers {
            request = request.header(&key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!("POST {} => HTTP {}", url, status);

        if !status.is_success() {
            return Err(Error::Platform(format!("POST {url}: HTTP {status} => {text}")));
        }
        Ok(text)
    }
}
