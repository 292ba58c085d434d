// tests/twitch_probe_tests.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use livewatch_core::Error;
use livewatch_core::http::HttpClient;
use livewatch_core::platforms::StatusProbe;
use livewatch_core::platforms::twitch::client::{GQL_ENDPOINT, PUBLIC_CLIENT_ID};
use livewatch_core::platforms::twitch::{stream_url, TwitchGqlClient};

mock! {
    Http {}
    #[async_trait]
    impl HttpClient for Http {
        async fn post_json(
            &self,
            url: String,
            headers: HashMap<String, String>,
            body: serde_json::Value,
        ) -> Result<String, Error>;
    }
}

fn client_returning(body: &'static str) -> TwitchGqlClient {
    let mut http = MockHttp::new();
    http.expect_post_json()
        .times(1)
        .returning(move |_, _, _| Ok(body.to_string()));
    TwitchGqlClient::new(Arc::new(http))
}

#[test]
fn stream_url_points_at_channel_page() {
    assert_eq!(stream_url("some_streamer"), "https://twitch.tv/some_streamer");
}

#[tokio::test]
async fn sends_query_with_public_client_id() {
    let mut http = MockHttp::new();
    http.expect_post_json()
        .withf(|url, headers, body| {
            url == GQL_ENDPOINT
                && headers.get("Client-Id").map(String::as_str) == Some(PUBLIC_CLIENT_ID)
                && body["query"] == r#"query { user(login: "some_streamer") { stream { id } } }"#
                && body["variables"] == serde_json::json!({})
        })
        .times(1)
        .returning(|_, _, _| Ok(r#"{"data":{"user":{"stream":null}}}"#.to_string()));

    let client = TwitchGqlClient::new(Arc::new(http));
    assert!(!client.is_user_live("some_streamer").await.unwrap());
}

#[tokio::test]
async fn stream_object_means_live() {
    let client = client_returning(r#"{"data":{"user":{"stream":{"id":"318245"}}}}"#);
    assert!(client.is_user_live("some_streamer").await.unwrap());
}

#[tokio::test]
async fn null_stream_means_offline() {
    let client = client_returning(r#"{"data":{"user":{"stream":null}}}"#);
    assert!(!client.is_user_live("some_streamer").await.unwrap());
}

#[tokio::test]
async fn unknown_login_is_an_error() {
    let client = client_returning(r#"{"data":{"user":null}}"#);
    let err = client.is_user_live("nobody_here").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn transport_errors_propagate() {
    let mut http = MockHttp::new();
    http.expect_post_json()
        .returning(|_, _, _| Err(Error::Platform("HTTP 503".into())));

    let client = TwitchGqlClient::new(Arc::new(http));
    assert!(client.is_user_live("some_streamer").await.is_err());
}

#[tokio::test]
async fn custom_endpoint_is_used() {
    let mut http = MockHttp::new();
    http.expect_post_json()
        .withf(|url, _, _| url == "http://localhost:9/gql")
        .times(1)
        .returning(|_, _, _| Ok(r#"{"data":{"user":{"stream":null}}}"#.to_string()));

    let client = TwitchGqlClient::new(Arc::new(http)).with_endpoint("http://localhost:9/gql");
    assert!(!client.is_user_live("x").await.unwrap());
}
