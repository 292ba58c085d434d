// File: src/platforms/twitch/mod.rs

pub mod client;
pub mod requests;

pub use client::TwitchGqlClient;

/// Public channel page for a Twitch login.
pub fn stream_url(username: &str) -> String {
    format!("https://twitch.tv/{}", username)
}
