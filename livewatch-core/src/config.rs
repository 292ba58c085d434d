// File: livewatch-core/src/config.rs

use std::time::Duration;
use tracing::{info, warn};

use livewatch_common::models::NotificationTarget;

pub const DISCORD_TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const DISCORD_CHANNEL_VAR: &str = "DISCORD_CHANNEL_ID";
pub const DISCORD_GUILD_VAR: &str = "DISCORD_GUILD_ID";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings read once at startup from the environment (and `.env`).
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub discord_token: Option<String>,
    pub target: NotificationTarget,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the Discord variables from the process environment.
    pub fn from_env() -> Self {
        match dotenv::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Could not read .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup(DISCORD_TOKEN_VAR).filter(|t| !t.trim().is_empty());
        let target = NotificationTarget::new(lookup(DISCORD_GUILD_VAR), lookup(DISCORD_CHANNEL_VAR));

        if target.resolved().is_none() {
            warn!(
                "{} / {} not fully configured; live notifications will be skipped.",
                DISCORD_GUILD_VAR, DISCORD_CHANNEL_VAR
            );
        }

        Self { discord_token, target }
    }
}

/// What to watch and how often.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub username: String,
    pub poll_interval: Duration,
    pub probe_timeout: Duration,
}

impl MonitorConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
