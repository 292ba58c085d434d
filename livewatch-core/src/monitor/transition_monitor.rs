// File: livewatch-core/src/monitor/transition_monitor.rs

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use livewatch_common::models::NotificationTarget;

use crate::Error;
use crate::config::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::monitor::state::{MonitorState, Transition};
use crate::platforms::twitch::stream_url;
use crate::platforms::{NotificationSink, StatusProbe};

/// Text posted when `username` is confirmed live.
pub fn live_message(username: &str) -> String {
    format!("{} has started streaming at {}", username, stream_url(username))
}

/// Result of a single [`TransitionMonitor::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Unchanged,
    /// `notified` is false when the sink returned an error. The state is live either way.
    WentLive { notified: bool },
    WentOffline,
    /// The probe errored or timed out. Streaks were left untouched.
    ProbeFailed,
}

/// Polls one user through a [`StatusProbe`] and announces confirmed go-lives through a
/// [`NotificationSink`].
pub struct TransitionMonitor {
    username: String,
    target: NotificationTarget,
    probe: Arc<dyn StatusProbe>,
    sink: Arc<dyn NotificationSink>,
    probe_timeout: Duration,
    state: MonitorState,
}

impl TransitionMonitor {
    pub fn new(
        username: impl Into<String>,
        target: NotificationTarget,
        probe: Arc<dyn StatusProbe>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            username: username.into(),
            target,
            probe,
            sink,
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            state: MonitorState::new(),
        }
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    async fn probe_once(&self) -> Result<bool, Error> {
        tokio::time::timeout(self.probe_timeout, self.probe.is_user_live(&self.username)).await?
    }

    /// One probe plus one step of the hysteresis rule.
    ///
    /// Probe failures are not counted as "not live": a flaky backend must not be able to
    /// end a confirmed stream and re-arm the notification.
    pub async fn tick(&mut self) -> TickOutcome {
        let is_live = match self.probe_once().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Probe for '{}' failed, skipping this tick: {}", self.username, e);
                return TickOutcome::ProbeFailed;
            }
        };
        debug!(
            "Probe '{}': live={} (live_streak={}, offline_streak={})",
            self.username,
            is_live,
            self.state.live_streak(),
            self.state.offline_streak()
        );

        match self.state.observe(is_live) {
            Some(Transition::WentLive) => {
                let message = live_message(&self.username);
                let notified = match self.sink.notify(&self.target, &message).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Failed to send live notification for '{}': {}", self.username, e);
                        false
                    }
                };
                info!("{} started streaming.", self.username);
                TickOutcome::WentLive { notified }
            }
            Some(Transition::WentOffline) => {
                info!("{} is not streaming.", self.username);
                TickOutcome::WentOffline
            }
            None => TickOutcome::Unchanged,
        }
    }
}
