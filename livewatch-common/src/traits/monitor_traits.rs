// File: livewatch-common/src/traits/monitor_traits.rs

use async_trait::async_trait;
use crate::error::Error;
use crate::models::NotificationTarget;

/// Asks a streaming platform whether a user is currently live.
///
/// Implementations should bound every call with a timeout; the poll loop has a single
/// thread of control and a stalled probe delays every later tick.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn is_user_live(&self, username: &str) -> Result<bool, Error>;
}

/// Delivers a text message to a chat channel over an already established session.
///
/// A target with a missing guild or channel is a logged no-op returning `Ok(())`.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, target: &NotificationTarget, message: &str) -> Result<(), Error>;
}
