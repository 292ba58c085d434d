use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use twilight_http::Client as HttpClient;
use twilight_model::channel::ChannelType;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::NotificationSink;
use livewatch_common::models::NotificationTarget;

pub const MISSING_CONFIGURATION: &str =
    "Missing required configuration. Please check your environment variables.";

/// Parses a Discord snowflake. Zero and non-numeric values are rejected.
pub fn parse_snowflake<M>(raw: &str, what: &str) -> Result<Id<M>, Error> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(Id::<M>::new_checked)
        .ok_or_else(|| Error::Config(format!("Invalid {what} ID: {raw}")))
}

/// Checks that a fetched channel lives in the configured guild and accepts text.
pub fn ensure_text_channel(
    kind: ChannelType,
    channel_guild: Option<Id<GuildMarker>>,
    guild_id: Id<GuildMarker>,
    channel_id: Id<ChannelMarker>,
) -> Result<(), Error> {
    let in_guild = channel_guild == Some(guild_id);
    let accepts_text = matches!(kind, ChannelType::GuildText | ChannelType::GuildAnnouncement);
    if in_guild && accepts_text {
        Ok(())
    } else {
        Err(Error::Platform(format!(
            "Channel with ID {channel_id} not found or is not a text channel."
        )))
    }
}

/// Send-only handle onto a connected Discord session.
///
/// Cheap to clone; all clones share the session's REST client.
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<HttpClient>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn notify(&self, target: &NotificationTarget, message: &str) -> Result<(), Error> {
        let Some((guild_raw, channel_raw)) = target.resolved() else {
            error!("{}", MISSING_CONFIGURATION);
            return Ok(());
        };

        let guild_id = parse_snowflake::<GuildMarker>(guild_raw, "guild")?;
        let channel_id = parse_snowflake::<ChannelMarker>(channel_raw, "channel")?;

        let guild = self
            .http
            .guild(guild_id)
            .await
            .map_err(|e| Error::Platform(format!("Guild with ID {guild_id} not found: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing guild {guild_id}: {e}")))?;

        let channel = self
            .http
            .channel(channel_id)
            .await
            .map_err(|e| {
                Error::Platform(format!(
                    "Channel with ID {channel_id} not found or is not a text channel: {e}"
                ))
            })?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing channel {channel_id}: {e}")))?;

        ensure_text_channel(channel.kind, channel.guild_id, guild.id, channel_id)?;

        self.http
            .create_message(channel_id)
            .content(message)
            .await
            .map_err(|e| Error::Platform(format!("Error sending Discord message: {e:?}")))?;

        info!("Notification sent: {}", message);
        Ok(())
    }
}

/// Stand-in sink for `--dry-run`: logs what would have been sent.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationSink for LoggingNotifier {
    async fn notify(&self, target: &NotificationTarget, message: &str) -> Result<(), Error> {
        match target.resolved() {
            Some((guild, channel)) => {
                info!("(dry-run) would send to guild={} channel={}: {}", guild, channel, message)
            }
            None => error!("{} (dry-run) would have sent: {}", MISSING_CONFIGURATION, message),
        }
        Ok(())
    }
}
