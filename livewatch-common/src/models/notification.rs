/// Where a live notification should land on Discord.
///
/// Both ids are kept as the raw strings read from the environment. Either may be
/// missing, in which case the notifier logs and skips the send instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTarget {
    pub guild_id: Option<String>,
    pub channel_id: Option<String>,
}

impl NotificationTarget {
    pub fn new(guild_id: Option<String>, channel_id: Option<String>) -> Self {
        Self {
            guild_id: guild_id.filter(|s| !s.trim().is_empty()),
            channel_id: channel_id.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Returns `(guild_id, channel_id)` only when both are configured.
    pub fn resolved(&self) -> Option<(&str, &str)> {
        match (&self.guild_id, &self.channel_id) {
            (Some(g), Some(c)) => Some((g.as_str(), c.as_str())),
            _ => None,
        }
    }
}
