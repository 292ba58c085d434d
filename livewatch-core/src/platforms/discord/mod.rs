// File: src/platforms/discord/mod.rs

pub mod notifier;
pub mod runtime;

pub use notifier::{DiscordNotifier, LoggingNotifier};
pub use runtime::DiscordPlatform;
