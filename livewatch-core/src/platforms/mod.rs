// File: src/platforms/mod.rs

pub mod discord;
pub mod twitch;

pub use livewatch_common::traits::{
    ConnectionStatus, NotificationSink, PlatformAuth, PlatformIntegration, StatusProbe,
};
