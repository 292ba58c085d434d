// File: livewatch-common/src/traits/mod.rs
pub mod monitor_traits;
pub mod platform_traits;

pub use monitor_traits::{NotificationSink, StatusProbe};
pub use platform_traits::{ConnectionStatus, PlatformAuth, PlatformIntegration};
