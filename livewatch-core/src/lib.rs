// src/lib.rs

pub mod config;
pub mod http;
pub mod monitor;
pub mod platforms;
pub mod shutdown;
pub mod tasks;

pub use config::{AppConfig, MonitorConfig};
pub use http::{DefaultHttpClient, HttpClient};
pub use livewatch_common::error::Error;
pub use shutdown::ShutdownSignal;
