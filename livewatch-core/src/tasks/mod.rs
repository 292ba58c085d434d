// src/tasks/mod.rs

pub mod stream_monitor;

pub use stream_monitor::{run_stream_monitor, spawn_stream_monitor_task};
