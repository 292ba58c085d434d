// File: src/monitor/mod.rs

pub mod state;
pub mod transition_monitor;

pub use state::{MonitorState, Transition, LIVE_CONFIRMATIONS, OFFLINE_CONFIRMATIONS};
pub use transition_monitor::{live_message, TickOutcome, TransitionMonitor};
