// src/tasks/stream_monitor.rs

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::monitor::TransitionMonitor;

/// Sleeps for `interval` unless shutdown is signalled first.
/// Returns `true` when the caller should stop.
async fn wait_or_shutdown(interval: Duration, shutdown_rx: &mut watch::Receiver<bool>) -> bool {
    let deadline = Instant::now() + interval;
    loop {
        tokio::select! {
            biased;
            changed = shutdown_rx.changed() => {
                match changed {
                    Ok(()) if *shutdown_rx.borrow() => return true,
                    Ok(()) => continue,
                    Err(_) => {
                        warn!("Shutdown sender dropped => stopping stream monitor.");
                        return true;
                    }
                }
            }
            _ = sleep_until(deadline) => return false,
        }
    }
}

/// Ticks `monitor` immediately, then once per `poll_interval`, until shutdown.
pub async fn run_stream_monitor(
    mut monitor: TransitionMonitor,
    poll_interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(
        "Stream monitor started for '{}' (poll interval {:?}).",
        monitor.username(),
        poll_interval
    );

    loop {
        if *shutdown_rx.borrow() {
            break;
        }
        monitor.tick().await;
        if wait_or_shutdown(poll_interval, &mut shutdown_rx).await {
            break;
        }
    }

    info!("Stream monitor for '{}' shutting down.", monitor.username());
}

/// Spawns [`run_stream_monitor`] as a background task.
pub fn spawn_stream_monitor_task(
    monitor: TransitionMonitor,
    poll_interval: Duration,
    shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run_stream_monitor(monitor, poll_interval, shutdown_rx))
}
