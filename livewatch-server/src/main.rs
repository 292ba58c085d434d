use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use livewatch_common::traits::{NotificationSink, PlatformAuth, PlatformIntegration};
use livewatch_core::monitor::TransitionMonitor;
use livewatch_core::platforms::discord::{DiscordPlatform, LoggingNotifier};
use livewatch_core::platforms::twitch::TwitchGqlClient;
use livewatch_core::tasks::spawn_stream_monitor_task;
use livewatch_core::{AppConfig, DefaultHttpClient, Error, MonitorConfig, ShutdownSignal};

#[derive(Parser, Debug, Clone)]
#[command(name = "livewatch")]
#[command(author, version, about = "Monitor a Twitch user's stream and send Discord notifications.")]
struct Args {
    /// Twitch username to monitor
    username: String,

    /// Poll interval in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval: u64,

    /// Give up on a single status query after this many seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    probe_timeout: u64,

    /// Log notifications instead of connecting to Discord
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["livewatch=info", "livewatch_core=info", "livewatch_server=info"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(
        "livewatch starting. username={}, poll_interval={}s, dry_run={}",
        args.username, args.poll_interval, args.dry_run
    );

    if let Err(e) = run(args).await {
        error!("livewatch error: {:?}", e);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run(args: Args) -> Result<(), Error> {
    let config = AppConfig::from_env();
    let monitor_config = MonitorConfig::new(args.username.clone())
        .with_poll_interval(Duration::from_secs(args.poll_interval))
        .with_probe_timeout(Duration::from_secs(args.probe_timeout));

    let http = DefaultHttpClient::with_timeout(monitor_config.probe_timeout)?;
    let probe = Arc::new(TwitchGqlClient::new(Arc::new(http)));

    let mut discord = None;
    let sink: Arc<dyn NotificationSink> = if args.dry_run {
        info!("Dry run: notifications will only be logged.");
        Arc::new(LoggingNotifier)
    } else {
        let token = config
            .discord_token
            .clone()
            .ok_or_else(|| Error::Config("DISCORD_BOT_TOKEN is not set".into()))?;
        let mut platform = DiscordPlatform::new(token);
        platform.authenticate().await?;
        platform.connect().await?;
        let notifier = platform.notifier()?;
        discord = Some(platform);
        Arc::new(notifier)
    };

    let monitor = TransitionMonitor::new(
        monitor_config.username.clone(),
        config.target.clone(),
        probe,
        sink,
    )
    .with_probe_timeout(monitor_config.probe_timeout);

    let shutdown = ShutdownSignal::new();
    let mut monitor_task =
        spawn_stream_monitor_task(monitor, monitor_config.poll_interval, shutdown.subscribe());

    supervise(tokio::signal::ctrl_c(), &shutdown, &mut monitor_task).await;

    if let Some(mut platform) = discord {
        platform.disconnect().await?;
    }
    Ok(())
}

/// Waits for Ctrl-C, then stops the monitor. If the Ctrl-C handler cannot be installed
/// the monitor keeps running until the process is killed.
async fn supervise<F>(ctrl_c: F, shutdown: &ShutdownSignal, monitor_task: &mut JoinHandle<()>)
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = ctrl_c => {
            match res {
                Ok(()) => {
                    info!("Ctrl-C received => shutting down.");
                    shutdown.trigger();
                }
                Err(e) => error!("Failed to listen for Ctrl-C, running until killed: {:?}", e),
            }
            if let Err(e) = (&mut *monitor_task).await {
                error!("Stream monitor task failed: {:?}", e);
            }
        }
        res = &mut *monitor_task => {
            warn!("Stream monitor task ended unexpectedly: {:?}", res);
        }
    }
}
