//! CLI entry point for the PATH delay alert bot.
//!
//! Meant to be invoked periodically by an external scheduler; each `check`
//! performs exactly one run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use path_delay_alert::analyzers::{classify, extract_details};
use path_delay_alert::config::Config;
use path_delay_alert::infra::ntfy::NtfyClient;
use path_delay_alert::infra::state::FileMarkerStore;
use path_delay_alert::infra::x::XTimelineClient;
use path_delay_alert::monitor::{Monitor, RunOutcome};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "path_delay_alert")]
#[command(about = "Push an alert when the PATH account posts a new delay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent posts and alert on a new delay
    Check {
        /// File holding the last evaluated post id (overrides STATE_FILE)
        #[arg(short, long, value_name = "PATH")]
        state_file: Option<PathBuf>,

        /// Evaluate without sending a notification or writing the marker
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Classify a piece of text without calling any API
    Classify {
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/path_delay_alert.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("path_delay_alert.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            state_file,
            dry_run,
        } => {
            let mut config = Config::from_env();
            if let Some(path) = state_file {
                config.state_file = path;
            }
            check(&config, dry_run).await?;
        }
        Commands::Classify { text } => {
            let verdict = classify(&text);
            let (line, time) = extract_details(&text);
            info!(
                is_delay = verdict.is_delay(),
                line = %line,
                time = %time,
                "{}",
                verdict.message()
            );
        }
    }

    Ok(())
}

/// Runs one poll. Missing credentials and fetch failures are reported and
/// end the run early without touching the marker.
#[tracing::instrument(skip(config), fields(state_file = %config.state_file.display()))]
async fn check(config: &Config, dry_run: bool) -> Result<()> {
    let timeline = match XTimelineClient::from_config(config) {
        Ok(timeline) => timeline,
        Err(e) => {
            error!(error = %e, "Cannot fetch posts. Set BEARER_TOKEN in the environment or .env file");
            return Ok(());
        }
    };
    let notifier = NtfyClient::from_config(config)?;
    let store = FileMarkerStore::new(&config.state_file);

    let monitor = Monitor::new(timeline, notifier, store, config.display_tz).dry_run(dry_run);

    match monitor.run_once().await {
        Ok(RunOutcome::NoPosts) => info!("Run finished without posts"),
        Ok(RunOutcome::Duplicate { id }) => info!(%id, "Run finished, no new posts"),
        Ok(RunOutcome::Alerted { id, delivered }) => {
            info!(%id, delivered, "Run finished with a delay alert")
        }
        Ok(RunOutcome::Quiet { id }) => info!(%id, "Run finished, no new delay"),
        Err(e) => error!(error = %e, "Run aborted; marker left unchanged"),
    }

    Ok(())
}
