//! Game Hub binary entrypoint kept minimal. The session lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use gamehub::args::{Args, determine_log_level};

struct HubTimer;

impl tracing_subscriber::fmt::time::FormatTime for HubTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter.
///
/// Inputs:
/// - `level`: Level from the command line
///
/// Output:
/// - `RUST_LOG` filter when set, else `level`
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Initialize tracing writing to `{config}/logs/gamehub.log`, or stderr when that fails.
fn init_logging(level: &str) {
    let log_path = gamehub::config::logs_dir().join("gamehub.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(HubTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so the session still runs
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(HubTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();
    init_logging(&determine_log_level(&args));

    tracing::info!("Game Hub starting");
    let code = match gamehub::app::run(&args).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gamehub: {err}");
            tracing::error!(error = %err, "Session failed");
            std::process::ExitCode::FAILURE
        }
    };
    tracing::info!("Game Hub exited");
    code
}
