use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";

/// Run log: human-readable progress on stderr, JSON lines in `logs/scraper.log.<date>`.
///
/// `RUST_LOG` overrides the default of `info` for this crate and `warn` for dependencies.
pub fn init_logging() {
    // A missing log directory only costs the file layer its output.
    let _ = fs::create_dir_all(LOG_DIR);

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "scraper.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(file_writer);

    // stdout carries `parse` output and the run summary
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cricket_stats_scraper=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The writer thread must outlive main so skipped-player warnings logged
    // just before exit still reach the file.
    std::mem::forget(guard);
}
