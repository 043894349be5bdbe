use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::CONFIG;

pub const TIMING_TARGET: &str = "prompt_engine.timing";

/// Flushes the file writers when dropped; hold it for the life of `main`.
pub struct LoggingGuards {
    _events: WorkerGuard,
    _timing: WorkerGuard,
}

fn parse_log_level(value: &str) -> LevelFilter {
    match value.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

fn event_filter(level: LevelFilter) -> Targets {
    Targets::new()
        .with_default(level)
        .with_target(TIMING_TARGET, LevelFilter::OFF)
        .with_target("hyper", LevelFilter::WARN)
        .with_target("hyper_util", LevelFilter::WARN)
        .with_target("reqwest", LevelFilter::WARN)
}

/// Human-readable events on stderr (stdout is reserved for `--json`), the same
/// events as JSON lines in `prompt_engine.jsonl`, and timing records alone in
/// `timing.log`.
pub fn init_logging() -> LoggingGuards {
    let logs_dir = Path::new(&CONFIG.log_dir);
    if let Err(err) = fs::create_dir_all(logs_dir) {
        eprintln!("Failed to create logs directory: {err}");
    }

    let (events_writer, events_guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::daily(logs_dir, "prompt_engine.jsonl"),
    );
    let (timing_writer, timing_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, "timing.log"));

    let level = parse_log_level(&CONFIG.log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(event_filter(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(events_writer)
                .with_filter(event_filter(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(timing_writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(
                    Targets::new()
                        .with_default(LevelFilter::OFF)
                        .with_target(TIMING_TARGET, LevelFilter::INFO),
                ),
        )
        .init();

    LoggingGuards {
        _events: events_guard,
        _timing: timing_guard,
    }
}
