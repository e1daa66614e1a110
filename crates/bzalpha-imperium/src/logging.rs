use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::Filtered;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::format::Format;
use tracing_subscriber::fmt::format::Json;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;
use tracing_subscriber::reload::Handle;

const LOG_FILE: &str = "bzalpha.log";
const DEFAULT_LEVEL: &str = "info";

type LogLayer =
    Filtered<Layer<Registry, JsonFields, Format<Json>, NonBlocking>, EnvFilter, Registry>;

#[derive(Clone, Debug)]
pub struct LogHandles {
    pub file_handle: Handle<LogLayer, Registry>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_string(&self) -> String {
        match self {
            LogLevel::Trace => "trace".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Error => "error".to_string(),
        }
    }
}

impl LogHandles {
    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        self.file_handle
            .modify(|layer| *layer.filter_mut() = EnvFilter::new(level.to_level_string()))
            .context("Could not change the log level")
    }
}

/// JSON log file in `log_dir`, filtered by `TRACING_LEVEL`. The returned
/// guard flushes the writer when dropped, so keep it alive until exit.
pub fn setup_logging(log_dir: &Path) -> Result<(LogHandles, WorkerGuard)> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Could not create the log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env("TRACING_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_filter(filter);

    let (file_layer, file_handle) = reload::Layer::new(file_layer);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber was already installed")?;

    event!(Level::INFO, log_dir = %log_dir.display(), "starting logging");
    Ok((LogHandles { file_handle }, guard))
}
