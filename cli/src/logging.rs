// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tracing subscriber setup
//!
//! One subscriber per process: an `EnvFilter` (`RUST_LOG` wins over the
//! configured level), a console layer on stderr and, when `logging.log_to_file`
//! is set, a non-blocking file layer. The returned [`WorkerGuard`] flushes the
//! file writer when dropped and must outlive every log call.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use haif_core::domain::settings::LoggingSettings;

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Initialize the global tracing subscriber.
pub fn init(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.filter_directive()))
        .context("Failed to create log filter")?;

    let mut layers: Vec<BoxedLayer> = vec![console_layer(settings)];
    let mut guard = None;

    if settings.log_to_file {
        let (layer, file_guard) = file_layer(settings)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn console_layer(settings: &LoggingSettings) -> BoxedLayer {
    if settings.is_json() {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .boxed()
    }
}

fn file_layer(settings: &LoggingSettings) -> Result<(BoxedLayer, WorkerGuard)> {
    let (directory, file_name) = split_log_path(&settings.log_file)?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {:?}", directory))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_ansi(false).with_writer(writer);
    let layer = if settings.is_json() {
        layer.json().boxed()
    } else {
        layer.boxed()
    };

    Ok((layer, guard))
}

/// Split `logs/haif.log` into (`logs`, `haif.log`); a bare file name logs to
/// the working directory.
fn split_log_path(log_file: &str) -> Result<(&Path, &std::ffi::OsStr)> {
    let path = Path::new(log_file);
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path {:?} has no file name", log_file))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((directory, file_name))
}
