// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! File logging for debug runs. Disabled unless the `-l` flag turns it on; when
//! on, everything goes to `log.txt` in the current folder and never to the
//! screen, which raw mode owns.

use std::path::PathBuf;

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ok;

pub const LOG_FILE_NAME: &str = "log.txt";

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Global default subscriber, which once set, can't be unset or changed.
///
/// Logging is **DISABLED** by **default**: passing [LevelFilter::OFF] leaves
/// the tracing system untouched, and none of the [tracing::debug!],
/// [tracing::info!], etc. macros will produce output.
///
/// # Errors
///
/// When the log file can't be created, or a global subscriber is already set.
pub fn try_initialize_logging_global(level_filter: LevelFilter) -> miette::Result<()> {
    // Early return if the level filter is off.
    if matches!(level_filter, LevelFilter::OFF) {
        return ok!();
    }

    let layers = try_create_layers(level_filter, LOG_FILE_NAME)?;
    tracing_subscriber::registry().with(layers).init();

    ok!()
}

/// Returns the layers. This does not initialize the tracing system; call `init`
/// on a registry composed with them.
///
/// # Errors
///
/// When the file layer can't be created.
pub fn try_create_layers(
    level_filter: LevelFilter,
    path_str: &str,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // The level filter is its own layer, so that any layers added later (eg
    // OpenTelemetry) inherit it.
    layers.push(Box::new(level_filter));
    layers.push(try_create_file_layer(level_filter, path_str)?);

    Ok(layers)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// When the underlying file appender can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    path_str: &str,
) -> miette::Result<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: tracing_subscriber::registry::LookupSpan<'a>,
{
    let file = try_create_rolling_file_appender(path_str)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(file)
        .with_filter(level_filter);
    Ok(Box::new(fmt_layer))
}

/// Note that if you wrap this up in a non blocking writer, it doesn't work.
/// Here's an example of this:
/// `tracing_appender::non_blocking(try_create_rolling_file_appender("foo")?)`
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
/// - Insufficient permissions to access the file or directory
pub fn try_create_rolling_file_appender(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            format!("Can't access current folder {}. It might not exist, or don't have required permissions.",
            path.display())
        )
    })?;

    let file_stem = path.file_name().ok_or_else(|| {
        miette::miette!(format!(
        "Can't access file name {}. It might not exist, or don't have required permissions.",
        path.display()
    ))
    })?;

    Ok(tracing_appender::rolling::never(parent, file_stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_level_filter_is_a_no_op() {
        assert!(try_initialize_logging_global(LevelFilter::OFF).is_ok());
    }

    #[test]
    fn file_layer_is_created_for_a_writable_path() {
        let file_path = std::env::temp_dir().join("eati_test_log.txt");
        let layer: miette::Result<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, file_path.to_str().unwrap());
        assert!(layer.is_ok());
    }

    #[test]
    fn appender_rejects_a_path_with_no_file_name() {
        assert!(try_create_rolling_file_appender("/").is_err());
    }
}
