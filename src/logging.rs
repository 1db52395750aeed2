use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Once;
use tracing::Level;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};
use tracing_tree::HierarchicalLayer;

// Define log targets as constants
pub const TREE_BUILD: &str = "tree_build";
pub const OPTIONAL_FIELDS: &str = "optional_fields";
pub const VALUE_FORMAT: &str = "value_format";
pub const SAMPLE_LOAD: &str = "sample_load";

const DEBUG_TARGETS: &[&str] = &[TREE_BUILD, OPTIONAL_FIELDS, VALUE_FORMAT];

static INIT: Once = Once::new();

fn debug_filter() -> EnvFilter {
    EnvFilter::new(
        DEBUG_TARGETS
            .iter()
            .map(|target| format!("{}=trace", target))
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn default_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy()
}

/// Installs the stderr subscriber. With `debug_build`, the recursive walk is
/// also traced as an indented hierarchy.
pub fn init_logging(debug_build: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(writer)
            .with_filter(default_filter());

        let tree_layer = debug_build.then(|| {
            HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr)
                .with_filter(debug_filter())
        });

        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(tree_layer)
            .init();
    });

    guard
}

/// Like [`init_logging`], writing to `workbench.log` inside `log_dir`.
pub fn init_logging_with_dir(debug_build: bool, log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, "workbench.log");
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

    INIT.call_once(|| {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking_appender)
            .with_filter(if debug_build {
                debug_filter()
            } else {
                default_filter()
            });

        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(default_filter());

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();
    });

    Ok(guard)
}
