use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_log::AsTrace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Configures the global subscriber.
///
/// Verbosity controls the stderr layer only; the trace file, when requested, always captures
/// everything down to TRACE.
pub fn configure_tracing(trace: Option<PathBuf>, verbosity: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let trace_layer = match trace {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Creating trace file. path: {}", path.display()))?;

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::TRACE);

            Some(layer)
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(verbosity.log_level_filter().as_trace());

    tracing_subscriber::registry()
        .with(trace_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
