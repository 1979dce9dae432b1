//! JSON trace log for hosts built with the `trace` feature.
//!
//! The filter comes from `LIPI_LOG` when set, in `EnvFilter` syntax.

use std::path::{Path, PathBuf};

/// File name written inside the host's log directory.
pub const LOG_FILE: &str = "lipi-trace.jsonl";

/// Filter used when `LIPI_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "lipi_engine=debug,lipi_session=debug,lipi_core=debug";

#[cfg(feature = "trace")]
static LOG_PATH: std::sync::OnceLock<Option<PathBuf>> = std::sync::OnceLock::new();

/// Installs the subscriber on first call. Later calls keep the first
/// directory. Returns the file being written, or `None` when the directory
/// can't be created or the host already installed its own subscriber.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> Option<PathBuf> {
    LOG_PATH.get_or_init(|| install(log_dir)).clone()
}

#[cfg(feature = "trace")]
fn install(log_dir: &Path) -> Option<PathBuf> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir).ok()?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_env("LIPI_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    // The writer thread flushes on drop; the host page outlives us.
    std::mem::forget(guard);
    Some(log_dir.join(LOG_FILE))
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> Option<PathBuf> {
    None
}
