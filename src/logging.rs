use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber: human-readable events on stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or everything
/// from this crate at debug level with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "stocktake=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
