use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Install the stderr fmt subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
/// A second call is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with_writer(std::io::stderr)
        .try_init();
}
