/// Install the global `tracing` subscriber. The filter is read from `RUST_LOG`
/// and defaults to `info`. Calling this more than once is harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
