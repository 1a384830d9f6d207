use tracing_subscriber::EnvFilter;

/// Initialise logging. Debug mode logs at `debug` and lets `RUST_LOG`
/// override the filter; otherwise the level is fixed at `info`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
