use tracing_subscriber::EnvFilter;

/// Sends diagnostics to stderr so they never interleave with the result
/// stream on stdout. `RUST_LOG` takes precedence over `--debug`.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
