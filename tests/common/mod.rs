use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. `RUST_LOG` picks the
/// level; quiet by default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
