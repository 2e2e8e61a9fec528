/// Explicit stack for walking subtrees without recursion, so that degenerate trees cannot overflow the call stack.
pub(crate) type Stack<T> = Vec<T>;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static TEST_SETUP: Once = Once::new();

    /// Installs a global `tracing` subscriber writing to the test harness output. Filtered with `RUST_LOG`, quiet by default.
    pub(crate) fn init_test_logging() {
        TEST_SETUP.call_once(|| {
            let env_filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_test_writer()
                .try_init()
                .unwrap_or_else(|e| eprintln!("Error: Failed to set up logging: {}", e));
        });
    }
}
