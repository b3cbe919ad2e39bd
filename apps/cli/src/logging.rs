use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BLUEFIN_LOG";

/// Logs go to stderr so report output on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
