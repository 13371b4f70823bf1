use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogSink};

/// Configure tracing once at startup from the injected [`LogConfig`].
///
/// `RUST_LOG`, when set, wins over the configured level so a single
/// deployment can be made chattier without changing its configuration.
pub fn setup_tracing(
    config: &LogConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_ansi(false)
        .compact();

    match config.sink {
        LogSink::Stdout => builder.with_writer(std::io::stdout).try_init(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
    }
}
