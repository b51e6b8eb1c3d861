use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Logs go to stderr so response bodies on
/// stdout stay pipeable.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shinobi_ctl=info,shinobi_api=info")),
        )
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
