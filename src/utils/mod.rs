pub mod build_info;
pub mod input;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "forecast_core=info";

/// Builds the log filter: `RUST_LOG` when it is set and parses, otherwise
/// `forecast_core=info`.
pub fn log_filter() -> tracing_subscriber::EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

fn filter_from(env_value: Option<&str>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    env_value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber with [`log_filter`].
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::fmt;

        let _ = fmt()
            .with_env_filter(log_filter())
            .with_writer(std::io::stderr)
            .try_init();
    });
}
