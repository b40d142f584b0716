//! Logger setup.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "depthfield_core=debug").
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// The filter comes from `config`, then `RUST_LOG`, then defaults to `info`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.format_timestamp_millis();
        builder.init();

        log::debug!("logging initialized");
    });
}
